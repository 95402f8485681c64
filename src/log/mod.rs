pub mod log_error;
pub mod log_level;
pub mod log_macros;
pub mod log_output;
pub mod log_sink;
pub mod logger;
pub mod noop_log_sink;
pub use log_error::LoggerError;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use noop_log_sink::NoopLogSink;
