use std::fmt;

use crate::log::log_level::LogLevel;

/// Emit capability handed to components that should log but not own a logger.
///
/// Pass it around as `Arc<dyn LogSink>` instead of reaching for a global.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);
}
