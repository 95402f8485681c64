use std::{error::Error, fmt, io, path::PathBuf};

/// Errors surfaced while building a [`Logger`](crate::log::logger::Logger).
///
/// Emitting never fails; only construction and configuration do.
#[derive(Debug)]
pub enum LoggerError {
    /// The log file could not be opened for appending.
    OpenLogFile { path: PathBuf, source: io::Error },
    /// A level name that is not in the level table.
    UnknownLevel(String),
    /// The configuration file could not be read.
    Config(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LoggerError::*;
        match self {
            OpenLogFile { path, source } => {
                write!(f, "failed to open log file {}: {source}", path.display())
            }
            UnknownLevel(name) => write!(f, "unknown log level: {name:?}"),
            Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl Error for LoggerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoggerError::OpenLogFile { source, .. } => Some(source),
            _ => None,
        }
    }
}
