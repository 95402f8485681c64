use std::{fmt, str::FromStr};

use crate::log::log_error::LoggerError;

/// Defines the severity levels for log messages and logger thresholds.
///
/// Variants are ordered from "emit least" to "emit most", so a threshold
/// compares greater than every level it lets through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Turns logging off. Only meaningful as a threshold.
    Off = 0,
    /// Designates errors after which the process cannot continue.
    Fatal = 1,
    /// Designates error events that might still allow the application to continue running.
    Error = 2,
    /// Designates potentially harmful situations.
    Warn = 3,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info = 4,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug = 5,
    /// Designates very fine-grained informational events.
    Trace = 6,
    /// Lets everything through. Only meaningful as a threshold.
    All = 7,
}

impl LogLevel {
    /// Every level, in ascending order of permissiveness.
    pub const ALL_LEVELS: [LogLevel; 8] = [
        LogLevel::Off,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::All,
    ];

    /// Canonical upper-case label, as written into each log line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::All => "ALL",
        }
    }

    /// Exact lookup of a canonical label. `from_name(l.name()) == Some(l)`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_LEVELS.into_iter().find(|l| l.name() == name)
    }

    /// The level immediately below this one; `Off` has nothing below it.
    #[must_use]
    pub const fn gate(self) -> Self {
        match self {
            LogLevel::Off | LogLevel::Fatal => LogLevel::Off,
            LogLevel::Error => LogLevel::Fatal,
            LogLevel::Warn => LogLevel::Error,
            LogLevel::Info => LogLevel::Warn,
            LogLevel::Debug => LogLevel::Info,
            LogLevel::Trace => LogLevel::Debug,
            LogLevel::All => LogLevel::Trace,
        }
    }

    /// Whether a message at this level is emitted under `threshold`.
    ///
    /// The threshold has to sit strictly above this level's gate. `Off` and
    /// `All` are thresholds, not message levels, and never pass.
    #[must_use]
    pub fn passes(self, threshold: LogLevel) -> bool {
        match self {
            LogLevel::Off | LogLevel::All => false,
            _ => threshold > self.gate(),
        }
    }

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Off,
            1 => LogLevel::Fatal,
            2 => LogLevel::Error,
            3 => LogLevel::Warn,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::Trace,
            _ => LogLevel::All,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Case-insensitive parse used for config files and CLI flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::from_name(&upper).ok_or_else(|| LoggerError::UnknownLevel(s.to_string()))
    }
}
