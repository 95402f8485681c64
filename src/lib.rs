//! rustylog is a small leveled logger.
//!
//! Messages go through one of six severity methods (`trace` to `fatal`), are
//! filtered against a runtime threshold and written as
//! `YYYY/MM/DD HH:MM:SS LEVEL message` lines to stdout or an append-only file.
//! A `rustylog` binary wraps the same logger for use from shell scripts.

/// INI-style configuration loading and logger settings.
pub mod config;
/// Levels, the logger itself, sinks and macros.
pub mod log;
