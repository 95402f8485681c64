use crate::{
    config::LoggerSettings,
    log::{log_error::LoggerError, log_level::LogLevel, log_output::LogOutput, log_sink::LogSink},
};

use chrono::Local;
use std::{
    fmt::{self, Write as _},
    io::{Write, stdout},
    path::PathBuf,
    process,
    sync::{
        Mutex, MutexGuard, PoisonError, TryLockError,
        atomic::{AtomicU8, Ordering},
    },
};

/// Date and time, second precision, local zone.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Exit status used when a FATAL line gets through the threshold.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Leveled, synchronous logger writing one line per call to a single output.
///
/// Every emit takes the output lock for the whole threshold check, line
/// composition and write, so concurrent callers never interleave within a
/// line. The threshold lives in an atomic and can be changed from any
/// thread without taking the lock.
///
/// # Line format
///
/// `YYYY/MM/DD HH:MM:SS LEVEL message`
///
/// # Example
///
/// ```rust,ignore
/// let logger = Logger::init("")?; // stdout
/// logger.set_level(LogLevel::Info);
/// logger.info(format_args!("listening on {}", addr));
/// logger.debug(format_args!("suppressed"));
/// ```
pub struct Logger {
    output: Mutex<LogOutput>,
    level: AtomicU8,
}

impl Logger {
    /// Opens the logger's output.
    ///
    /// An empty `path` logs to stdout and never fails. Anything else is
    /// opened in append mode and created if missing. The threshold starts at
    /// [`LogLevel::All`].
    ///
    /// # Errors
    ///
    /// [`LoggerError::OpenLogFile`] if the file cannot be opened for appending.
    pub fn init(path: &str) -> Result<Self, LoggerError> {
        Ok(Self::with_output(LogOutput::from_path(path)?))
    }

    /// Builds a logger from file/level settings, typically read from a config file.
    pub fn from_settings(settings: &LoggerSettings) -> Result<Self, LoggerError> {
        let logger = Self::init(&settings.file)?;
        logger.set_level(settings.level);
        Ok(logger)
    }

    /// Logs into an already opened output; the threshold starts at [`LogLevel::All`].
    #[must_use]
    pub fn with_output(output: LogOutput) -> Self {
        Self {
            output: Mutex::new(output),
            level: AtomicU8::new(LogLevel::All.as_u8()),
        }
    }

    /// Logs into any writer, e.g. an in-memory buffer.
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(w: W) -> Self {
        Self::with_output(LogOutput::writer(w))
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Replaces the threshold. Takes effect for the next emit on any thread.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Swaps the output and returns the previous one.
    ///
    /// Waits for any emit in flight, so no line is split across outputs.
    pub fn set_output(&self, output: LogOutput) -> LogOutput {
        let mut guard = self.lock_output();
        let _ = guard.flush();
        std::mem::replace(&mut *guard, output)
    }

    /// Path of the log file, or `None` when logging to stdout or a custom writer.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.lock_output().file_path().map(PathBuf::from)
    }

    /// Writes `args` at `level` if the threshold lets it through.
    ///
    /// `Off` and `All` are not message levels and are never written. A
    /// [`LogLevel::Fatal`] message goes through [`fatal`](Self::fatal) and
    /// exits the process once written.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        match level {
            LogLevel::Fatal => self.fatal(args),
            _ => self.emit(level, args, || {}),
        }
    }

    /// Writes a TRACE line.
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Trace, args, || {});
    }

    /// Writes a DEBUG line.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, args, || {});
    }

    /// Writes an INFO line.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args, || {});
    }

    /// Writes a WARN line.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args, || {});
    }

    /// Writes an ERROR line.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Error, args, || {});
    }

    /// Writes a FATAL line and exits the process with [`FATAL_EXIT_CODE`].
    ///
    /// Exit happens only if the line passed the threshold; under `Off` this
    /// returns normally. The output lock is still held when the process
    /// exits, so nothing else gets written after the fatal line.
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Fatal, args, || {
            let _ = stdout().flush();
            process::exit(FATAL_EXIT_CODE);
        });
    }

    /// Checks the threshold, writes one line and runs `then`, all under the lock.
    ///
    /// The message is rendered before the lock is taken: its `Display` impls
    /// may themselves touch this logger. Write errors are dropped.
    fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>, then: impl FnOnce()) {
        if !level.passes(self.level()) {
            return;
        }
        let msg = args.to_string();

        let mut out = self.lock_output();
        if !level.passes(self.level()) {
            return;
        }

        let ts = Local::now().format(TIMESTAMP_FORMAT);
        let line = format_line(ts, level, &msg);
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();

        then();
    }

    fn lock_output(&self) -> MutexGuard<'_, LogOutput> {
        // A panic mid-write leaves the output usable; keep logging.
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for Logger {
    #[inline]
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        Logger::log(self, level, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Logger");
        dbg.field("level", &self.level());
        match self.output.try_lock() {
            Ok(out) => dbg.field("output", &*out),
            Err(TryLockError::Poisoned(p)) => dbg.field("output", &*p.into_inner()),
            Err(TryLockError::WouldBlock) => dbg.field("output", &format_args!("<locked>")),
        };
        dbg.finish()
    }
}

/// Composes `<timestamp> <LEVEL> <message>\n`.
///
/// A trailing newline already present in the message is not doubled.
fn format_line(ts: impl fmt::Display, level: LogLevel, msg: &str) -> String {
    let mut line = String::with_capacity(msg.len() + 32);
    let _ = write!(line, "{ts} {} {msg}", level.name());
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}
