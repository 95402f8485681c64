use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::log::log_error::LoggerError;

/// Destination of formatted log lines.
///
/// A logger owns exactly one of these at a time, behind its lock.
pub enum LogOutput {
    /// Process standard output.
    Stdout,
    /// A file opened in append mode.
    File { path: PathBuf, file: File },
    /// Any other writer (in-memory capture, pipes, ...).
    Writer(Box<dyn Write + Send>),
}

impl LogOutput {
    /// Resolves a configured path: empty means stdout, anything else is a file.
    pub fn from_path(path: &str) -> Result<Self, LoggerError> {
        if path.is_empty() {
            Ok(LogOutput::Stdout)
        } else {
            Self::append_to(path)
        }
    }

    /// Opens `path` for appending, creating it if missing.
    ///
    /// Existing contents are kept. On Unix the file is created `0o666`
    /// before the umask applies.
    pub fn append_to<P: AsRef<Path>>(path: P) -> Result<Self, LoggerError> {
        let path = path.as_ref().to_path_buf();

        let mut opts = OpenOptions::new();
        opts.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o666);
        }

        match opts.open(&path) {
            Ok(file) => Ok(LogOutput::File { path, file }),
            Err(source) => Err(LoggerError::OpenLogFile { path, source }),
        }
    }

    /// Wraps an arbitrary writer.
    pub fn writer<W: Write + Send + 'static>(w: W) -> Self {
        LogOutput::Writer(Box::new(w))
    }

    /// Path of the backing file, if this output is a file.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            LogOutput::File { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl Write for LogOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogOutput::Stdout => io::stdout().lock().write(buf),
            LogOutput::File { file, .. } => file.write(buf),
            LogOutput::Writer(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Hold the stdout lock across the whole line so it is not split.
        match self {
            LogOutput::Stdout => io::stdout().lock().write_all(buf),
            LogOutput::File { file, .. } => file.write_all(buf),
            LogOutput::Writer(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogOutput::Stdout => io::stdout().flush(),
            LogOutput::File { file, .. } => file.flush(),
            LogOutput::Writer(w) => w.flush(),
        }
    }
}

impl fmt::Debug for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutput::Stdout => f.write_str("Stdout"),
            LogOutput::File { path, .. } => f.debug_tuple("File").field(path).finish(),
            LogOutput::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}
