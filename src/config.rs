use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::log::{log_error::LoggerError, log_level::LogLevel};

/// Section holding the logger keys.
pub const LOGGING_SECTION: &str = "Logging";

/// INI-style configuration: `key = value` pairs, optional `[section]`
/// headers, `#` comments. Keys before the first header are globals and
/// live under the empty section name.
#[derive(Debug, Default)]
pub struct Config {
    entries: HashMap<(String, String), String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, LoggerError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LoggerError::Config(format!("Error reading file {path}: {e}")))?;
        Ok(Self::parse(&content))
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        let mut section = String::new();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_string();
            } else if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').to_string();
                entries.insert((section.clone(), key.trim().to_string()), value);
            }
        }
        Config { entries }
    }

    /// Value of `key` in `section`, falling back to the global `key`.
    #[must_use]
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&(section.to_string(), key.to_string()))
            .or_else(|| self.entries.get(&(String::new(), key.to_string())))
            .map(String::as_str)
    }
}

/// Where a logger writes and what it lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    /// Log file path; empty means stdout.
    pub file: String,
    pub level: LogLevel,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            file: String::new(),
            level: LogLevel::All,
        }
    }
}

impl LoggerSettings {
    /// Reads `file` and `level` from `[Logging]`, falling back to globals.
    ///
    /// A leading `~` in `file` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// [`LoggerError::UnknownLevel`] if `level` is not a level name.
    pub fn from_config(config: &Config) -> Result<Self, LoggerError> {
        let file = config.lookup(LOGGING_SECTION, "file").unwrap_or_default();
        let file = if file.is_empty() {
            String::new()
        } else {
            expand_path(file).to_string_lossy().into_owned()
        };

        let level = match config.lookup(LOGGING_SECTION, "level").unwrap_or_default() {
            "" => LogLevel::All,
            name => name.parse()?,
        };

        Ok(Self { file, level })
    }
}

/// Expands tilde (`~`) in file paths to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if path_str.starts_with("~/") || path_str.starts_with("~\\") {
                home_path.push(&path_str[2..]);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# process-wide defaults
level = ERROR

[Logging]
file = "/var/log/app.log"
level = debug
"#;

    #[test]
    fn parses_sections_globals_and_quotes() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.lookup("", "level"), Some("ERROR"));
        assert_eq!(cfg.lookup("Logging", "file"), Some("/var/log/app.log"));
        assert_eq!(cfg.lookup("Logging", "level"), Some("debug"));
        assert_eq!(cfg.lookup("Other", "level"), Some("ERROR"));
        assert_eq!(cfg.lookup("Other", "file"), None);
    }

    #[test]
    fn settings_from_logging_section() {
        let settings = LoggerSettings::from_config(&Config::parse(SAMPLE)).unwrap();
        assert_eq!(settings.file, "/var/log/app.log");
        assert_eq!(settings.level, LogLevel::Debug);
    }

    #[test]
    fn settings_fall_back_to_globals_then_defaults() {
        let cfg = Config::parse("level = warn\n");
        let settings = LoggerSettings::from_config(&cfg).unwrap();
        assert_eq!(settings.level, LogLevel::Warn);
        assert_eq!(settings.file, "");

        let settings = LoggerSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings, LoggerSettings::default());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let cfg = Config::parse("[Logging]\nlevel = chatty\n");
        match LoggerSettings::from_config(&cfg) {
            Err(LoggerError::UnknownLevel(name)) => assert_eq!(name, "chatty"),
            other => panic!("expected UnknownLevel, got: {:?}", other),
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.conf");
        let err = Config::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoggerError::Config(_)), "{err}");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.conf");
        std::fs::write(&path, "[Logging]\nlevel = INFO\n").unwrap();

        let cfg = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.lookup("Logging", "level"), Some("INFO"));
    }

    #[test]
    fn tilde_expands_against_home() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        assert_eq!(expand_path("~/logs/a.log"), PathBuf::from(home).join("logs/a.log"));
        assert_eq!(expand_path("/abs/a.log"), PathBuf::from("/abs/a.log"));
    }
}
