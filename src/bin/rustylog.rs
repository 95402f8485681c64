use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use rustylog::config::{Config, LoggerSettings};
use rustylog::log::{LogLevel, Logger, LoggerError, log_sink::LogSink};

/// Exit status for usage and setup errors (FATAL lines exit with 1).
const SETUP_FAILURE: u8 = 2;

/// Writes one leveled log line to stdout or an append-only file.
///
/// Examples:
///   rustylog info "backup started"
///   rustylog --file /var/log/job.log --level WARN debug "hidden"
///   rustylog --config job.conf fatal "cannot continue"
#[derive(Parser, Debug)]
#[command(name = "rustylog")]
#[command(version)]
struct Cli {
    /// INI config with a [Logging] section (keys: file, level).
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// Log file to append to; empty logs to stdout. Overrides the config.
    #[arg(long, value_name = "PATH")]
    file: Option<String>,

    /// Threshold (OFF, FATAL, ERROR, WARN, INFO, DEBUG, TRACE, ALL). Overrides the config.
    #[arg(long, value_name = "LEVEL")]
    level: Option<LogLevel>,

    /// Severity of the message (TRACE, DEBUG, INFO, WARN, ERROR, FATAL).
    severity: LogLevel,

    /// Message text; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

fn settings(cli: &Cli) -> Result<LoggerSettings, LoggerError> {
    let mut settings = match &cli.config {
        Some(path) => LoggerSettings::from_config(&Config::load(path)?)?,
        None => LoggerSettings::default(),
    };
    if let Some(file) = &cli.file {
        settings.file.clone_from(file);
    }
    if let Some(level) = cli.level {
        settings.level = level;
    }
    Ok(settings)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if matches!(cli.severity, LogLevel::Off | LogLevel::All) {
        eprintln!(
            "[rustylog] {} is a threshold, not a message severity",
            cli.severity
        );
        return ExitCode::from(SETUP_FAILURE);
    }

    let logger = match settings(&cli).and_then(|s| Logger::from_settings(&s)) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("[rustylog] {e}");
            return ExitCode::from(SETUP_FAILURE);
        }
    };

    // FATAL exits from inside the sink call.
    let sink: Arc<dyn LogSink> = Arc::new(logger);
    let text = cli.message.join(" ");
    rustylog::logger_log!(sink, cli.severity, "{text}");
    ExitCode::SUCCESS
}
