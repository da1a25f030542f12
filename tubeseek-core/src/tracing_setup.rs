//! Tracing setup for Tubeseek
//!
//! Console output stays quiet by default so log lines do not interleave with
//! interactive prompts. The full trace of each run goes to disk instead.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the per-run debug log inside the logs directory.
pub const LOG_FILE_NAME: &str = "tubeseek-last-run.log";

/// Logs directory used when none is given.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Path of the run log inside `logs_dir`, or inside [`DEFAULT_LOGS_DIR`].
pub fn log_file_path(logs_dir: Option<&Path>) -> PathBuf {
    logs_dir
        .unwrap_or_else(|| Path::new(DEFAULT_LOGS_DIR))
        .join(LOG_FILE_NAME)
}

/// Console filter: `RUST_LOG` when set, otherwise `console_level`.
fn console_filter(console_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level.as_str()))
}

/// Installs the global subscriber: stderr at `console_level`, plus every
/// event down to TRACE in the run log.
///
/// The run log is truncated on each start, so it always holds exactly the
/// last session.
///
/// # Errors
/// - `std::io::Error` - Logs directory or log file could not be created
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> std::io::Result<()> {
    let log_path = log_file_path(logs_dir);
    if let Some(parent) = log_path.parent() {
        create_dir_all(parent)?;
    }
    let log_file = File::create(&log_path)?;

    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(console_filter(console_level));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Writing run log to {}", log_path.display());
    Ok(())
}

/// Console verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    /// Default, keeps prompts uncluttered
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use tubeseek_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_tracing_level().as_str().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(CliLogLevel::default().as_tracing_level(), Level::WARN);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
        assert_eq!(CliLogLevel::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_file_location() {
        assert_eq!(
            log_file_path(None),
            Path::new("logs").join("tubeseek-last-run.log")
        );

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(log_file_path(Some(dir.path())), dir.path().join(LOG_FILE_NAME));
    }
}
