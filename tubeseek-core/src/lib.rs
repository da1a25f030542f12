//! Tubeseek Core - Query validation, result selection and download dispatch
//!
//! This crate provides the pieces of the search pipeline that do not talk to
//! the network or the terminal: typed input validation, the category/limit
//! result selector, the external downloader dispatcher, and configuration.

pub mod config;
pub mod download;
pub mod mode;
pub mod selection;
pub mod tracing_setup;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export main types for convenient access
pub use config::TubeseekConfig;
pub use download::{
    DownloadDispatcher, DownloadError, DownloadRequest, OutputFormat, YtDlpDispatcher,
    ensure_output_dir, sanitize_title,
};
pub use mode::RuntimeMode;
pub use selection::{
    Candidate, ContentCategory, SearchResultSet, SelectionOutcome, Uploader, select,
    select_labeled,
};
pub use validation::{InvalidInput, Query, ResultLimit, parse_limit, validate_limit, validate_query};

/// Fatal errors raised outside the search provider, with the text shown to
/// the user before exiting.
#[derive(Debug, thiserror::Error)]
pub enum TubeseekError {
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("Run log {} could not be created: {source}", path.display())]
    Logging {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl TubeseekError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            TubeseekError::Download(DownloadError::SpawnFailed { executable, .. }) => {
                format!("Could not start downloader '{executable}', is it installed?")
            }
            TubeseekError::Download(DownloadError::OutputDirectory { path, .. }) => {
                format!("Could not prepare output directory {}", path.display())
            }
            TubeseekError::Logging { path, .. } => {
                format!("Could not write the run log {}, check --logs-dir", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_user_messages() {
        let spawn = TubeseekError::from(DownloadError::SpawnFailed {
            executable: "yt-dlp".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        assert_eq!(
            spawn.user_message(),
            "Could not start downloader 'yt-dlp', is it installed?"
        );

        let output = TubeseekError::from(DownloadError::OutputDirectory {
            path: PathBuf::from("_videos"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert_eq!(output.user_message(), "Could not prepare output directory _videos");

        let logging = TubeseekError::Logging {
            path: PathBuf::from("logs/tubeseek-last-run.log"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(
            logging.user_message(),
            "Could not write the run log logs/tubeseek-last-run.log, check --logs-dir"
        );
        assert!(logging.to_string().starts_with("Run log logs/tubeseek-last-run.log"));
    }
}
