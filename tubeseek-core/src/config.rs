//! Centralized configuration for Tubeseek.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

use crate::mode::RuntimeMode;

/// Central configuration for all Tubeseek components.
#[derive(Debug, Clone, Default)]
pub struct TubeseekConfig {
    pub mode: RuntimeMode,
    pub search: SearchConfig,
    pub download: DownloadConfig,
    pub prompt: PromptConfig,
}

/// Search endpoint configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Site root; the results page is `{base_url}/results`
    pub base_url: String,
    /// User agent sent with search requests
    pub user_agent: String,
    /// Preferred language for result text
    pub accept_language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            user_agent: concat!("tubeseek/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_language: "en".to_string(),
        }
    }
}

/// External downloader configuration.
///
/// `extra_flags` are passed before the format, output and URL arguments.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Downloader executable name or path
    pub executable: PathBuf,
    /// Directory receiving downloaded files
    pub output_dir: PathBuf,
    /// Flags passed on every invocation
    pub extra_flags: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("yt-dlp"),
            output_dir: PathBuf::from("_videos"),
            extra_flags: [
                "--no-warnings",
                "--no-call-home",
                "--no-check-certificate",
                "--prefer-free-formats",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Interactive prompt behavior.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Spinner frame interval while searching
    pub spinner_interval: Duration,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            spinner_interval: Duration::from_millis(300),
        }
    }
}

impl TubeseekConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unset or unparsable variables leave the defaults in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("TUBESEEK_MODE") {
            if let Ok(mode) = mode.parse::<RuntimeMode>() {
                config.mode = mode;
            }
        }

        if let Ok(url) = std::env::var("TUBESEEK_SEARCH_URL") {
            if !url.is_empty() {
                config.search.base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(agent) = std::env::var("TUBESEEK_USER_AGENT") {
            if !agent.is_empty() {
                config.search.user_agent = agent;
            }
        }

        if let Ok(executable) = std::env::var("TUBESEEK_DOWNLOADER") {
            if !executable.is_empty() {
                config.download.executable = PathBuf::from(executable);
            }
        }

        if let Ok(dir) = std::env::var("TUBESEEK_OUTPUT_DIR") {
            if !dir.is_empty() {
                config.download.output_dir = PathBuf::from(dir);
            }
        }

        config
    }

    /// Creates a configuration for offline development.
    pub fn for_development() -> Self {
        Self {
            mode: RuntimeMode::Development,
            ..Default::default()
        }
    }
}
