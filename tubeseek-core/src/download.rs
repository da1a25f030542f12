//! External downloader dispatch.
//!
//! The session hands a [`DownloadRequest`] to a [`DownloadDispatcher`] and
//! moves on; the process runs in the background and the session never looks
//! at its exit status.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::process::{Child, Command};

use crate::config::DownloadConfig;
use crate::selection::Candidate;

/// Errors raised while preparing or starting a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Failed to start '{executable}': {source}")]
    SpawnFailed {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Container format requested from the downloader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Mp3,
    Mp4,
    Webm,
}

impl OutputFormat {
    /// Choices in prompt order.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Mp3, OutputFormat::Mp4, OutputFormat::Webm];

    /// Format label, also used as the file extension.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Webm => "webm",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(OutputFormat::Mp3),
            "mp4" => Ok(OutputFormat::Mp4),
            "webm" => Ok(OutputFormat::Webm),
            _ => Err(format!("Invalid output format: '{s}'. Valid options are: mp3, mp4, webm")),
        }
    }
}

/// Replaces path separators in a title so it is usable as one file name.
pub fn sanitize_title(title: &str) -> String {
    title.replace(['/', '\\'], "-")
}

/// Everything the downloader needs for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub format: OutputFormat,
    pub output: PathBuf,
}

impl DownloadRequest {
    /// Builds the request for `candidate`, saving as
    /// `<output_dir>/<sanitized title>.<format>`.
    pub fn for_candidate(candidate: &Candidate, format: OutputFormat, output_dir: &Path) -> Self {
        let file_name = format!("{}.{}", sanitize_title(&candidate.title), format.label());
        Self {
            url: candidate.watch_url(),
            format,
            output: output_dir.join(file_name),
        }
    }
}

/// Creates the output directory if it does not exist yet.
///
/// # Errors
/// - `DownloadError::OutputDirectory` - Directory could not be created
pub fn ensure_output_dir(path: &Path) -> Result<(), DownloadError> {
    if path.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|source| DownloadError::OutputDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Created output directory {}", path.display());
    Ok(())
}

/// Starts downloads without waiting for them.
pub trait DownloadDispatcher: Send + Sync + fmt::Debug {
    /// Starts downloading `request` and returns as soon as it is running.
    ///
    /// # Errors
    /// - `DownloadError::SpawnFailed` - Downloader process could not be started
    fn dispatch(&self, request: &DownloadRequest) -> Result<(), DownloadError>;
}

/// Dispatcher running a youtube-dl compatible executable.
///
/// Spawned processes are tracked so the binary can wait for them before
/// exiting.
#[derive(Debug)]
pub struct YtDlpDispatcher {
    executable: PathBuf,
    extra_flags: Vec<String>,
    running: Mutex<Vec<Child>>,
}

impl YtDlpDispatcher {
    pub fn new(executable: impl Into<PathBuf>, extra_flags: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            extra_flags,
            running: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.executable.clone(), config.extra_flags.clone())
    }

    /// Builds the downloader invocation for `request`.
    pub fn command(&self, request: &DownloadRequest) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(&self.extra_flags)
            .arg("--format")
            .arg(request.format.label())
            .arg("--output")
            .arg(&request.output)
            .arg(&request.url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        command
    }

    /// Number of spawned downloads not yet waited for.
    pub fn pending(&self) -> usize {
        self.running.lock().len()
    }

    /// Waits for every spawned download, returning how many exited successfully.
    pub async fn wait_all(&self) -> usize {
        let children = std::mem::take(&mut *self.running.lock());
        let mut succeeded = 0;

        for mut child in children {
            match child.wait().await {
                Ok(status) if status.success() => succeeded += 1,
                Ok(status) => tracing::warn!("Downloader exited with {status}"),
                Err(e) => tracing::error!("Failed to wait for downloader: {e}"),
            }
        }

        succeeded
    }
}

impl DownloadDispatcher for YtDlpDispatcher {
    fn dispatch(&self, request: &DownloadRequest) -> Result<(), DownloadError> {
        let child = self
            .command(request)
            .spawn()
            .map_err(|source| DownloadError::SpawnFailed {
                executable: self.executable.display().to_string(),
                source,
            })?;

        tracing::info!(
            "Started {} for {} as {} -> {}",
            self.executable.display(),
            request.url,
            request.format,
            request.output.display()
        );
        self.running.lock().push(child);
        Ok(())
    }
}
