//! Command-line arguments for the `tubeseek` binary.

use std::path::PathBuf;

use clap::Parser;
use tubeseek_core::RuntimeMode;
use tubeseek_core::TubeseekConfig;
use tubeseek_core::tracing_setup::{CliLogLevel, DEFAULT_LOGS_DIR};

/// Search YouTube interactively and download the chosen result.
///
/// Flags override `TUBESEEK_*` environment variables, which override the
/// built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "tubeseek")]
#[command(about = "Search YouTube and download the result you pick")]
#[command(version)]
pub struct Cli {
    /// Runtime mode (production searches the live site, development uses demo data)
    #[arg(long, value_enum)]
    pub mode: Option<RuntimeMode>,

    /// Directory receiving downloaded files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Downloader executable (yt-dlp or youtube-dl)
    #[arg(long)]
    pub downloader: Option<PathBuf>,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    pub log_level: CliLogLevel,

    /// Directory for the per-run debug log
    #[arg(long, default_value = DEFAULT_LOGS_DIR)]
    pub logs_dir: PathBuf,
}

impl Cli {
    /// Layers the flags on top of `config`.
    pub fn apply(&self, mut config: TubeseekConfig) -> TubeseekConfig {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(dir) = &self.output_dir {
            config.download.output_dir = dir.clone();
        }
        if let Some(downloader) = &self.downloader {
            config.download.executable = downloader.clone();
        }
        config
    }
}
