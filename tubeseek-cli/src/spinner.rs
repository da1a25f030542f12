//! Busy indicator shown while a search request is in flight.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["|", "/", "-", "\\", "#", "$", "%", ""];

/// Terminal spinner ticked by a background task.
///
/// The task is aborted and the line erased when the spinner is dropped, so
/// every exit from the owning scope stops it. Must be created inside a tokio
/// runtime.
#[derive(Debug)]
pub struct Spinner {
    bar: ProgressBar,
    ticker: JoinHandle<()>,
}

impl Spinner {
    /// Starts a spinner ticking every `interval`.
    pub fn start(message: &str, interval: Duration) -> Self {
        Self::with_bar(ProgressBar::new_spinner(), message, interval)
    }

    /// Spinner that ticks but never draws.
    pub fn hidden(message: &str, interval: Duration) -> Self {
        Self::with_bar(ProgressBar::hidden(), message, interval)
    }

    fn with_bar(bar: ProgressBar, message: &str, interval: Duration) -> Self {
        bar.set_style(ProgressStyle::default_spinner().tick_strings(FRAMES));
        bar.set_message(style(message).yellow().bold().to_string());

        let ticking = bar.clone();
        let ticker = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval.max(Duration::from_millis(1)));
            loop {
                ticks.tick().await;
                ticking.tick();
            }
        });

        Self { bar, ticker }
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_finished() && !self.bar.is_finished()
    }

    /// Stops and erases the spinner.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.ticker.abort();
        self.bar.finish_and_clear();
    }
}
