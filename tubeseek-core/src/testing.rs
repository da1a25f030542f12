//! Test doubles shared across Tubeseek crates.

use parking_lot::Mutex;

use crate::download::{DownloadDispatcher, DownloadError, DownloadRequest};

/// Dispatcher that records requests instead of starting processes.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    requests: Mutex<Vec<DownloadRequest>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests dispatched so far, oldest first.
    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.requests.lock().clone()
    }
}

impl DownloadDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: &DownloadRequest) -> Result<(), DownloadError> {
        self.requests.lock().push(request.clone());
        Ok(())
    }
}
