//! Integration tests for Tubeseek
//!
//! These tests drive whole sessions across the core, search and cli crates
//! with scripted terminal input, and run the real dispatcher against a
//! stand-in downloader.

#[path = "integration/session_pipeline.rs"]
mod session_pipeline;

#[path = "integration/downloader_process.rs"]
mod downloader_process;
