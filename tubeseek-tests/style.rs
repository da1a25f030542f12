//! Style Enforcement Tests
//!
//! Scans the production sources of the workspace crates for patterns clippy
//! does not reject on its own.
//!
//! - `production_code` - No bare unwraps and no `#[allow(dead_code)]`
//!   outside test code

#[path = "style/production_code.rs"]
mod production_code;
