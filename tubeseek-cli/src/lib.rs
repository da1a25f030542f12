//! Tubeseek CLI - Interactive search and download
//!
//! Drives one interactive session: prompt for a query, search, pick a
//! result, pick a format, and hand the download to an external tool.

pub mod args;
pub mod banner;
pub mod console;
pub mod session;
pub mod spinner;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use args::Cli;
pub use console::{Accent, Console, Notice, PromptError, TerminalConsole, TextPrompt};
pub use session::{SessionController, SessionError, SessionOutcome, SessionState};
pub use spinner::Spinner;
