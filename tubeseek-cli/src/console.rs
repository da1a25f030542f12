//! Terminal presentation and prompting.
//!
//! The session talks to the user only through [`Console`], so it can be
//! driven by a real terminal or by a scripted console in tests.

use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tubeseek_core::{Candidate, InvalidInput};

use crate::banner::Banner;

/// Errors raised while prompting the user.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Choice {index} is not one of the {offered} offered for {message:?}")]
    NoSuchChoice {
        message: String,
        index: usize,
        offered: usize,
    },
}

/// Banner color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// Used while prompting
    Primary,
    /// Used while a search is running
    Searching,
}

/// Status lines shown between prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Selection came back empty
    EmptyResults,
    /// Selection has this many candidates
    Found(usize),
    /// User declined to retry
    Farewell,
    /// Download has been handed off
    Downloading,
}

/// Free-text prompt whose answer must pass `validate` before it is accepted.
#[derive(Debug, Clone, Copy)]
pub struct TextPrompt<'a> {
    pub message: &'a str,
    pub default: Option<&'a str>,
    pub validate: fn(&str) -> Result<(), InvalidInput>,
}

/// Interactive display used by a session.
pub trait Console {
    fn clear(&mut self);

    fn banner(&mut self, accent: Accent);

    fn notice(&mut self, notice: Notice);

    /// Shows the details of the chosen candidate.
    fn show_candidate(&mut self, candidate: &Candidate);

    /// Asks for text, re-asking until `prompt.validate` accepts it.
    ///
    /// # Errors
    /// - `PromptError` - Terminal could not be read or written
    fn input(&mut self, prompt: &TextPrompt<'_>) -> Result<String, PromptError>;

    /// Asks the user to pick one of `choices`, returning its index.
    ///
    /// # Errors
    /// - `PromptError` - Terminal could not be read or written
    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize, PromptError>;

    /// Asks a yes/no question.
    ///
    /// # Errors
    /// - `PromptError` - Terminal could not be read or written
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError>;
}

/// Console backed by the process terminal.
pub struct TerminalConsole {
    term: Term,
    theme: ColorfulTheme,
    banner: Banner,
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
            banner: Banner::from_package(),
        }
    }

    fn print(&self, line: impl std::fmt::Display) {
        if let Err(e) = self.term.write_line(&line.to_string()) {
            tracing::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) {
        if let Err(e) = self.term.clear_screen() {
            tracing::debug!("Failed to clear terminal: {e}");
        }
    }

    fn banner(&mut self, accent: Accent) {
        self.print(self.banner.render(accent));
    }

    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::EmptyResults => self.print(style("The results is empty!").red().bold()),
            Notice::Found(count) => {
                self.print(style(format!("[+] Found {count} videos.")).blue().italic())
            }
            Notice::Farewell => self.print(style("Bye.").white().bold()),
            Notice::Downloading => self.print(style("Downloading ...").green().bold()),
        }
    }

    fn show_candidate(&mut self, candidate: &Candidate) {
        let field = |label: &str, value: String| {
            format!("{} {}", style(label).yellow().italic(), value)
        };

        self.print(field("Video ID:", style(&candidate.id).white().bold().to_string()));
        self.print(field("Title:", style(&candidate.title).white().bold().to_string()));
        self.print(field("URL:", style(candidate.watch_url()).cyan().bold().to_string()));
        self.print(field("Uploaded:", style(&candidate.uploaded).white().bold().to_string()));
        self.print(field(
            "Uploaded by",
            style(&candidate.uploader.name).white().bold().to_string(),
        ));
        self.print(format!("\n{}\n\n", style(&candidate.description).white()));
    }

    fn input(&mut self, prompt: &TextPrompt<'_>) -> Result<String, PromptError> {
        let validate = prompt.validate;
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt.message)
            .validate_with(move |value: &String| validate(value).map_err(|e| e.to_string()));

        if let Some(default) = prompt.default {
            input = input.default(default.to_string());
        }

        Ok(input.interact_text_on(&self.term)?)
    }

    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize, PromptError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(choices)
            .default(default)
            .interact_on(&self.term)?)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(true)
            .interact_on(&self.term)?)
    }
}
