//! Scripted console for driving sessions in tests.

use std::collections::VecDeque;
use std::io;

use tubeseek_core::Candidate;

use crate::console::{Accent, Console, Notice, PromptError, TextPrompt};

/// Something the session did to the console, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Clear,
    Banner(Accent),
    Notice(Notice),
    Candidate(String),
    Input { message: String, answer: String },
    Rejected { message: String, answer: String, reason: String },
    Select { message: String, choices: Vec<String>, index: usize },
    Confirm { message: String, answer: bool },
}

/// Console answering prompts from a fixed script.
///
/// Text answers are checked with the prompt's validator and rejected ones
/// are skipped, the way a terminal prompt re-asks. An empty answer picks the
/// prompt default. Choice indices are returned as scripted, even out of
/// range, so callers can be tested against a misbehaving terminal. Running
/// out of script fails the prompt with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    selections: VecDeque<usize>,
    confirms: VecDeque<bool>,
    events: Vec<ConsoleEvent>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer for the next text prompt.
    pub fn type_text(mut self, text: &str) -> Self {
        self.inputs.push_back(text.to_string());
        self
    }

    /// Queues an index for the next choice prompt.
    pub fn choose(mut self, index: usize) -> Self {
        self.selections.push_back(index);
        self
    }

    /// Queues an answer for the next yes/no prompt.
    pub fn answer(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }

    pub fn events(&self) -> &[ConsoleEvent] {
        &self.events
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Notice(notice) => Some(*notice),
                _ => None,
            })
            .collect()
    }

    /// Rejected text answers as `(prompt, answer)` pairs.
    pub fn rejections(&self) -> Vec<(&str, &str)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Rejected { message, answer, .. } => {
                    Some((message.as_str(), answer.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Messages of the yes/no prompts shown.
    pub fn confirmations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Confirm { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Choices offered by the first choice prompt with `message`.
    pub fn choices_for(&self, message: &str) -> Option<Vec<String>> {
        self.events.iter().find_map(|event| match event {
            ConsoleEvent::Select {
                message: shown,
                choices,
                ..
            } if shown == message => Some(choices.clone()),
            _ => None,
        })
    }

    /// Ids of the candidates whose details were shown.
    pub fn shown_candidates(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::Candidate(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn exhausted(message: &str) -> PromptError {
    PromptError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("script has no answer for {message:?}"),
    ))
}

impl Console for ScriptedConsole {
    fn clear(&mut self) {
        self.events.push(ConsoleEvent::Clear);
    }

    fn banner(&mut self, accent: Accent) {
        self.events.push(ConsoleEvent::Banner(accent));
    }

    fn notice(&mut self, notice: Notice) {
        self.events.push(ConsoleEvent::Notice(notice));
    }

    fn show_candidate(&mut self, candidate: &Candidate) {
        self.events.push(ConsoleEvent::Candidate(candidate.id.clone()));
    }

    fn input(&mut self, prompt: &TextPrompt<'_>) -> Result<String, PromptError> {
        loop {
            let mut answer = self.inputs.pop_front().ok_or_else(|| exhausted(prompt.message))?;
            if answer.is_empty() {
                if let Some(default) = prompt.default {
                    answer = default.to_string();
                }
            }

            match (prompt.validate)(&answer) {
                Ok(()) => {
                    self.events.push(ConsoleEvent::Input {
                        message: prompt.message.to_string(),
                        answer: answer.clone(),
                    });
                    return Ok(answer);
                }
                Err(e) => self.events.push(ConsoleEvent::Rejected {
                    message: prompt.message.to_string(),
                    answer,
                    reason: e.to_string(),
                }),
            }
        }
    }

    fn select(&mut self, message: &str, choices: &[&str], _default: usize) -> Result<usize, PromptError> {
        let index = self.selections.pop_front().ok_or_else(|| exhausted(message))?;
        self.events.push(ConsoleEvent::Select {
            message: message.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            index,
        });
        Ok(index)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        let answer = self.confirms.pop_front().ok_or_else(|| exhausted(message))?;
        self.events.push(ConsoleEvent::Confirm {
            message: message.to_string(),
            answer,
        });
        Ok(answer)
    }
}
