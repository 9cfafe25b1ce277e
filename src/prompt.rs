//! User input and interaction handling.
//! The scaffolding flow only needs three kinds of questions, so they are
//! expressed as a trait that the terminal implementation and tests share.
//! A question the user backs out of (Esc or Ctrl-C) answers `None` rather
//! than failing, so the caller can end the run as a normal cancellation.

use dialoguer::{Confirm, Input, Select};

use crate::error::{Error, Result};

pub trait Prompter {
    /// Asks a yes/no question. Backing out counts as "no".
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Asks for a non-empty line of text.
    fn input(&self, message: &str, default: &str) -> Result<Option<String>>;

    /// Asks to pick one of `items`, returning its index.
    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<Option<usize>>;
}

/// Terminal prompts backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let answer = cancellable(
            Confirm::new().with_prompt(message).default(default).interact_opt(),
        )?;
        Ok(answer.flatten().unwrap_or(false))
    }

    fn input(&self, message: &str, default: &str) -> Result<Option<String>> {
        cancellable(
            Input::<String>::new()
                .with_prompt(message)
                .default(default.to_string())
                .validate_with(|value: &String| -> std::result::Result<(), &str> {
                    if value.trim().is_empty() {
                        Err("Please enter a name")
                    } else {
                        Ok(())
                    }
                })
                .interact_text(),
        )
    }

    fn select(&self, message: &str, items: &[&str], default: usize) -> Result<Option<usize>> {
        let answer = cancellable(
            Select::new().with_prompt(message).items(items).default(default).interact_opt(),
        )?;
        Ok(answer.flatten())
    }
}

/// Maps an interrupted prompt to `None`; other failures (no terminal) stay errors.
fn cancellable<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(Error::PromptError(e.to_string())),
    }
}
