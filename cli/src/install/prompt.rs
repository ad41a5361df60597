use crate::utils::error::{SnippetError, SnippetResult};
use inquire::validator::Validation;
use inquire::{Confirm, Text};

/// The questions a workflow may ask the user.
///
/// Workflows receive a prompter instead of talking to the terminal, so silent
/// mode and tests can answer without a TTY.
pub trait Prompter {
    /// Whether answers come from a person.
    fn is_interactive(&self) -> bool;

    /// Yes/no question. Cancellation is `UserCancelled`.
    fn confirm(&self, message: &str, default: bool) -> SnippetResult<bool>;

    /// Free-form path entry. Implementations re-ask on empty input.
    fn input_path(&self, message: &str) -> SnippetResult<String>;
}

/// Prompts on the terminal with inquire
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn confirm(&self, message: &str, default: bool) -> SnippetResult<bool> {
        Ok(Confirm::new(message)
            .with_default(default)
            .with_help_message("Ctrl+C to cancel")
            .prompt()?)
    }

    fn input_path(&self, message: &str) -> SnippetResult<String> {
        let answer = Text::new(message)
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("path cannot be empty".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()?;

        Ok(answer.trim().to_string())
    }
}

/// Accepts every default and never reads the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPrompter;

impl Prompter for SilentPrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn confirm(&self, _message: &str, default: bool) -> SnippetResult<bool> {
        Ok(default)
    }

    fn input_path(&self, message: &str) -> SnippetResult<String> {
        Err(SnippetError::PathInvalid(format!(
            "cannot ask '{}' in silent mode",
            message
        )))
    }
}

/// Pick the prompter for a run.
pub fn prompter_for(silent: bool) -> Box<dyn Prompter> {
    if silent {
        Box::new(SilentPrompter)
    } else {
        Box::new(TerminalPrompter)
    }
}
