//! Interactive prompts.
//!
//! Commands talk to the user through [`Prompter`] so the confirmation gate
//! and menu can be driven without a terminal.

use std::io::IsTerminal;

use dialoguer::{Confirm, Select};

use crate::commands::{Command, MENU};
use crate::error::{AppError, AppResult};

/// User interaction needed by the command surface.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. Only an explicit yes returns `true`.
    fn confirm(&self, question: &str) -> AppResult<bool>;

    /// Let the user pick one of the menu commands; `None` if they back out.
    fn select_command(&self) -> AppResult<Option<Command>>;
}

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Terminal prompts via `dialoguer`.
///
/// Without a terminal every confirmation is answered "no" and the menu
/// cannot be shown.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> AppResult<bool> {
        if !is_interactive_terminal() {
            tracing::warn!("No terminal to confirm on; pass --yes to skip confirmation");
            return Ok(false);
        }
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| AppError::Prompt(e.to_string()))
    }

    fn select_command(&self) -> AppResult<Option<Command>> {
        if !is_interactive_terminal() {
            return Err(AppError::Prompt(
                "The menu requires a terminal; run a subcommand instead".into(),
            ));
        }
        let labels: Vec<&str> = MENU.iter().map(|c| c.label()).collect();
        let choice = Select::new()
            .with_prompt("Empty Groups")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| AppError::Prompt(e.to_string()))?;
        Ok(choice.map(|i| MENU[i]))
    }
}

/// Answers every confirmation with yes (`--yes`).
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, question: &str) -> AppResult<bool> {
        tracing::debug!(question, "Confirmation skipped (--yes)");
        Ok(true)
    }

    fn select_command(&self) -> AppResult<Option<Command>> {
        TerminalPrompter.select_command()
    }
}
