//! Terminal prompts backed by dialoguer.

use std::io;

use console::Term;
use dialoguer::{
    Confirm, Input, MultiSelect, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use owo_colors::OwoColorize;

use quark_core::{
    application::{ApplicationError, Prompter},
    domain::Choice,
    error::QuarkResult,
};

/// [`Prompter`] that asks on the controlling terminal.
pub struct DialoguerPrompter {
    theme: Box<dyn Theme>,
    color: bool,
    term: Term,
}

impl DialoguerPrompter {
    pub fn new(color: bool) -> Self {
        let theme: Box<dyn Theme> = if color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self {
            theme,
            color,
            term: Term::stderr(),
        }
    }
}

/// `None` from an `interact_opt` call means Esc or `q` was pressed.
fn answered<T>(result: Result<Option<T>, dialoguer::Error>) -> QuarkResult<T> {
    match result.map_err(prompt_error)? {
        Some(value) => Ok(value),
        None => Err(cancelled()),
    }
}

fn prompt_error(err: dialoguer::Error) -> quark_core::error::QuarkError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => cancelled(),
        other => ApplicationError::Prompt {
            reason: other.to_string(),
        }
        .into(),
    }
}

fn cancelled() -> quark_core::error::QuarkError {
    ApplicationError::Cancelled.into()
}

fn labels(choices: &[Choice]) -> Vec<&str> {
    choices.iter().map(|c| c.label.as_str()).collect()
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, message: &str, default: Option<String>) -> QuarkResult<String> {
        let mut input = Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default);
        }
        input.interact_text_on(&self.term).map_err(prompt_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> QuarkResult<bool> {
        answered(
            Confirm::with_theme(self.theme.as_ref())
                .with_prompt(message)
                .default(default)
                .interact_on_opt(&self.term),
        )
    }

    fn select(&mut self, message: &str, choices: &[Choice], default: usize) -> QuarkResult<usize> {
        answered(
            Select::with_theme(self.theme.as_ref())
                .with_prompt(message)
                .items(&labels(choices))
                .default(default)
                .interact_on_opt(&self.term),
        )
    }

    fn multi_select(
        &mut self,
        message: &str,
        choices: &[Choice],
        checked: &[bool],
    ) -> QuarkResult<Vec<usize>> {
        answered(
            MultiSelect::with_theme(self.theme.as_ref())
                .with_prompt(message)
                .items(&labels(choices))
                .defaults(checked)
                .interact_on_opt(&self.term),
        )
    }

    fn report_invalid(&mut self, reason: &str) {
        let line = if self.color {
            format!("{} {}", ">>".red().bold(), reason.red())
        } else {
            format!(">> {reason}")
        };
        if let Err(e) = self.term.write_line(&line) {
            tracing::debug!(error = %e, "Could not print validation message");
        }
    }
}
