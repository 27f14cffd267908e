//! The one-time "continue automatically?" gate shown before writes.
//!
//! The gate starts in [`ConfirmationGate::AskPending`]. Every write made while it is
//! pending is preceded by a prompt; answering `y` moves it to
//! [`ConfirmationGate::AutoConfirmed`] for the rest of the run. Any other answer keeps
//! it pending, so the operator is asked again before the next write.

use tracing::{debug, info};

use crate::Error;

#[cfg(test)]
#[path = "confirmation_tests.rs"]
mod tests;

/// Callback used to put a question to the operator and read back the answer.
pub type AskOperator<'a> = &'a dyn Fn(&str) -> Result<String, Error>;

/// State of the operator confirmation for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmationGate {
    /// The operator has not opted into unattended mode yet.
    #[default]
    AskPending,

    /// The operator answered `y`; no further prompts are shown.
    AutoConfirmed,
}

impl ConfirmationGate {
    /// Builds the question shown before writing to `repo_name`.
    pub fn question(repo_name: &str) -> String {
        format!(
            "Do you want to continue for rest of the repositories automatically, or check the changes for {} first? (y - continue/n - check changes first): ",
            repo_name
        )
    }

    /// Returns `true` while the operator still has to be asked.
    pub fn needs_prompt(&self) -> bool {
        matches!(self, ConfirmationGate::AskPending)
    }

    /// The state that follows a given answer.
    pub fn after_answer(self, answer: &str) -> Self {
        if is_affirmative(answer) {
            ConfirmationGate::AutoConfirmed
        } else {
            self
        }
    }

    /// Prompts the operator if the gate is still pending.
    ///
    /// The write for `repo_name` goes ahead whatever the answer; the answer only
    /// decides whether the next write is prompted too.
    ///
    /// # Errors
    /// Propagates any error from `ask`.
    pub fn confirm_before_write(&mut self, repo_name: &str, ask: AskOperator<'_>) -> Result<(), Error> {
        if !self.needs_prompt() {
            return Ok(());
        }

        let answer = ask(&Self::question(repo_name))?;
        *self = self.after_answer(&answer);

        match self {
            ConfirmationGate::AutoConfirmed => {
                info!("Continuing automatically for the remaining repositories")
            }
            ConfirmationGate::AskPending => {
                debug!(repo = repo_name, "Operator will be asked again before the next write")
            }
        }

        Ok(())
    }
}

/// Only an exact `y` confirms; surrounding whitespace from the input line is ignored.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim() == "y"
}
