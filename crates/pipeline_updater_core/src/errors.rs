use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that stop a rollout.
///
/// Per-repository failures are not errors: they are logged and recorded in the
/// [`crate::PublishReport`] for that repository. Only failures that leave the run
/// unable to continue end up here.
#[derive(Error, Debug)]
pub enum Error {
    /// A request to GitHub could not be completed.
    #[error("GitHub request failed: {0}")]
    GitHub(#[from] github_client::Error),

    /// The operator's answer to the confirmation prompt could not be read.
    #[error("Failed to read confirmation answer: {0}")]
    Prompt(String),
}
