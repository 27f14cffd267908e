use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the pipeline updater CLI.
///
/// Any of these ends the run with a non-zero exit code. Failures for individual
/// repositories are not errors; they are logged as the rollout proceeds.
#[derive(Error, Debug)]
pub enum Error {
    /// No access token could be found, or the GitHub client could not be built from it.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The configuration file or the API host is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The rollout stopped before visiting every repository.
    #[error("Rollout failed: {0}")]
    Run(#[from] pipeline_updater_core::Error),
}
