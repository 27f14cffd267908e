//! Wires configuration, credentials and the GitHub client into a rollout.

use github_client::{create_token_client, ApiConfig, GitHubClient};
use pipeline_updater_core::{AskOperator, PublishReport, Rollout, WorkflowFile};
use tracing::{info, instrument};

use crate::{
    config::{get_config_path, AppConfig, CONFIG_PATH_ENV_VAR},
    credentials::resolve_token,
    errors::Error,
};

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;

/// Loads settings, finds the access token and runs the rollout.
///
/// # Errors
///
/// Returns `Error::Config` for a malformed configuration file or API host,
/// `Error::Auth` when no token is available, and `Error::Run` when the rollout
/// cannot continue.
#[instrument(skip(ask))]
pub async fn run(api_host: Option<&str>, ask: AskOperator<'_>) -> Result<Vec<PublishReport>, Error> {
    let config_override = std::env::var(CONFIG_PATH_ENV_VAR).ok();
    let config_path = get_config_path(config_override.as_deref());
    let config = AppConfig::load_or_default(&config_path)?;

    let api_config = config.resolve_api_config(api_host)?;
    let token = resolve_token()?;

    execute(&config, &api_config, &token, ask).await
}

/// Runs the rollout with settings that have already been resolved.
///
/// # Errors
///
/// Returns `Error::Auth` if the client cannot be built and `Error::Run` when the
/// rollout cannot continue.
pub async fn execute(
    config: &AppConfig,
    api_config: &ApiConfig,
    token: &str,
    ask: AskOperator<'_>,
) -> Result<Vec<PublishReport>, Error> {
    let octocrab = create_token_client(api_config, token).map_err(|e| match e {
        github_client::Error::InvalidBaseUrl(_) => Error::Config(e.to_string()),
        other => Error::Auth(other.to_string()),
    })?;
    let client = GitHubClient::new(octocrab);
    let workflow = WorkflowFile::new(config.workflow.variant);

    info!(
        base_uri = api_config.base_uri(),
        workflow = workflow.path(),
        branch = workflow.branch(),
        "Starting rollout"
    );

    let reports = Rollout::new(&client, &workflow).run(ask).await?;

    info!(repositories = reports.len(), "Rollout finished");
    Ok(reports)
}
