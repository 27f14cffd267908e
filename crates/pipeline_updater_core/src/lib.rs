//! # Pipeline Updater Core
//!
//! This crate rolls a fixed GitHub Actions workflow file out to every private
//! repository the access token can see.
//!
//! ## Overview
//!
//! A rollout runs in a fixed order:
//! 1. Log the authenticated user
//! 2. For each organization the user belongs to, list its repositories and publish
//! 3. List the user's own repositories and publish
//!
//! Publishing skips public repositories, asks the operator once whether to continue
//! unattended, and upserts the workflow file through the Contents API.
//!
//! ## Examples
//!
//! ```no_run
//! use github_client::{create_token_client, ApiConfig, GitHubClient};
//! use pipeline_updater_core::{Error, Rollout, WorkflowFile, WorkflowVariant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::default();
//! let client = GitHubClient::new(create_token_client(&config, "ghp_example")?);
//! let workflow = WorkflowFile::new(WorkflowVariant::Build);
//!
//! let ask = |_: &str| -> Result<String, Error> { Ok("y".to_string()) };
//! let reports = Rollout::new(&client, &workflow).run(&ask).await?;
//! println!("Visited {} repositories", reports.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! All GitHub access goes through the [`github_client::RepositoryClient`] trait so the
//! rollout can be exercised against mock clients.

use github_client::{RepositoryClient, RepositoryScope};
use tracing::{info, instrument, warn};

pub mod confirmation;
pub use confirmation::{is_affirmative, AskOperator, ConfirmationGate};

pub mod errors;
pub use errors::Error;

pub mod publisher;
pub use publisher::{publish_workflow, PublishOutcome, PublishReport};

pub mod workflow;
pub use workflow::{WorkflowFile, WorkflowVariant, WORKFLOWS_DIRECTORY};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Drives one rollout across the user's organizations and personal repositories.
///
/// The confirmation gate lives here rather than in a single publish call, so an
/// operator who opts into unattended mode while the first organization is processed
/// is not asked again for later organizations or for their own repositories.
pub struct Rollout<'a> {
    client: &'a dyn RepositoryClient,
    workflow: &'a WorkflowFile,
    gate: ConfirmationGate,
}

impl<'a> Rollout<'a> {
    pub fn new(client: &'a dyn RepositoryClient, workflow: &'a WorkflowFile) -> Self {
        Self {
            client,
            workflow,
            gate: ConfirmationGate::default(),
        }
    }

    /// Current state of the operator confirmation.
    pub fn gate(&self) -> ConfirmationGate {
        self.gate
    }

    /// Runs the rollout and returns one report per repository visited.
    ///
    /// Organization and user listings are processed independently and are not
    /// deduplicated, so a repository that appears in both is visited twice.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be sent or the operator's answer cannot be
    /// read. Rejected requests are logged and do not end the run.
    #[instrument(skip(self, ask), fields(workflow = %self.workflow.path(), branch = %self.workflow.branch()))]
    pub async fn run(&mut self, ask: AskOperator<'_>) -> Result<Vec<PublishReport>, Error> {
        match self.client.fetch_authenticated_user().await? {
            Some(user) => info!(login = user.login, "Running as authenticated user"),
            None => warn!("Could not determine the authenticated user"),
        }

        let mut reports = Vec::new();

        let organizations = self.client.fetch_organizations().await?;
        for organization in &organizations {
            let scope = RepositoryScope::Organization(organization.login.clone());
            reports.extend(self.publish_scope(&scope, ask).await?);
        }

        reports.extend(
            self.publish_scope(&RepositoryScope::AuthenticatedUser, ask)
                .await?,
        );

        Ok(reports)
    }

    async fn publish_scope(
        &mut self,
        scope: &RepositoryScope,
        ask: AskOperator<'_>,
    ) -> Result<Vec<PublishReport>, Error> {
        let repositories = self.client.fetch_repositories(scope).await?;
        if repositories.is_empty() {
            info!(scope = %scope, "No repositories to process");
            return Ok(Vec::new());
        }

        info!(
            scope = %scope,
            count = repositories.len(),
            private = repositories.iter().filter(|r| r.is_private()).count(),
            "Publishing workflow"
        );

        publish_workflow(
            self.client,
            self.workflow,
            &repositories,
            &mut self.gate,
            ask,
        )
        .await
    }
}
