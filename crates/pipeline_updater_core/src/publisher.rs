//! Writes the workflow file into a batch of repositories.
//!
//! Writes follow GitHub's create-then-update pattern: a plain create is attempted first,
//! and a 422 answer (the file already exists) triggers a revision lookup followed by a
//! single overwrite carrying that revision. Failures are logged per repository and never
//! stop the batch.

use github_client::{Repository, RepositoryClient};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    confirmation::{AskOperator, ConfirmationGate},
    workflow::WorkflowFile,
    Error,
};

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;

/// What happened to a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The repository is public and was left alone.
    SkippedPublic,

    /// The workflow file did not exist and was created.
    Created,

    /// The workflow file existed and was overwritten.
    Updated,

    /// The file existed but the overwrite was rejected with the given status.
    UpdateFailed { status: u16 },

    /// The create attempt was rejected with a status other than 422.
    Failed { status: u16 },
}

/// Outcome for one repository, keyed by its `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub repository: String,
    pub outcome: PublishOutcome,
}

/// Makes sure every private repository in `repositories` carries `workflow`.
///
/// Public repositories are skipped without any request. Before each write the
/// confirmation `gate` is consulted, and `ask` is called while it is still pending.
///
/// # Errors
///
/// Returns an error only when a request cannot be sent at all, or when reading the
/// operator's answer fails. HTTP failures are logged and recorded in the report.
pub async fn publish_workflow(
    client: &dyn RepositoryClient,
    workflow: &WorkflowFile,
    repositories: &[Repository],
    gate: &mut ConfirmationGate,
    ask: AskOperator<'_>,
) -> Result<Vec<PublishReport>, Error> {
    let mut reports = Vec::with_capacity(repositories.len());

    for repository in repositories {
        let outcome = if repository.is_private() {
            gate.confirm_before_write(repository.name(), ask)?;
            publish_to_repository(client, workflow, repository).await?
        } else {
            debug!(repo = %repository.full_name(), "Skipping public repository");
            PublishOutcome::SkippedPublic
        };

        reports.push(PublishReport {
            repository: repository.full_name(),
            outcome,
        });
    }

    Ok(reports)
}

#[instrument(skip(client, workflow, repository), fields(owner = %repository.owner(), repo = %repository.name()))]
async fn publish_to_repository(
    client: &dyn RepositoryClient,
    workflow: &WorkflowFile,
    repository: &Repository,
) -> Result<PublishOutcome, Error> {
    let owner = repository.owner();
    let name = repository.name();

    let created = client
        .create_or_update_file(owner, name, workflow.path(), &workflow.create_payload())
        .await?;

    if created.is_created() {
        info!("File created in {} repository", name);
        return Ok(PublishOutcome::Created);
    }

    if !created.is_conflict() {
        error!(
            status = created.status,
            response = created.body,
            "Failed to create file in {} repository",
            name
        );
        return Ok(PublishOutcome::Failed {
            status: created.status,
        });
    }

    info!(
        "{} is already created in {}, updating...",
        workflow.file_name(),
        name
    );

    let sha = client
        .fetch_file_revision(owner, name, workflow.path(), Some(workflow.branch()))
        .await?;
    if sha.is_none() {
        warn!("Current revision of {} is unknown, sending the update without it", workflow.file_name());
    }

    let updated = client
        .create_or_update_file(owner, name, workflow.path(), &workflow.update_payload(sha))
        .await?;

    if updated.is_success() {
        info!("File updated successfully in {} repository", name);
        Ok(PublishOutcome::Updated)
    } else {
        error!(
            status = updated.status,
            response = updated.body,
            "Error updating file in {} repository",
            name
        );
        Ok(PublishOutcome::UpdateFailed {
            status: updated.status,
        })
    }
}
