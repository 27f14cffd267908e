//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making token-authenticated requests to GitHub:
//! discovering the organizations and repositories visible to the token, and reading
//! or writing single files through the Contents API.
//!
//! Every request is routed to the host held by the [`ApiConfig`] the client was built
//! with. Non-success statuses are logged and turned into empty results so callers can
//! carry on with partial data; only transport failures surface as [`Error`].

use async_trait::async_trait;
use http::StatusCode;
use octocrab::{service::middleware::retry::RetryConfig, Octocrab};
use tracing::{debug, error, info, instrument, warn};

pub mod config;
pub use config::{ApiConfig, DEFAULT_API_HOST};

pub mod contents;
pub use contents::{FileRevision, FileWriteOutcome, FileWritePayload};

pub mod errors;
pub use errors::Error;

pub mod repository;
pub use repository::{Organization, Owner, Repository, RepositoryScope, REPOSITORY_PAGE_SIZE};

pub mod user;
pub use user::User;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Operations the workflow publisher needs from GitHub.
///
/// Implemented by [`GitHubClient`]; the trait exists so the publishing logic can be
/// driven by other implementations in tests.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches the user that owns the access token.
    ///
    /// Returns `Ok(None)` when GitHub answers with anything other than 200.
    ///
    /// # Errors
    /// Returns `Error::RequestFailed` if no response could be obtained, or
    /// `Error::Deserialization` if the 200 body is not a user record.
    async fn fetch_authenticated_user(&self) -> Result<Option<User>, Error>;

    /// Fetches the organizations the authenticated user belongs to.
    ///
    /// Returns an empty list when GitHub answers with anything other than 200.
    async fn fetch_organizations(&self) -> Result<Vec<Organization>, Error>;

    /// Pages through every repository in the given scope.
    ///
    /// Pages of [`REPOSITORY_PAGE_SIZE`] items are requested until one comes back
    /// short. A non-200 page ends the listing; repositories from earlier pages are
    /// still returned.
    async fn fetch_repositories(&self, scope: &RepositoryScope) -> Result<Vec<Repository>, Error>;

    /// Looks up the blob SHA of a file, optionally on a specific branch.
    ///
    /// Returns `Ok(None)` if the file does not exist or the lookup is refused.
    async fn fetch_file_revision(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Option<String>, Error>;

    /// Creates or overwrites a file through the Contents API.
    ///
    /// The response status is returned unchanged so the caller can tell a create
    /// (201) from a conflict (422) or any other failure.
    async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        payload: &FileWritePayload,
    ) -> Result<FileWriteOutcome, Error>;
}

/// A client for interacting with the GitHub API, authenticated with a personal token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Wraps an already configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build one that targets a given [`ApiConfig`].
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Issues a `GET` and returns the status together with the raw body.
    async fn get_raw(&self, uri: &str, action: &str) -> Result<(StatusCode, String), Error> {
        debug!(uri = uri, "Sending GET request");

        let response = self.client._get(uri).await.map_err(|e| {
            log_octocrab_error(action, e);
            Error::RequestFailed(action.to_string())
        })?;

        let status = response.status();
        let body = self.client.body_to_string(response).await.map_err(|e| {
            log_octocrab_error(action, e);
            Error::RequestFailed(action.to_string())
        })?;

        Ok((status, body))
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self))]
    async fn fetch_authenticated_user(&self) -> Result<Option<User>, Error> {
        let (status, body) = self
            .get_raw("/user", "Failed to get user information")
            .await?;

        if status != StatusCode::OK {
            error!(
                status = status.as_u16(),
                "Error getting user information"
            );
            return Ok(None);
        }

        let user: User = serde_json::from_str(&body)?;
        info!(login = user.login, "Retrieved authenticated user");
        Ok(Some(user))
    }

    #[instrument(skip(self))]
    async fn fetch_organizations(&self) -> Result<Vec<Organization>, Error> {
        let (status, body) = self
            .get_raw("/user/orgs", "Failed to list organizations")
            .await?;

        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Error listing organizations");
            return Ok(Vec::new());
        }

        let organizations: Vec<Organization> = serde_json::from_str(&body)?;
        info!(
            count = organizations.len(),
            "Retrieved organizations for authenticated user"
        );
        Ok(organizations)
    }

    #[instrument(skip(self), fields(scope = %scope))]
    async fn fetch_repositories(&self, scope: &RepositoryScope) -> Result<Vec<Repository>, Error> {
        let mut repositories = Vec::new();
        let mut page: u32 = 1;

        loop {
            let uri = scope.page_path(page);
            let (status, body) = self
                .get_raw(&uri, "Failed to list repositories")
                .await?;

            if status != StatusCode::OK {
                error!(
                    page = page,
                    status = status.as_u16(),
                    "Error listing repositories, stopping pagination"
                );
                break;
            }

            let batch: Vec<Repository> = serde_json::from_str(&body)?;
            let batch_len = batch.len();
            repositories.extend(batch);

            debug!(page = page, count = batch_len, "Retrieved repository page");

            if batch_len < REPOSITORY_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        info!(
            count = repositories.len(),
            pages = page,
            "Finished listing repositories"
        );
        Ok(repositories)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn fetch_file_revision(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Option<String>, Error> {
        let mut uri = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        if let Some(branch) = branch {
            uri.push_str(&format!("?ref={}", branch));
        }

        let (status, body) = self
            .get_raw(&uri, "Failed to get file revision")
            .await?;

        if status != StatusCode::OK {
            warn!(
                status = status.as_u16(),
                "Could not read the current revision of the file"
            );
            return Ok(None);
        }

        let revision: FileRevision = serde_json::from_str(&body)?;
        debug!(sha = revision.sha, "Retrieved file revision");
        Ok(Some(revision.sha))
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, path = %path, branch = %payload.branch))]
    async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        payload: &FileWritePayload,
    ) -> Result<FileWriteOutcome, Error> {
        let uri = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        let action = "Failed to write file";

        let response = self
            .client
            ._put(uri.as_str(), Some(payload))
            .await
            .map_err(|e| {
                log_octocrab_error(action, e);
                Error::RequestFailed(action.to_string())
            })?;

        let status = response.status();
        let body = self.client.body_to_string(response).await.map_err(|e| {
            log_octocrab_error(action, e);
            Error::RequestFailed(action.to_string())
        })?;

        debug!(
            status = status.as_u16(),
            has_sha = payload.sha.is_some(),
            "File write completed"
        );

        Ok(FileWriteOutcome {
            status: status.as_u16(),
            body,
        })
    }
}

/// Creates an `Octocrab` client that sends `token` as a bearer token to the host
/// described by `config`.
///
/// Octocrab's automatic retry of 5xx and 429 responses is turned off; a rejected
/// request is reported once and the caller moves on.
///
/// # Errors
///
/// Returns `Error::InvalidBaseUrl` if octocrab rejects the base URI, or
/// `Error::AuthError` if the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, ApiConfig, GitHubClient};
///
/// # fn example() -> Result<(), github_client::Error> {
/// let config = ApiConfig::new("github.example.com/api/v3")?;
/// let octocrab = create_token_client(&config, "ghp_example")?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token), fields(base_uri = %config.base_uri()))]
pub fn create_token_client(config: &ApiConfig, token: &str) -> Result<Octocrab, Error> {
    let octocrab = Octocrab::builder()
        .base_uri(config.base_uri())
        .map_err(|e| {
            error!(error = %e, "Octocrab rejected the API base URI");
            Error::InvalidBaseUrl(config.base_uri().to_string())
        })?
        .personal_token(token.to_string())
        .add_retry_config(RetryConfig::None)
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with the access token");
            Error::AuthError("Failed to build a client for the access token.".to_string())
        })?;

    debug!("Created token-authenticated GitHub client");
    Ok(octocrab)
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            status = source.status_code.as_u16(),
            error_message = source.message,
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to build URI.",
            message
        ),
        _ => error!(error_message = e.to_string(), "{}", message),
    };
}
