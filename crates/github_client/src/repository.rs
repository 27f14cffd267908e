//! Repository domain types.
//!
//! This module contains the repository, owner and organization records returned by
//! the listing endpoints, plus [`RepositoryScope`] which selects the endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Number of items requested per page when listing repositories.
pub const REPOSITORY_PAGE_SIZE: usize = 100;

/// Represents a GitHub organization the authenticated user belongs to.
///
/// # Examples
///
/// ```rust
/// use github_client::Organization;
///
/// let org = Organization {
///     login: "my-organization".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// The login name of the organization
    pub login: String,
}

/// The account that owns a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The login name of the owning user or organization
    pub login: String,
}

/// Represents a GitHub repository as returned by the listing endpoints.
///
/// Only the fields needed to decide whether and where to write are kept; the rest
/// of the API payload is ignored during deserialization.
///
/// # Examples
///
/// ```rust
/// use github_client::Repository;
///
/// let repo = Repository::new("my-repo", "my-org", true, Some("main"));
///
/// assert_eq!(repo.full_name(), "my-org/my-repo");
/// assert!(repo.is_private());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// The name of the repository (without owner)
    name: String,
    /// The owning account
    owner: Owner,
    /// Whether the repository is private
    #[serde(default)]
    private: bool,
    /// The repository's default branch, if reported
    #[serde(default)]
    default_branch: Option<String>,
}

impl Repository {
    /// Creates a new Repository instance.
    pub fn new(name: &str, owner: &str, private: bool, default_branch: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            owner: Owner {
                login: owner.to_string(),
            },
            private,
            default_branch: default_branch.map(str::to_string),
        }
    }

    /// Returns the name of the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the login of the owning user or organization.
    pub fn owner(&self) -> &str {
        &self.owner.login
    }

    /// Returns `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }

    /// Returns whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns the default branch reported by GitHub, if any.
    pub fn default_branch(&self) -> Option<&str> {
        self.default_branch.as_deref()
    }
}

/// Selects which repository listing to page through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryScope {
    /// Repositories of the user that owns the access token (`/user/repos`).
    AuthenticatedUser,

    /// Repositories of a named organization (`/orgs/{org}/repos`).
    Organization(String),
}

impl RepositoryScope {
    /// The API path for this listing, without query parameters.
    pub fn listing_path(&self) -> String {
        match self {
            RepositoryScope::AuthenticatedUser => "/user/repos".to_string(),
            RepositoryScope::Organization(org) => format!("/orgs/{}/repos", org),
        }
    }

    /// The API path for one page of this listing.
    pub fn page_path(&self, page: u32) -> String {
        format!(
            "{}?page={}&per_page={}",
            self.listing_path(),
            page,
            REPOSITORY_PAGE_SIZE
        )
    }
}

impl fmt::Display for RepositoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryScope::AuthenticatedUser => write!(f, "authenticated user"),
            RepositoryScope::Organization(org) => write!(f, "organization {}", org),
        }
    }
}
