//! Repository contents types.
//!
//! GitHub's Contents API is used as an upsert: a `PUT` without a revision hash
//! creates the file, and a `PUT` carrying the current blob `sha` overwrites it.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// HTTP status returned when a file was created.
pub const STATUS_CREATED: u16 = 201;

/// HTTP status returned when an existing file was updated.
pub const STATUS_OK: u16 = 200;

/// HTTP status returned when a create collides with an existing file.
pub const STATUS_UNPROCESSABLE_ENTITY: u16 = 422;

/// The part of a Contents API file response needed to authorize an overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRevision {
    /// Git blob SHA of the file's current content
    pub sha: String,
}

/// Request body for `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// # Examples
///
/// ```rust
/// use github_client::FileWritePayload;
///
/// let create = FileWritePayload::new("Add new file: build.yml", "bmFtZTogY2k=", "master");
/// let update = create.clone().with_sha(Some("3d21ec53a331a6f037a91c368710b99387d012c1".to_string()));
///
/// assert!(create.sha.is_none());
/// assert!(update.sha.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWritePayload {
    /// Commit message
    pub message: String,

    /// Base64 encoded file content
    pub content: String,

    /// Branch the commit is made on
    pub branch: String,

    /// Blob SHA of the file being replaced; required by GitHub for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl FileWritePayload {
    pub fn new(message: &str, content: &str, branch: &str) -> Self {
        Self {
            message: message.to_string(),
            content: content.to_string(),
            branch: branch.to_string(),
            sha: None,
        }
    }

    /// Attaches the revision hash of the file being overwritten.
    pub fn with_sha(mut self, sha: Option<String>) -> Self {
        self.sha = sha;
        self
    }
}

/// Raw result of a write attempt.
///
/// The status decides which path the caller takes next, so it is returned as-is
/// rather than folded into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWriteOutcome {
    /// HTTP status code of the response
    pub status: u16,

    /// Response body, kept for failure logging
    pub body: String,
}

impl FileWriteOutcome {
    /// The file did not exist and has been created.
    pub fn is_created(&self) -> bool {
        self.status == STATUS_CREATED
    }

    /// The file already exists; an update carrying its revision hash is needed.
    pub fn is_conflict(&self) -> bool {
        self.status == STATUS_UNPROCESSABLE_ENTITY
    }

    /// The write landed, either as an update (200) or a create (201).
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_CREATED
    }
}
