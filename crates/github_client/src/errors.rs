//! Error types for GitHub client operations.
//!
//! Non-success HTTP statuses are not errors in this crate: the client logs them and
//! hands back an empty or sentinel value. The variants below cover the failures that
//! cannot be recovered from locally, such as a broken transport or a bad base URL.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.fetch_organizations().await {
///     Ok(orgs) => println!("Found {} organizations", orgs.len()),
///     Err(Error::RequestFailed(msg)) => eprintln!("Could not reach GitHub: {}", msg),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or GitHub client initialization failure.
    ///
    /// The contained string describes why the octocrab client could not be built
    /// from the supplied token.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// Raised when a successful response carries a body that does not match the
    /// expected shape.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The configured API host could not be turned into a usable base URL.
    #[error("Invalid GitHub API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced an HTTP response.
    ///
    /// This covers DNS failures, refused connections, TLS problems and bodies that
    /// could not be read. The contained string names the operation that failed.
    #[error("Request to GitHub failed: {0}")]
    RequestFailed(String),
}
