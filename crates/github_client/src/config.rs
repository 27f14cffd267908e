//! API host configuration.
//!
//! The base URL is resolved once at start-up and handed to [`crate::create_token_client`].
//! Every request the client makes is routed to this host.

use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Host name of the public GitHub REST API.
pub const DEFAULT_API_HOST: &str = "api.github.com";

/// Location of the GitHub REST API the client talks to.
///
/// Accepts either a bare host (optionally with a path prefix, as used by GitHub
/// Enterprise Server) or a full `http`/`https` URL.
///
/// # Examples
///
/// ```rust
/// use github_client::ApiConfig;
///
/// let public = ApiConfig::default();
/// assert_eq!(public.base_uri(), "https://api.github.com");
///
/// let enterprise = ApiConfig::new("github.example.com/api/v3").unwrap();
/// assert_eq!(enterprise.base_uri(), "https://github.example.com/api/v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_uri: String,
}

impl ApiConfig {
    /// Builds a configuration from a host name or URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if the value is empty, cannot be parsed,
    /// or uses a scheme other than `http` or `https`.
    pub fn new(host: &str) -> Result<Self, Error> {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidBaseUrl("the API host is empty".to_string()));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&candidate)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", trimmed, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::InvalidBaseUrl(format!(
                    "{}: unsupported scheme '{}'",
                    trimmed, other
                )))
            }
        }

        if url.host_str().is_none() {
            return Err(Error::InvalidBaseUrl(format!("{}: missing host", trimmed)));
        }

        Ok(Self {
            base_uri: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// The base URL without a trailing slash, e.g. `https://api.github.com`.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns `true` when the configuration points at the public GitHub API.
    pub fn is_default_host(&self) -> bool {
        self.base_uri == format!("https://{}", DEFAULT_API_HOST)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_uri: format!("https://{}", DEFAULT_API_HOST),
        }
    }
}
