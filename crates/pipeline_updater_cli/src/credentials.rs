//! Access token lookup.
//!
//! The token is read from the `GITHUB_TOKEN` environment variable first. When that is
//! unset or blank, the system keyring is consulted, so the token can be kept out of
//! shell history and CI logs. Store it once with any keyring tool under the service
//! `pipeline_updater` and the user `github_token`.

use keyring::Entry;
use tracing::{debug, info, instrument};

use crate::errors::Error;

pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
pub const KEY_RING_SERVICE_NAME: &str = "pipeline_updater";
pub const KEY_RING_USER_TOKEN: &str = "github_token";

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

/// Finds the access token to send as the bearer token.
///
/// # Errors
///
/// Returns `Error::Auth` if neither the environment nor the keyring holds a token.
#[instrument]
pub fn resolve_token() -> Result<String, Error> {
    token_from_sources(std::env::var(TOKEN_ENV_VAR).ok(), read_keyring_token)
}

fn token_from_sources(
    env_token: Option<String>,
    keyring_token: impl FnOnce() -> Option<String>,
) -> Result<String, Error> {
    if let Some(token) = non_blank(env_token) {
        info!("Using access token from {}", TOKEN_ENV_VAR);
        return Ok(token);
    }

    if let Some(token) = non_blank(keyring_token()) {
        info!("Using access token from the system keyring");
        return Ok(token);
    }

    Err(Error::Auth(format!(
        "No GitHub access token found. Set {} or store a token in the keyring (service '{}', user '{}').",
        TOKEN_ENV_VAR, KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN
    )))
}

fn non_blank(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn read_keyring_token() -> Option<String> {
    let entry = match Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN) {
        Ok(entry) => entry,
        Err(e) => {
            debug!(error = ?e, "Keyring is not available");
            return None;
        }
    };

    match entry.get_password() {
        Ok(token) => Some(token),
        Err(e) => {
            debug!(error = ?e, "No access token stored in the keyring");
            None
        }
    }
}
