//! Credential lookup for the prompt API.

use async_trait::async_trait;
use genum_types::{CREDENTIAL_NAME, Credential};
use genum_util::keystore::{API_TOKEN_SECRET, SecretError, resolve_secret};
use thiserror::Error;
use tracing::debug;

/// Supplies the bearer token for a named credential.
///
/// Lookups happen once per item and are never cached by the engine.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self, name: &str) -> Result<Credential, CredentialError>;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Unknown credential '{name}'")]
    Unknown { name: String },

    #[error("Credential '{name}' has an empty API token")]
    EmptyToken { name: String },

    #[error(transparent)]
    Secret(#[from] SecretError),
}

/// Credential held in memory, e.g. from a `--token` flag or a test.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(api_token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self, name: &str) -> Result<Credential, CredentialError> {
        check_name(name)?;
        check_token(name, self.credential.clone())
    }
}

/// Credential resolved from the configured secrets backend
/// (`GENUM_SECRETS_BACKEND`): the OS keychain by default, or the
/// `GENUM_API_TOKEN` environment variable.
#[derive(Debug, Clone, Default)]
pub struct KeystoreCredentials;

#[async_trait]
impl CredentialProvider for KeystoreCredentials {
    async fn credentials(&self, name: &str) -> Result<Credential, CredentialError> {
        check_name(name)?;
        let token = resolve_secret(API_TOKEN_SECRET)?;
        debug!(credential = %name, "credential resolved from keystore");
        check_token(name, Credential::new(token))
    }
}

fn check_name(name: &str) -> Result<(), CredentialError> {
    if name != CREDENTIAL_NAME {
        return Err(CredentialError::Unknown { name: name.to_string() });
    }
    Ok(())
}

fn check_token(name: &str, credential: Credential) -> Result<Credential, CredentialError> {
    if credential.api_token.trim().is_empty() {
        return Err(CredentialError::EmptyToken { name: name.to_string() });
    }
    Ok(credential)
}
