//! Secret resolution against the OS keychain or the process environment.

use thiserror::Error;
use tracing::debug;

static SERVICE: &str = "genum";
/// Environment variable used to select the secret resolution backend.
pub const SECRETS_BACKEND_ENV_VAR: &str = "GENUM_SECRETS_BACKEND";
/// Secret name holding the prompt API bearer token.
pub const API_TOKEN_SECRET: &str = "GENUM_API_TOKEN";

/// Secret resolution backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsBackend {
    /// Resolve secrets via the OS keychain (`keyring-rs`).
    Keychain,
    /// Resolve secret `NAME` from process environment variable `NAME`.
    Environment,
}

impl SecretsBackend {
    fn from_env_var(raw: Option<String>) -> Self {
        match raw.unwrap_or_default().trim().to_ascii_lowercase().as_str() {
            "env" => Self::Environment,
            _ => Self::Keychain,
        }
    }
}

/// Determine the currently configured secrets backend.
pub fn secrets_backend() -> SecretsBackend {
    let configured_value = std::env::var(SECRETS_BACKEND_ENV_VAR).ok();
    SecretsBackend::from_env_var(configured_value)
}

/// Resolve a secret using the configured secrets backend.
pub fn resolve_secret(name: &str) -> Result<String, SecretError> {
    let value = match secrets_backend() {
        SecretsBackend::Environment => std::env::var(name).map_err(|error| SecretError::MissingSecret {
            name: name.to_string(),
            error: error.to_string(),
        })?,
        SecretsBackend::Keychain => keychain_entry(name)?.get_password().map_err(|e| SecretError::MissingSecret {
            name: name.to_string(),
            error: e.to_string(),
        })?,
    };
    debug!(secret = %name, "resolved secret -> [REDACTED]");
    Ok(value)
}

/// Store a secret in the OS keychain.
pub fn store_secret(name: &str, value: &str) -> Result<(), SecretError> {
    keychain_entry(name)?.set_password(value).map_err(|e| SecretError::KeyringError {
        name: name.to_string(),
        error: e.to_string(),
    })?;

    debug!("Stored secret in keychain: {}", name);
    Ok(())
}

/// Remove a secret from the OS keychain.
pub fn remove_secret(name: &str) -> Result<(), SecretError> {
    keychain_entry(name)?.delete_credential().map_err(|e| SecretError::KeyringError {
        name: name.to_string(),
        error: e.to_string(),
    })?;

    debug!("Removed secret from keychain: {}", name);
    Ok(())
}

fn keychain_entry(name: &str) -> Result<keyring::Entry, SecretError> {
    keyring::Entry::new(SERVICE, name).map_err(|e| SecretError::KeyringError {
        name: name.to_string(),
        error: e.to_string(),
    })
}

/// Errors that can occur while resolving or storing secrets.
#[derive(Debug, Error, Clone)]
pub enum SecretError {
    #[error("Missing secret: {name} - {error}")]
    MissingSecret { name: String, error: String },

    #[error("Keyring error for {name}: {error}")]
    KeyringError { name: String, error: String },
}
