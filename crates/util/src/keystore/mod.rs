//! Secret storage for API tokens.

mod secrets;

pub use secrets::{
    API_TOKEN_SECRET, SECRETS_BACKEND_ENV_VAR, SecretError, SecretsBackend, remove_secret, resolve_secret, secrets_backend, store_secret,
};
