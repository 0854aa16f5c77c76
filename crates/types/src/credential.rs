use std::fmt;

use serde::{Deserialize, Serialize};

/// Name under which the host stores the prompt API credential.
pub const CREDENTIAL_NAME: &str = "genumApi";

/// Bearer token material for the remote prompt API.
///
/// The token is read once per request and never persisted by the engine.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "apiToken")]
    pub api_token: String,
}

impl Credential {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("api_token", &"<redacted>").finish()
    }
}
