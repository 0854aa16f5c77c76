use thiserror::Error;

/// Errors raised while talking to the prompt API.
///
/// Nothing here is retried or reinterpreted; callers receive the transport
/// failure or the rejected response as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid GENUM_API_BASE URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl ApiError {
    pub(crate) fn invalid_base_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status code when the API answered with a non-success response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Raw body of a rejected response.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Whether the API rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}
