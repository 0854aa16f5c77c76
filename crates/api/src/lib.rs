//! Genum prompt API client.
//!
//! This crate provides a lightweight client for the Genum prompt API.
//! It focuses on:
//!
//! - Constructing an HTTP client with JSON headers and a consistent User-Agent
//! - Resolving and validating the API base URL (`GENUM_API_BASE`)
//! - Issuing the two supported prompt operations through [`PromptApi`]
//!
//! The bearer token is passed per call and never stored on the client, so one
//! client can serve items authenticated with different credentials.
//!
//! # Example
//!
//! ```ignore
//! use genum_api::{GenumClient, PromptApi};
//!
//! async fn list(token: &str) -> Result<serde_json::Value, genum_api::ApiError> {
//!     let client = GenumClient::from_env()?;
//!     client.list_prompts(token).await
//! }
//! ```

mod error;
mod prompts;

use std::env;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url, header};
use tracing::debug;

pub use error::ApiError;
pub use prompts::{PROMPTS_PATH, PromptApi, RUN_PROMPT_PATH};

/// Public Genum API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.genum.ai";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV_VAR: &str = "GENUM_API_BASE";

/// Allowed base domains for non-local configurations of `GENUM_API_BASE`.
/// Subdomains of these domains are also allowed.
const ALLOWED_GENUM_DOMAINS: &[&str] = &["genum.ai"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around a configured `reqwest::Client` for prompt API access.
#[derive(Debug, Clone)]
pub struct GenumClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl GenumClient {
    /// Build a client for an explicit base URL.
    ///
    /// Non-localhost hosts must use HTTPS and be within an allowed Genum domain.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        default_headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("genum-cli/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a client from `GENUM_API_BASE`, falling back to the public endpoint.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated request for an API-relative path.
    pub fn request(&self, method: reqwest::Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, %method, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
            .bearer_auth(token)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be one of the allowed
///   Genum domains or a subdomain thereof
fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let parsed_base_url = Url::parse(base).map_err(|e| ApiError::invalid_base_url(base, e.to_string()))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| ApiError::invalid_base_url(base, "must include a host"))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_base_url.scheme() != "https" {
        return Err(ApiError::invalid_base_url(
            base,
            format!("must use https for non-localhost hosts; got '{}://'", parsed_base_url.scheme()),
        ));
    }

    let is_allowed_domain = ALLOWED_GENUM_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{}", allowed_domain))
    });
    if !is_allowed_domain {
        return Err(ApiError::invalid_base_url(
            base,
            format!("host '{}' is not one of {:?} or a subdomain, or localhost", host_name, ALLOWED_GENUM_DOMAINS),
        ));
    }

    Ok(())
}
