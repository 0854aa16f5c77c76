use std::sync::Arc;

use genum_api::PromptApi;
use genum_types::{CREDENTIAL_NAME, ListOption, ListSearchResult, PromptRecord};
use tracing::debug;

use super::normalize::normalize_response;
use crate::credentials::CredentialProvider;
use crate::error::ExecutionError;

/// Load every prompt as a name/value option (static option loading).
pub async fn load_prompt_options(api: &dyn PromptApi, credentials: &dyn CredentialProvider) -> Result<Vec<ListOption>, ExecutionError> {
    fetch_options(api, credentials, None).await
}

/// Load prompts for the searchable list, keeping only those matching `filter`.
pub async fn search_prompt_options(
    api: &dyn PromptApi,
    credentials: &dyn CredentialProvider,
    filter: Option<&str>,
) -> Result<ListSearchResult, ExecutionError> {
    let results = fetch_options(api, credentials, filter).await?;
    Ok(ListSearchResult { results })
}

async fn fetch_options(
    api: &dyn PromptApi,
    credentials: &dyn CredentialProvider,
    filter: Option<&str>,
) -> Result<Vec<ListOption>, ExecutionError> {
    let credential = credentials.credentials(CREDENTIAL_NAME).await?;
    let raw = api.list_prompts(&credential.api_token).await?;
    let options: Vec<ListOption> = normalize_response(&raw, filter).iter().map(PromptRecord::to_option).collect();
    debug!(filter = ?filter, option_count = options.len(), "prompt options loaded");
    Ok(options)
}

/// Owned pairing of an API client and credential source for option loading.
#[derive(Clone)]
pub struct PromptOptionsProvider {
    api: Arc<dyn PromptApi>,
    credentials: Arc<dyn CredentialProvider>,
}

impl PromptOptionsProvider {
    pub fn new(api: Arc<dyn PromptApi>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { api, credentials }
    }

    pub async fn options(&self) -> Result<Vec<ListOption>, ExecutionError> {
        load_prompt_options(self.api.as_ref(), self.credentials.as_ref()).await
    }

    pub async fn search(&self, filter: Option<&str>) -> Result<ListSearchResult, ExecutionError> {
        search_prompt_options(self.api.as_ref(), self.credentials.as_ref(), filter).await
    }
}
