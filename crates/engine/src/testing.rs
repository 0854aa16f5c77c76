//! In-memory prompt API double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use genum_api::{ApiError, PromptApi};
use genum_types::RunRequestBody;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List { token: String },
    Run { token: String, body: RunRequestBody },
}

/// Replays scripted responses in call order and records every call.
/// Once the script runs out, calls answer with `null`.
#[derive(Default)]
pub struct FakePromptApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakePromptApi {
    pub fn with_responses(responses: Vec<Result<Value, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| match call {
                ApiCall::List { token } | ApiCall::Run { token, .. } => token,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) -> Result<Value, ApiError> {
        self.calls.lock().expect("calls lock").push(call);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl PromptApi for FakePromptApi {
    async fn list_prompts(&self, token: &str) -> Result<Value, ApiError> {
        self.record(ApiCall::List { token: token.to_string() })
    }

    async fn run_prompt(&self, token: &str, body: &RunRequestBody) -> Result<Value, ApiError> {
        self.record(ApiCall::Run {
            token: token.to_string(),
            body: body.clone(),
        })
    }
}

/// A rejected response as the HTTP client would report it.
pub fn status_error(status: u16, body: &str) -> ApiError {
    ApiError::Status {
        status,
        body: body.to_string(),
    }
}
