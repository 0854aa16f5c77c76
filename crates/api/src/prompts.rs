//! Prompt operations exposed by the remote API.

use std::time::Instant;

use async_trait::async_trait;
use genum_types::RunRequestBody;
use genum_util::redact_sensitive;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ApiError, GenumClient};

pub const PROMPTS_PATH: &str = "/api/v1/prompts";
pub const RUN_PROMPT_PATH: &str = "/api/v1/prompts/run";

/// The two prompt operations the engine depends on.
///
/// Implementations return the decoded response body unmodified and surface
/// every transport or HTTP failure to the caller without retrying.
#[async_trait]
pub trait PromptApi: Send + Sync {
    /// `GET /api/v1/prompts`.
    async fn list_prompts(&self, token: &str) -> Result<Value, ApiError>;

    /// `POST /api/v1/prompts/run` with a JSON body.
    async fn run_prompt(&self, token: &str, body: &RunRequestBody) -> Result<Value, ApiError>;
}

#[async_trait]
impl PromptApi for GenumClient {
    async fn list_prompts(&self, token: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, PROMPTS_PATH, token);
        send_json(request, &Method::GET, PROMPTS_PATH).await
    }

    async fn run_prompt(&self, token: &str, body: &RunRequestBody) -> Result<Value, ApiError> {
        debug!(
            prompt_id = body.id,
            productive = body.productive,
            has_memory_key = body.memory_key.is_some(),
            "run request body prepared"
        );
        let request = self.request(Method::POST, RUN_PROMPT_PATH, token).json(body);
        send_json(request, &Method::POST, RUN_PROMPT_PATH).await
    }
}

impl GenumClient {
    /// Check a token the same way the credential test does: list prompts and
    /// discard the payload.
    pub async fn verify_credentials(&self, token: &str) -> Result<(), ApiError> {
        self.list_prompts(token).await.map(|_| ())
    }
}

async fn send_json(request: RequestBuilder, method: &Method, path: &str) -> Result<Value, ApiError> {
    let start = Instant::now();
    debug!(%method, %path, "http request started");

    let response = request.send().await.map_err(|error| {
        warn!(
            %method,
            %path,
            error = %redact_sensitive(&error.to_string()),
            duration_ms = start.elapsed().as_millis(),
            "http request failed"
        );
        ApiError::Transport(error)
    })?;

    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        warn!(
            %method,
            %path,
            %status,
            duration_ms = start.elapsed().as_millis(),
            "http request rejected"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body_text,
        });
    }

    debug!(
        %method,
        %path,
        %status,
        response_bytes = body_text.len(),
        duration_ms = start.elapsed().as_millis(),
        "http request completed"
    );
    Ok(parse_response_body(&body_text))
}

/// Decode a success body: empty is `null`, invalid JSON is kept as a string.
fn parse_response_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GenumClient {
        GenumClient::new(server.uri()).expect("client for mock server")
    }

    #[tokio::test]
    async fn list_prompts_sends_json_headers_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROMPTS_PATH))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prompts": [{"id": 1, "name": "A"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).await.list_prompts("tok-1").await.unwrap();
        assert_eq!(body, json!({"prompts": [{"id": 1, "name": "A"}]}));
    }

    #[tokio::test]
    async fn run_prompt_posts_body_without_empty_memory_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PROMPT_PATH))
            .and(header("authorization", "Bearer tok-2"))
            .and(body_json(json!({"id": 150, "question": "Hi", "productive": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Hello"})))
            .expect(1)
            .mount(&server)
            .await;

        let request_body = RunRequestBody::new(150, "Hi", true, "");
        let body = client_for(&server).await.run_prompt("tok-2", &request_body).await.unwrap();
        assert_eq!(body, json!({"answer": "Hello"}));
    }

    #[tokio::test]
    async fn non_success_status_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROMPTS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let error = client_for(&server).await.list_prompts("bad").await.unwrap_err();
        assert_eq!(error.status_code(), Some(401));
        assert_eq!(error.response_body(), Some("invalid token"));
        assert!(error.is_unauthorized());
    }

    #[tokio::test]
    async fn verify_credentials_uses_list_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PROMPTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).await.verify_credentials("tok").await.unwrap();
    }

    #[test]
    fn decodes_empty_and_non_json_bodies() {
        assert_eq!(parse_response_body(""), Value::Null);
        assert_eq!(parse_response_body("  \n"), Value::Null);
        assert_eq!(parse_response_body("plain text"), json!("plain text"));
        assert_eq!(parse_response_body("[1,2]"), json!([1, 2]));
    }
}
