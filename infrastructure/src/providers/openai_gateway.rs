//! OpenAI-compatible chat-completions adapter
//!
//! One request per call, no retries or streaming. The request already
//! carries a resolved parameter shape (see `CompletionRequest`), so this
//! adapter only assembles the wire body: it never branches on model
//! identifiers itself.

use async_trait::async_trait;
use cabinet_application::ports::agent_gateway::{
    AgentGateway, CompletionRequest, CompletionResponse, GatewayError, ResponseFormat,
};
use serde_json::{Value, json};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Gateway to an OpenAI-compatible chat-completions endpoint
pub struct OpenAiGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different compatible endpoint (proxy, local
    /// server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Assemble the wire body for one request.
    fn request_body(request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": request.model.as_str(),
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
        });
        let map = body.as_object_mut().expect("body is an object");

        // The token budget lands under whichever field the model dialect
        // expects; temperature is already None for models that reject it.
        map.insert(
            request.token_budget_param.field_name().to_string(),
            json!(request.max_output_tokens),
        );
        if let Some(temperature) = request.temperature {
            map.insert("temperature".to_string(), json!(temperature));
        }
        if request.response_format == ResponseFormat::JsonObject {
            map.insert(
                "response_format".to_string(),
                json!({"type": "json_object"}),
            );
        }

        body
    }

    /// Pull the primary content string out of a chat-completions response.
    fn extract_content(value: &Value) -> Result<String, GatewayError> {
        value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Malformed("response carries no message content".into()))
    }
}

#[async_trait]
impl AgentGateway for OpenAiGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, GatewayError> {
        let model = request.model.clone();
        let body = Self::request_body(&request);
        debug!("Completion request to model {}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        let content = Self::extract_content(&value)?;

        Ok(CompletionResponse { content, model })
    }
}
