//! Agent gateway port
//!
//! Defines the interface to the external completion service. The request
//! carries a fully resolved parameter shape: the capability table is applied
//! here, so adapters never branch on model identifiers.

use async_trait::async_trait;
use cabinet_domain::{Minister, ModelId, TokenBudgetParam};
use thiserror::Error;

/// Typed failures from one completion call
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),
}

/// Requested shape of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

/// One structured request to the completion service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System/role text
    pub system: String,
    /// User text
    pub user: String,
    pub model: ModelId,
    /// Already filtered through the capability table: None when the model
    /// rejects the parameter
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
    /// Output token budget; the adapter places it under the field named by
    /// `token_budget_param`
    pub max_output_tokens: u32,
    pub token_budget_param: TokenBudgetParam,
}

impl CompletionRequest {
    /// Build a request for a minister, resolving the parameter dialect from
    /// the static capability table.
    pub fn for_minister(minister: &Minister, user: impl Into<String>, max_output_tokens: u32) -> Self {
        let caps = minister.model.capabilities();
        Self {
            system: minister.system_prompt.clone(),
            user: user.into(),
            model: minister.model.clone(),
            temperature: caps.supports_temperature.then_some(minister.temperature),
            response_format: ResponseFormat::JsonObject,
            max_output_tokens,
            token_budget_param: caps.token_budget_param,
        }
    }
}

/// Parsed result of one completion call
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Raw text of the primary content field (still untrusted; payload
    /// extraction happens in the domain)
    pub content: String,
    pub model: ModelId,
}

/// Gateway for the external completion service
///
/// Implementations (adapters) live in the infrastructure layer. One call,
/// no retries; the caller owns timeouts above the transport level.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, GatewayError>;
}
