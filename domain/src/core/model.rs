//! Model identifier and static capability table
//!
//! The completion service speaks slightly different parameter dialects per
//! model family (some families reject `temperature`, some name the token
//! budget field differently). Capability is determined statically from the
//! model identifier, never probed at runtime.

use serde::{Deserialize, Serialize};

/// Identifier of an LLM model as the completion service knows it (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Capability profile for this model, looked up by identifier prefix.
    pub fn capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::for_model(self)
    }
}

impl Default for ModelId {
    /// Returns the default model for new ministers
    fn default() -> Self {
        ModelId::new(DEFAULT_MODEL)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        ModelId::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        ModelId::new(s)
    }
}

/// Default model assigned to ministers without an explicit configuration
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Name of the request field carrying the output token budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenBudgetParam {
    /// Classic chat-completion dialect: `max_tokens`
    MaxTokens,
    /// Reasoning-model dialect: `max_completion_tokens`
    MaxCompletionTokens,
}

impl TokenBudgetParam {
    pub fn field_name(&self) -> &'static str {
        match self {
            TokenBudgetParam::MaxTokens => "max_tokens",
            TokenBudgetParam::MaxCompletionTokens => "max_completion_tokens",
        }
    }
}

/// Static parameter-dialect profile for a model family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapabilities {
    /// Whether the model accepts a `temperature` parameter
    pub supports_temperature: bool,
    /// Which field name carries the output token budget
    pub token_budget_param: TokenBudgetParam,
}

impl ModelCapabilities {
    /// Prefixes of model families that reject `temperature` and use
    /// `max_completion_tokens` instead of `max_tokens`.
    const REASONING_PREFIXES: [&'static str; 3] = ["gpt-5", "o1", "o3"];

    /// Look up the capability profile for a model identifier.
    pub fn for_model(model: &ModelId) -> Self {
        let reasoning = Self::REASONING_PREFIXES
            .iter()
            .any(|p| model.as_str().starts_with(p));

        if reasoning {
            Self {
                supports_temperature: false,
                token_budget_param: TokenBudgetParam::MaxCompletionTokens,
            }
        } else {
            Self {
                supports_temperature: true,
                token_budget_param: TokenBudgetParam::MaxTokens,
            }
        }
    }
}

/// Relative cost tier of a catalog model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

/// An entry in the model catalog offered to cabinet configuration
#[derive(Debug, Clone)]
pub struct ModelOption {
    pub id: ModelId,
    pub name: &'static str,
    pub description: &'static str,
    pub cost_tier: CostTier,
}

/// Models offered for minister configuration.
pub fn available_models() -> Vec<ModelOption> {
    vec![
        ModelOption {
            id: ModelId::new("gpt-4o-mini"),
            name: "GPT-4o Mini",
            description: "Fast and cost-effective, great for most tasks",
            cost_tier: CostTier::Low,
        },
        ModelOption {
            id: ModelId::new("gpt-4o"),
            name: "GPT-4o",
            description: "Most capable GPT-4 model",
            cost_tier: CostTier::Medium,
        },
        ModelOption {
            id: ModelId::new("gpt-5-nano"),
            name: "GPT-5 Nano",
            description: "Ultra-fast and cheapest GPT-5 variant",
            cost_tier: CostTier::Low,
        },
        ModelOption {
            id: ModelId::new("gpt-5-mini"),
            name: "GPT-5 Mini",
            description: "Great balance of speed and GPT-5 capability",
            cost_tier: CostTier::Low,
        },
        ModelOption {
            id: ModelId::new("gpt-5"),
            name: "GPT-5",
            description: "Full GPT-5 capabilities",
            cost_tier: CostTier::Medium,
        },
    ]
}
