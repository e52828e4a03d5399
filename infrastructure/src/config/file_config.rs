//! Raw TOML configuration data types
//!
//! These structs mirror the exact TOML structure. Every section is optional;
//! an absent `[[ministers]]` list means the default cabinet.

use cabinet_application::use_cases::DebateConfig;
use cabinet_domain::{
    Minister, MinisterId, MinisterRole, ModelId, ReputationThresholds, default_cabinet,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion service settings
    pub gateway: FileGatewayConfig,
    /// Debate pacing settings
    pub debate: FileDebateConfig,
    /// Reputation engine thresholds
    pub reputation: ReputationThresholds,
    /// Seated ministers; empty means the default cabinet
    pub ministers: Vec<FileMinisterConfig>,
}

impl FileConfig {
    /// The cabinet this config seats, in declaration order.
    pub fn ministers(&self) -> Vec<Minister> {
        if self.ministers.is_empty() {
            return default_cabinet();
        }
        self.ministers
            .iter()
            .enumerate()
            .map(|(i, m)| m.to_minister(i as u32))
            .collect()
    }
}

/// `[gateway]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Override for the completion endpoint (proxies, local servers)
    pub base_url: Option<String>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
        }
    }
}

/// `[debate]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Global wall-clock budget in seconds
    pub budget_secs: u64,
    /// Concurrent opening statements
    pub opening_concurrency: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let defaults = DebateConfig::default();
        Self {
            budget_secs: defaults.global_budget.as_secs(),
            opening_concurrency: defaults.opening_concurrency,
        }
    }
}

impl FileDebateConfig {
    pub fn to_debate_config(&self) -> DebateConfig {
        DebateConfig {
            global_budget: Duration::from_secs(self.budget_secs),
            opening_concurrency: self.opening_concurrency,
        }
    }
}

/// One `[[ministers]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMinisterConfig {
    pub id: String,
    pub name: String,
    /// "Synthesizer", "Skeptic", or an advisor portfolio name
    pub role: String,
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl FileMinisterConfig {
    fn to_minister(&self, seat_index: u32) -> Minister {
        let mut minister = Minister::new(
            MinisterId::new(&self.id),
            &self.name,
            MinisterRole::from(self.role.clone()),
            &self.prompt,
        )
        .with_seat(seat_index);
        if let Some(model) = &self.model {
            minister = minister.with_model(ModelId::new(model));
        }
        if let Some(temperature) = self.temperature {
            minister = minister.with_temperature(temperature);
        }
        minister.enabled = self.enabled;
        minister
    }
}
