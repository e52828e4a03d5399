//! Test doubles for use-case tests: a scripted gateway and in-memory ports.

use crate::ports::agent_gateway::{
    AgentGateway, CompletionRequest, CompletionResponse, GatewayError,
};
use crate::ports::brief_repository::BriefRepository;
use crate::ports::cabinet_repository::CabinetRepository;
use crate::ports::rating_store::RatingStore;
use crate::ports::transcript_store::TranscriptStore;
use crate::ports::StoreError;
use async_trait::async_trait;
use cabinet_domain::{
    Brief, BriefId, Decision, Minister, MinisterId, Rating, ReputationState, TurnRecord,
    default_cabinet,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Rule {
    system_contains: String,
    response: Option<String>,
    error: Option<String>,
    delay: Option<Duration>,
}

/// Scripted gateway: responses keyed by substrings of the system prompt,
/// with a configurable default. Records every user prompt it sees.
pub struct MockGateway {
    default_response: Mutex<String>,
    default_error: Mutex<Option<String>>,
    default_delay: Mutex<Option<Duration>>,
    rules: Mutex<Vec<Rule>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            default_response: Mutex::new(
                r#"{"content": "Placeholder advice from the mock.", "vote": "abstain"}"#
                    .to_string(),
            ),
            default_error: Mutex::new(None),
            default_delay: Mutex::new(None),
            rules: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Set the default response for every call.
    pub fn respond_with(&self, response: &str) {
        *self.default_response.lock().unwrap() = response.to_string();
    }

    /// Fail every call with a transport error.
    pub fn fail_with_transport(&self, message: &str) {
        *self.default_error.lock().unwrap() = Some(message.to_string());
    }

    /// Delay every call.
    pub fn delay(&self, delay: Duration) {
        *self.default_delay.lock().unwrap() = Some(delay);
    }

    /// Respond specially when the system prompt contains `substr`.
    pub fn respond_for(&self, substr: &str, response: &str) {
        self.rules.lock().unwrap().push(Rule {
            system_contains: substr.to_string(),
            response: Some(response.to_string()),
            error: None,
            delay: None,
        });
    }

    /// Fail with a transport error when the system prompt contains `substr`.
    pub fn fail_for(&self, substr: &str, message: &str) {
        self.rules.lock().unwrap().push(Rule {
            system_contains: substr.to_string(),
            response: None,
            error: Some(message.to_string()),
            delay: None,
        });
    }

    /// Delay calls whose system prompt contains `substr`.
    pub fn delay_for(&self, substr: &str, delay: Duration) {
        self.rules.lock().unwrap().push(Rule {
            system_contains: substr.to_string(),
            response: None,
            error: None,
            delay: Some(delay),
        });
    }

    /// Every user prompt seen, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentGateway for MockGateway {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        self.prompts.lock().unwrap().push(request.user.clone());

        let matching: Vec<Rule> = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .filter(|r| request.system.contains(&r.system_contains))
            .cloned()
            .collect();

        let delay = matching
            .iter()
            .find_map(|r| r.delay)
            .or(*self.default_delay.lock().unwrap());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = matching.iter().find_map(|r| r.error.clone()) {
            return Err(GatewayError::Transport(message));
        }
        if let Some(message) = self.default_error.lock().unwrap().clone() {
            return Err(GatewayError::Transport(message));
        }

        let content = matching
            .iter()
            .find_map(|r| r.response.clone())
            .unwrap_or_else(|| self.default_response.lock().unwrap().clone());

        Ok(CompletionResponse {
            content,
            model: request.model,
        })
    }
}

/// In-memory implementations of every store port.
pub struct MemoryPorts {
    pub briefs: Arc<MemoryBriefs>,
    pub cabinet: Arc<MemoryCabinet>,
    pub transcript: Arc<MemoryTranscript>,
    pub ratings: Arc<MemoryRatings>,
}

impl MemoryPorts {
    /// Empty stores: no ministers configured.
    pub fn new() -> Self {
        Self {
            briefs: Arc::new(MemoryBriefs::default()),
            cabinet: Arc::new(MemoryCabinet::default()),
            transcript: Arc::new(MemoryTranscript::default()),
            ratings: Arc::new(MemoryRatings::default()),
        }
    }

    /// Stores seeded with the default six-seat cabinet.
    pub fn with_default_cabinet() -> Self {
        let ports = Self::new();
        ports.cabinet.seed(default_cabinet());
        ports
    }
}

#[derive(Default)]
pub struct MemoryBriefs {
    briefs: Mutex<HashMap<String, Brief>>,
    decisions: Mutex<Vec<Decision>>,
}

#[async_trait]
impl BriefRepository for MemoryBriefs {
    async fn insert(&self, brief: Brief) -> Result<(), StoreError> {
        self.briefs
            .lock()
            .unwrap()
            .insert(brief.id.as_str().to_string(), brief);
        Ok(())
    }

    async fn get(&self, id: &BriefId) -> Result<Option<Brief>, StoreError> {
        Ok(self.briefs.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn update(&self, brief: &Brief) -> Result<(), StoreError> {
        self.briefs
            .lock()
            .unwrap()
            .insert(brief.id.as_str().to_string(), brief.clone());
        Ok(())
    }

    async fn record_decision(&self, decision: Decision) -> Result<(), StoreError> {
        self.decisions.lock().unwrap().push(decision);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCabinet {
    ministers: Mutex<Vec<Minister>>,
}

impl MemoryCabinet {
    pub fn seed(&self, ministers: Vec<Minister>) {
        *self.ministers.lock().unwrap() = ministers;
    }

    /// Simulate a minister being deleted mid-session.
    pub fn remove(&self, id: &MinisterId) {
        self.ministers.lock().unwrap().retain(|m| &m.id != id);
    }
}

#[async_trait]
impl CabinetRepository for MemoryCabinet {
    async fn active_ministers(&self) -> Result<Vec<Minister>, StoreError> {
        let mut ministers: Vec<Minister> = self
            .ministers
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.is_available())
            .cloned()
            .collect();
        ministers.sort_by_key(|m| m.seat_index);
        Ok(ministers)
    }

    async fn all_ministers(&self) -> Result<Vec<Minister>, StoreError> {
        Ok(self.ministers.lock().unwrap().clone())
    }

    async fn get(&self, id: &MinisterId) -> Result<Option<Minister>, StoreError> {
        Ok(self
            .ministers
            .lock()
            .unwrap()
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn update_reputation(
        &self,
        id: &MinisterId,
        state: ReputationState,
    ) -> Result<(), StoreError> {
        let mut ministers = self.ministers.lock().unwrap();
        let minister = ministers
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        minister.reputation = state;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTranscript {
    turns: Mutex<Vec<TurnRecord>>,
}

#[async_trait]
impl TranscriptStore for MemoryTranscript {
    async fn append(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        let mut turns = self.turns.lock().unwrap();
        // Idempotent on (brief, index): duplicates are acknowledged, not stored
        let exists = turns
            .iter()
            .any(|t| t.brief_id == turn.brief_id && t.turn_index == turn.turn_index);
        if !exists {
            turns.push(turn.clone());
        }
        Ok(())
    }

    async fn list(&self, brief_id: &BriefId) -> Result<Vec<TurnRecord>, StoreError> {
        let mut turns: Vec<TurnRecord> = self
            .turns
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.brief_id == brief_id)
            .cloned()
            .collect();
        turns.sort_by_key(|t| t.turn_index);
        Ok(turns)
    }
}

#[derive(Default)]
pub struct MemoryRatings {
    ratings: Mutex<HashMap<(String, String), Rating>>,
}

impl MemoryRatings {
    pub fn count(&self) -> usize {
        self.ratings.lock().unwrap().len()
    }
}

#[async_trait]
impl RatingStore for MemoryRatings {
    async fn upsert(
        &self,
        brief_id: &BriefId,
        minister_id: &MinisterId,
        rating: Rating,
    ) -> Result<(), StoreError> {
        self.ratings.lock().unwrap().insert(
            (brief_id.as_str().to_string(), minister_id.as_str().to_string()),
            rating,
        );
        Ok(())
    }

    async fn get(
        &self,
        brief_id: &BriefId,
        minister_id: &MinisterId,
    ) -> Result<Option<Rating>, StoreError> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .get(&(
                brief_id.as_str().to_string(),
                minister_id.as_str().to_string(),
            ))
            .cloned())
    }
}
