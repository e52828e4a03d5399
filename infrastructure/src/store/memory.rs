//! In-memory store implementing every repository port
//!
//! Backs a single CLI invocation: a debate runs, gets rated, and the
//! process exits. State that must outlive the process goes through the
//! JSONL transcript log instead.

use async_trait::async_trait;
use cabinet_application::ports::StoreError;
use cabinet_application::ports::brief_repository::BriefRepository;
use cabinet_application::ports::cabinet_repository::CabinetRepository;
use cabinet_application::ports::rating_store::RatingStore;
use cabinet_application::ports::transcript_store::TranscriptStore;
use cabinet_domain::{
    Brief, BriefId, Decision, Minister, MinisterId, Rating, ReputationState, TurnRecord,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// One store for briefs, ministers, transcripts, and ratings
pub struct MemoryStore {
    briefs: RwLock<HashMap<String, Brief>>,
    decisions: RwLock<Vec<Decision>>,
    ministers: RwLock<Vec<Minister>>,
    turns: RwLock<Vec<TurnRecord>>,
    ratings: RwLock<HashMap<(String, String), Rating>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            briefs: RwLock::new(HashMap::new()),
            decisions: RwLock::new(Vec::new()),
            ministers: RwLock::new(Vec::new()),
            turns: RwLock::new(Vec::new()),
            ratings: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the seated cabinet.
    pub async fn seed_cabinet(&self, ministers: Vec<Minister>) {
        *self.ministers.write().await = ministers;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BriefRepository for MemoryStore {
    async fn insert(&self, brief: Brief) -> Result<(), StoreError> {
        self.briefs
            .write()
            .await
            .insert(brief.id.as_str().to_string(), brief);
        Ok(())
    }

    async fn get(&self, id: &BriefId) -> Result<Option<Brief>, StoreError> {
        Ok(self.briefs.read().await.get(id.as_str()).cloned())
    }

    async fn update(&self, brief: &Brief) -> Result<(), StoreError> {
        let mut briefs = self.briefs.write().await;
        if !briefs.contains_key(brief.id.as_str()) {
            return Err(StoreError::NotFound(brief.id.to_string()));
        }
        briefs.insert(brief.id.as_str().to_string(), brief.clone());
        Ok(())
    }

    async fn record_decision(&self, decision: Decision) -> Result<(), StoreError> {
        self.decisions.write().await.push(decision);
        Ok(())
    }
}

#[async_trait]
impl CabinetRepository for MemoryStore {
    async fn active_ministers(&self) -> Result<Vec<Minister>, StoreError> {
        let mut ministers: Vec<Minister> = self
            .ministers
            .read()
            .await
            .iter()
            .filter(|m| m.is_available())
            .cloned()
            .collect();
        ministers.sort_by_key(|m| m.seat_index);
        Ok(ministers)
    }

    async fn all_ministers(&self) -> Result<Vec<Minister>, StoreError> {
        let mut ministers = self.ministers.read().await.clone();
        ministers.sort_by_key(|m| m.seat_index);
        Ok(ministers)
    }

    async fn get(&self, id: &MinisterId) -> Result<Option<Minister>, StoreError> {
        Ok(self
            .ministers
            .read()
            .await
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn update_reputation(
        &self,
        id: &MinisterId,
        state: ReputationState,
    ) -> Result<(), StoreError> {
        let mut ministers = self.ministers.write().await;
        let minister = ministers
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        minister.reputation = state;
        Ok(())
    }
}

#[async_trait]
impl TranscriptStore for MemoryStore {
    async fn append(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        let mut turns = self.turns.write().await;
        // Idempotent on (brief, index): a duplicate append is acknowledged
        // without a second record
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
            .read()
            .await
            .iter()
            .filter(|t| &t.brief_id == brief_id)
            .cloned()
            .collect();
        turns.sort_by_key(|t| t.turn_index);
        Ok(turns)
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn upsert(
        &self,
        brief_id: &BriefId,
        minister_id: &MinisterId,
        rating: Rating,
    ) -> Result<(), StoreError> {
        self.ratings.write().await.insert(
            (
                brief_id.as_str().to_string(),
                minister_id.as_str().to_string(),
            ),
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
            .read()
            .await
            .get(&(
                brief_id.as_str().to_string(),
                minister_id.as_str().to_string(),
            ))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_domain::{BriefContext, RatingValue, default_cabinet};

    #[tokio::test]
    async fn test_duplicate_append_is_idempotent() {
        let store = MemoryStore::new();
        let turn = TurnRecord::system(BriefId::new("b-1"), 0, "start");

        store.append(&turn).await.unwrap();
        store.append(&turn).await.unwrap();

        let turns = store.list(&BriefId::new("b-1")).await.unwrap();
        assert_eq!(turns.len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_per_brief_and_ordered() {
        let store = MemoryStore::new();
        store
            .append(&TurnRecord::system(BriefId::new("b-1"), 1, "later"))
            .await
            .unwrap();
        store
            .append(&TurnRecord::system(BriefId::new("b-2"), 0, "other"))
            .await
            .unwrap();
        store
            .append(&TurnRecord::system(BriefId::new("b-1"), 0, "first"))
            .await
            .unwrap();

        let turns = store.list(&BriefId::new("b-1")).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "first");
        assert_eq!(turns[1].content, "later");
    }

    #[tokio::test]
    async fn test_update_requires_existing_brief() {
        let store = MemoryStore::new();
        let brief = Brief::new(BriefId::new("b-1"), "t", BriefContext::default());
        assert!(store.update(&brief).await.is_err());

        store.insert(brief.clone()).await.unwrap();
        assert!(store.update(&brief).await.is_ok());
    }

    #[tokio::test]
    async fn test_rating_upsert_replaces() {
        let store = MemoryStore::new();
        let brief = BriefId::new("b-1");
        let minister = MinisterId::new("ethics");

        store
            .upsert(&brief, &minister, Rating::new(RatingValue::new(5).unwrap()))
            .await
            .unwrap();
        store
            .upsert(&brief, &minister, Rating::new(RatingValue::new(2).unwrap()))
            .await
            .unwrap();

        let rating = RatingStore::get(&store, &brief, &minister)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rating.value.get(), 2);
    }

    #[tokio::test]
    async fn test_reputation_update_round_trips() {
        let store = MemoryStore::new();
        store.seed_cabinet(default_cabinet()).await;
        let id = MinisterId::new("ethics");

        let state = ReputationState {
            rating_sum: 9,
            rating_count: 2,
            ..ReputationState::default()
        };
        store.update_reputation(&id, state.clone()).await.unwrap();

        let stored = CabinetRepository::get(&store, &id).await.unwrap().unwrap();
        assert_eq!(stored.reputation, state);

        let missing = MinisterId::new("nobody");
        assert!(store.update_reputation(&missing, state).await.is_err());
    }
}
