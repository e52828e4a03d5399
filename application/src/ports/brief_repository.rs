//! Brief repository port

use super::StoreError;
use async_trait::async_trait;
use cabinet_domain::{Brief, BriefId, Decision};

/// Storage for briefs and recorded decisions
#[async_trait]
pub trait BriefRepository: Send + Sync {
    async fn insert(&self, brief: Brief) -> Result<(), StoreError>;

    async fn get(&self, id: &BriefId) -> Result<Option<Brief>, StoreError>;

    /// Persist status/flag mutations made by the orchestrator.
    async fn update(&self, brief: &Brief) -> Result<(), StoreError>;

    async fn record_decision(&self, decision: Decision) -> Result<(), StoreError>;
}
