//! Transcript store port

use super::StoreError;
use async_trait::async_trait;
use cabinet_domain::{BriefId, TurnRecord};

/// Durable append-only log of debate turns
///
/// Append is idempotent on (brief, turn index): a duplicate append of an
/// index that already exists is acknowledged and dropped by the store, not
/// by the orchestrator. At-least-once delivery is sufficient.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn append(&self, turn: &TurnRecord) -> Result<(), StoreError>;

    /// All turns for a brief, ordered by turn index.
    async fn list(&self, brief_id: &BriefId) -> Result<Vec<TurnRecord>, StoreError>;
}
