//! Cabinet repository port

use super::StoreError;
use async_trait::async_trait;
use cabinet_domain::{Minister, MinisterId, ReputationState};

/// Storage for cabinet configuration and reputation state
///
/// The orchestrator only reads ministers; reputation fields are written
/// exclusively by the rating use case, after a session has closed.
#[async_trait]
pub trait CabinetRepository: Send + Sync {
    /// Ministers eligible for a new session: enabled, not suspended,
    /// ordered by seat index.
    async fn active_ministers(&self) -> Result<Vec<Minister>, StoreError>;

    /// Every configured minister regardless of availability.
    async fn all_ministers(&self) -> Result<Vec<Minister>, StoreError>;

    /// None when the minister was deleted or archived.
    async fn get(&self, id: &MinisterId) -> Result<Option<Minister>, StoreError>;

    async fn update_reputation(
        &self,
        id: &MinisterId,
        state: ReputationState,
    ) -> Result<(), StoreError>;
}
