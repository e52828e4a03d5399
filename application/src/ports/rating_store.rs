//! Rating store port

use super::StoreError;
use async_trait::async_trait;
use cabinet_domain::{BriefId, MinisterId, Rating};

/// Storage for per-session minister ratings
///
/// One rating per (brief, minister): upsert semantics, never append.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn upsert(
        &self,
        brief_id: &BriefId,
        minister_id: &MinisterId,
        rating: Rating,
    ) -> Result<(), StoreError>;

    async fn get(
        &self,
        brief_id: &BriefId,
        minister_id: &MinisterId,
    ) -> Result<Option<Rating>, StoreError>;
}
