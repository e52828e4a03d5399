//! Rating intake and reputation updates
//!
//! One rating per (brief, minister): the stored rating is upsert-replaced,
//! but the reputation transition is applied only the first time a session is
//! rated, so re-submitting a rating never double-counts.

use crate::ports::StoreError;
use crate::ports::brief_repository::BriefRepository;
use crate::ports::cabinet_repository::CabinetRepository;
use crate::ports::rating_store::RatingStore;
use cabinet_domain::{
    BriefId, DomainError, MinisterId, MinisterStatus, Rating, ReputationThresholds, StatusChange,
    apply_rating,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("Brief not found: {0}")]
    BriefNotFound(String),

    #[error("Minister not found: {0}")]
    MinisterNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One rating submission for one minister
#[derive(Debug, Clone)]
pub struct RatingEntry {
    pub minister_id: MinisterId,
    pub rating: Rating,
}

/// Post-rating reputation snapshot for one minister
#[derive(Debug, Clone)]
pub struct MinisterRatingResult {
    pub minister_id: MinisterId,
    pub name: String,
    pub status: MinisterStatus,
    /// None until the minister has been rated at least once
    pub average: Option<f64>,
    pub sessions: u64,
    /// The transition this rating caused, if any
    pub change: Option<StatusChange>,
}

/// Use case: record session ratings and run the reputation engine
pub struct RateMinistersUseCase {
    briefs: Arc<dyn BriefRepository>,
    cabinet: Arc<dyn CabinetRepository>,
    ratings: Arc<dyn RatingStore>,
    thresholds: ReputationThresholds,
}

impl RateMinistersUseCase {
    pub fn new(
        briefs: Arc<dyn BriefRepository>,
        cabinet: Arc<dyn CabinetRepository>,
        ratings: Arc<dyn RatingStore>,
        thresholds: ReputationThresholds,
    ) -> Self {
        Self {
            briefs,
            cabinet,
            ratings,
            thresholds,
        }
    }

    /// Record ratings for one brief and return each minister's updated
    /// standing. Entries are processed in order; an unknown minister aborts
    /// the whole submission.
    pub async fn execute(
        &self,
        brief_id: &BriefId,
        entries: Vec<RatingEntry>,
    ) -> Result<Vec<MinisterRatingResult>, RatingError> {
        if self.briefs.get(brief_id).await?.is_none() {
            return Err(RatingError::BriefNotFound(brief_id.to_string()));
        }

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let minister = self
                .cabinet
                .get(&entry.minister_id)
                .await?
                .ok_or_else(|| RatingError::MinisterNotFound(entry.minister_id.to_string()))?;

            let already_rated = self
                .ratings
                .get(brief_id, &entry.minister_id)
                .await?
                .is_some();
            self.ratings
                .upsert(brief_id, &entry.minister_id, entry.rating.clone())
                .await?;

            let (state, change) = if already_rated {
                (minister.reputation.clone(), None)
            } else {
                let (state, change) =
                    apply_rating(&minister.reputation, entry.rating.value, &self.thresholds);
                self.cabinet
                    .update_reputation(&entry.minister_id, state.clone())
                    .await?;
                (state, change)
            };

            if let Some(change) = &change {
                info!(
                    "Minister {} moved {} -> {}: {}",
                    minister.name, change.from, change.to, change.reason
                );
            }

            results.push(MinisterRatingResult {
                minister_id: entry.minister_id,
                name: minister.name,
                status: state.status,
                average: state.average(),
                sessions: state.rating_count,
                change,
            });
        }

        Ok(results)
    }
}
