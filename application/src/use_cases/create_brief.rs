//! Brief creation and decision recording

use crate::ports::StoreError;
use crate::ports::brief_repository::BriefRepository;
use cabinet_domain::{Brief, BriefContext, BriefId, BriefStatus, Decision, DomainError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BriefError {
    #[error("Brief not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Process-wide tiebreaker so two briefs created in the same millisecond
/// still get distinct ids.
static BRIEF_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_brief_id() -> BriefId {
    let millis = chrono::Utc::now().timestamp_millis();
    let n = BRIEF_COUNTER.fetch_add(1, Ordering::Relaxed);
    BriefId::new(format!("brief-{millis}-{n}"))
}

/// Use case: open a new brief for deliberation
pub struct CreateBriefUseCase {
    briefs: Arc<dyn BriefRepository>,
}

impl CreateBriefUseCase {
    pub fn new(briefs: Arc<dyn BriefRepository>) -> Self {
        Self { briefs }
    }

    pub async fn execute(
        &self,
        title: impl Into<String>,
        context: BriefContext,
    ) -> Result<Brief, BriefError> {
        let brief = Brief::new(next_brief_id(), title, context);
        self.briefs.insert(brief.clone()).await?;
        Ok(brief)
    }
}

/// Use case: record the user's final call on a finished brief
pub struct RecordDecisionUseCase {
    briefs: Arc<dyn BriefRepository>,
}

impl RecordDecisionUseCase {
    pub fn new(briefs: Arc<dyn BriefRepository>) -> Self {
        Self { briefs }
    }

    /// The brief must exist and be Done; a decision on a running brief
    /// makes no sense.
    pub async fn execute(
        &self,
        brief_id: &BriefId,
        chosen_option: impl Into<String>,
        notes: Option<String>,
    ) -> Result<Decision, BriefError> {
        let brief = self
            .briefs
            .get(brief_id)
            .await?
            .ok_or_else(|| BriefError::NotFound(brief_id.to_string()))?;
        if brief.status != BriefStatus::Done {
            return Err(BriefError::Domain(DomainError::InvalidTransition(format!(
                "cannot decide a {} brief",
                brief.status
            ))));
        }

        let mut decision = Decision::new(brief_id.clone(), chosen_option);
        if let Some(notes) = notes {
            decision = decision.with_notes(notes);
        }
        self.briefs.record_decision(decision.clone()).await?;
        Ok(decision)
    }
}
