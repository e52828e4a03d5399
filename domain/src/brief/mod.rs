//! Brief (deliberation session) entities
//!
//! A brief is one decision posed to the cabinet. Its status moves
//! monotonically forward: Queued → Running → Done. Only the orchestrator
//! mutates a brief after creation.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a brief (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BriefId(String);

impl BriefId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BriefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BriefId {
    fn from(s: &str) -> Self {
        BriefId::new(s)
    }
}

/// Structured input context for a brief
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BriefContext {
    /// What the user wants to achieve
    pub goals: String,
    /// Hard limits on acceptable plans
    pub constraints: String,
    /// Ordered list of values the user cares about
    #[serde(default)]
    pub values: Vec<String>,
}

impl BriefContext {
    pub fn new(goals: impl Into<String>, constraints: impl Into<String>) -> Self {
        Self {
            goals: goals.into(),
            constraints: constraints.into(),
            values: Vec::new(),
        }
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

/// Lifecycle status of a brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefStatus {
    Queued,
    Running,
    Done,
}

impl BriefStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BriefStatus::Queued => "queued",
            BriefStatus::Running => "running",
            BriefStatus::Done => "done",
        }
    }

    /// Whether `next` is a legal forward transition from `self`.
    pub fn can_transition_to(&self, next: BriefStatus) -> bool {
        matches!(
            (self, next),
            (BriefStatus::Queued, BriefStatus::Running)
                | (BriefStatus::Running, BriefStatus::Done)
        )
    }
}

impl std::fmt::Display for BriefStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One deliberation session (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    pub id: BriefId,
    pub title: String,
    pub context: BriefContext,
    pub status: BriefStatus,
    /// Set when the orchestrator hit an unrecoverable error. The brief is
    /// still terminal (Done), never stuck Running.
    pub flagged: bool,
    pub created_at: DateTime<Utc>,
}

impl Brief {
    pub fn new(id: BriefId, title: impl Into<String>, context: BriefContext) -> Self {
        Self {
            id,
            title: title.into(),
            context,
            status: BriefStatus::Queued,
            flagged: false,
            created_at: Utc::now(),
        }
    }

    /// Advance the status, enforcing forward-only transitions.
    pub fn transition(&mut self, next: BriefStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition(format!(
                "{} -> {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Mark the brief terminal after an unrecoverable orchestration failure.
    pub fn flag_terminal(&mut self) {
        self.status = BriefStatus::Done;
        self.flagged = true;
    }
}

/// User's recorded decision after reviewing the synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub brief_id: BriefId,
    /// Title of the chosen synthesis option
    pub chosen_option: String,
    pub user_notes: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    pub fn new(brief_id: BriefId, chosen_option: impl Into<String>) -> Self {
        Self {
            brief_id,
            chosen_option: chosen_option.into(),
            user_notes: None,
            decided_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.user_notes = Some(notes.into());
        self
    }
}
