//! Reputation engine: rating aggregation and status transitions
//!
//! Each rating event runs a pure transition `(state, rating) -> (state',
//! event?)`. The rules fire in strict precedence order and at most one rule
//! fires per event; none fire before the minister has accumulated the
//! minimum number of rated sessions. Suspension is never reversed
//! automatically.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A 1-5 star rating value (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating(format!(
                "rating must be 1-5, got {value}"
            )))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Ratings of 2 or below count toward the consecutive-low streak.
    pub fn is_low(&self) -> bool {
        self.0 <= 2
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RatingValue::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(v: RatingValue) -> Self {
        v.0
    }
}

/// A user's rating of one minister for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub value: RatingValue,
    pub feedback: Option<String>,
    pub was_helpful: bool,
}

impl Rating {
    pub fn new(value: RatingValue) -> Self {
        Self {
            value,
            feedback: None,
            was_helpful: true,
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    pub fn not_helpful(mut self) -> Self {
        self.was_helpful = false;
        self
    }
}

/// Lifecycle status of a minister, driven by ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinisterStatus {
    #[default]
    Active,
    Probation,
    Suspended,
}

impl MinisterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MinisterStatus::Active => "active",
            MinisterStatus::Probation => "probation",
            MinisterStatus::Suspended => "suspended",
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, MinisterStatus::Suspended)
    }
}

impl std::fmt::Display for MinisterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-minister rolling reputation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationState {
    pub status: MinisterStatus,
    /// Warnings issued while Active with a poor rolling average
    pub warnings: u32,
    /// Current streak of ratings <= 2
    pub consecutive_low: u32,
    pub rating_sum: u64,
    pub rating_count: u64,
}

impl ReputationState {
    pub fn average(&self) -> Option<f64> {
        if self.rating_count == 0 {
            None
        } else {
            Some(self.rating_sum as f64 / self.rating_count as f64)
        }
    }
}

/// Thresholds governing status transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationThresholds {
    /// Rolling average below this while Active issues a warning
    pub warning_avg: f64,
    /// Warnings needed to move from Active to Probation
    pub probation_warnings: u32,
    /// Rolling average below this while on Probation suspends
    pub suspension_avg: f64,
    /// Consecutive ratings <= 2 that suspend outright
    pub consecutive_low: u32,
    /// Ratings required before any rule may fire
    pub min_sessions: u64,
}

impl Default for ReputationThresholds {
    fn default() -> Self {
        Self {
            warning_avg: 2.5,
            probation_warnings: 2,
            suspension_avg: 2.0,
            consecutive_low: 3,
            min_sessions: 5,
        }
    }
}

/// Status-change event emitted by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEvent {
    Warning,
    Probation,
    Suspended,
    Recovered,
}

/// Record of one status transition (or warning) for the performance log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: MinisterStatus,
    pub to: MinisterStatus,
    pub event: StatusEvent,
    pub reason: String,
}

/// Apply one rating to a reputation state.
///
/// Pure function: returns the successor state and an optional status-change
/// event. Exactly zero or one rule fires per rating; the consecutive-low
/// streak update happens unconditionally before the rules are evaluated.
pub fn apply_rating(
    state: &ReputationState,
    rating: RatingValue,
    thresholds: &ReputationThresholds,
) -> (ReputationState, Option<StatusChange>) {
    let mut next = state.clone();
    next.rating_sum += rating.get() as u64;
    next.rating_count += 1;

    if rating.is_low() {
        next.consecutive_low += 1;
    } else {
        next.consecutive_low = 0;
    }

    if next.rating_count < thresholds.min_sessions {
        return (next, None);
    }

    // average() is Some: rating_count >= min_sessions >= 1 here
    let average = next.rating_sum as f64 / next.rating_count as f64;
    let from = next.status;

    // Rule 1: consecutive-low streak suspends outright
    if next.consecutive_low >= thresholds.consecutive_low && from != MinisterStatus::Suspended {
        next.status = MinisterStatus::Suspended;
        let change = StatusChange {
            from,
            to: MinisterStatus::Suspended,
            event: StatusEvent::Suspended,
            reason: format!("{} consecutive low ratings", next.consecutive_low),
        };
        return (next, Some(change));
    }

    // Rule 2: poor rolling average while Active issues warnings
    if average < thresholds.warning_avg && from == MinisterStatus::Active {
        next.warnings += 1;
        let change = if next.warnings >= thresholds.probation_warnings {
            next.status = MinisterStatus::Probation;
            StatusChange {
                from,
                to: MinisterStatus::Probation,
                event: StatusEvent::Probation,
                reason: format!(
                    "Average rating {:.1} with {} warnings",
                    average, next.warnings
                ),
            }
        } else {
            StatusChange {
                from,
                to: from,
                event: StatusEvent::Warning,
                reason: format!("Warning issued - average rating {:.1}", average),
            }
        };
        return (next, Some(change));
    }

    // Rule 3: probation plus a very poor average suspends
    if from == MinisterStatus::Probation && average < thresholds.suspension_avg {
        next.status = MinisterStatus::Suspended;
        let change = StatusChange {
            from,
            to: MinisterStatus::Suspended,
            event: StatusEvent::Suspended,
            reason: format!("Average {:.1} while on probation", average),
        };
        return (next, Some(change));
    }

    // Rule 4: recovery from probation
    if from == MinisterStatus::Probation && average >= thresholds.warning_avg {
        next.status = MinisterStatus::Active;
        next.warnings = next.warnings.saturating_sub(1);
        let change = StatusChange {
            from,
            to: MinisterStatus::Active,
            event: StatusEvent::Recovered,
            reason: "Performance improved".to_string(),
        };
        return (next, Some(change));
    }

    (next, None)
}
