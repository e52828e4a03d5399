//! Domain layer for cabinet
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Brief
//! One decision posed to the cabinet, with its own transcript and outcome.
//!
//! ## Cabinet
//! The configured panel of ministers. Two roles carry debate semantics:
//! the Synthesizer chairs the session, the Skeptic cross-examines.
//!
//! ## Reputation
//! Ratings drive a per-minister status machine
//! (active → probation → suspended); suspended ministers are excluded from
//! future sessions.

pub mod brief;
pub mod cabinet;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod reputation;

// Re-export commonly used types
pub use brief::{Brief, BriefContext, BriefId, BriefStatus, Decision};
pub use cabinet::{Minister, MinisterId, MinisterRole, default_cabinet};
pub use crate::core::{
    error::DomainError,
    model::{CostTier, ModelCapabilities, ModelId, ModelOption, TokenBudgetParam, available_models},
};
pub use debate::{
    ConsensusStrength, DebatePhase, PlanOption, SynthesisPayload, TurnKind, TurnMetadata,
    TurnPayload, TurnRecord, Vote, VoteTally, parse_synthesis_payload, parse_turn_payload,
};
pub use prompt::PromptTemplate;
pub use reputation::{
    MinisterStatus, Rating, RatingValue, ReputationState, ReputationThresholds, StatusChange,
    StatusEvent, apply_rating,
};
