//! Debate domain: phases, turns, votes, and payload extraction
//!
//! # Core Concepts
//!
//! ## Deliberation
//! A brief runs through a fixed sequence of phases. Every minister speaks in
//! seat order within a phase; every statement becomes an immutable
//! transcript turn.
//!
//! ## Degradation
//! A single minister failing, timing out, or emitting garbage never stops
//! the debate. Failures become visible error turns with neutral votes, and
//! the synthesis phase always runs over whatever transcript exists.

pub mod parsing;
pub mod phase;
pub mod synthesis;
pub mod turn;
pub mod vote;

pub use parsing::{TurnPayload, parse_synthesis_payload, parse_turn_payload};
pub use phase::DebatePhase;
pub use synthesis::{ConsensusStrength, PlanOption, SynthesisPayload};
pub use turn::{TurnKind, TurnMetadata, TurnRecord};
pub use vote::{Vote, VoteTally};
