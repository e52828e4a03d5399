//! Application use cases

pub mod create_brief;
pub mod execute_turn;
pub mod rate_ministers;
pub mod run_debate;

#[cfg(test)]
pub mod testing;

pub use create_brief::{BriefError, CreateBriefUseCase, RecordDecisionUseCase};
pub use execute_turn::{SynthesisOutcome, TurnExecutor, TurnOutcome};
pub use rate_ministers::{MinisterRatingResult, RateMinistersUseCase, RatingEntry, RatingError};
pub use run_debate::{DebateConfig, DebateError, DebateOutcome, RunDebateUseCase};
