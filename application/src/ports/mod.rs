//! Ports (interfaces) for the application layer
//!
//! Implementations live in the infrastructure (stores, gateways) or
//! presentation (progress) layers.

pub mod agent_gateway;
pub mod brief_repository;
pub mod cabinet_repository;
pub mod progress;
pub mod rating_store;
pub mod transcript_store;

pub use agent_gateway::{
    AgentGateway, CompletionRequest, CompletionResponse, GatewayError, ResponseFormat,
};
pub use brief_repository::BriefRepository;
pub use cabinet_repository::CabinetRepository;
pub use progress::{DebateProgress, NoProgress};
pub use rating_store::RatingStore;
pub use transcript_store::TranscriptStore;

use thiserror::Error;

/// Errors from the durable stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
