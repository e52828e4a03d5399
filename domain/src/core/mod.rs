//! Core domain primitives shared across modules

pub mod error;
pub mod model;

pub use error::DomainError;
pub use model::{CostTier, ModelCapabilities, ModelId, ModelOption, TokenBudgetParam};
