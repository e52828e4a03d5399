//! Application layer: ports and use cases
//!
//! Orchestrates the domain model behind trait ports. Infrastructure plugs in
//! gateways and stores; presentation plugs in progress reporting and the
//! control handle.

pub mod control;
pub mod ports;
pub mod use_cases;

pub use control::{ControlReceiver, ControlSignal, DebateControl, control_channel};
pub use ports::StoreError;
