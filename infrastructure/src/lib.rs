//! Infrastructure layer: adapters behind the application's ports
//!
//! Providers talk to the external completion service, stores persist briefs
//! and transcripts, and config loads the layered TOML files.

pub mod config;
pub mod logging;
pub mod providers;
pub mod store;

pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlTranscriptLog;
pub use providers::OpenAiGateway;
pub use store::MemoryStore;
