//! Layered TOML configuration

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileDebateConfig, FileGatewayConfig, FileMinisterConfig};
pub use loader::ConfigLoader;
