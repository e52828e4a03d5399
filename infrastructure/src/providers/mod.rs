//! Completion service adapters

mod openai_gateway;

pub use openai_gateway::OpenAiGateway;
