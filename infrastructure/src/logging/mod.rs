//! Durable transcript output

mod jsonl;

pub use jsonl::JsonlTranscriptLog;
