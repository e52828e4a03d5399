//! Durable stores behind the application's repository ports

mod memory;

pub use memory::MemoryStore;
