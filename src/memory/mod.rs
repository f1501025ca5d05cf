//! Long-lived memory and the bridge that archives sessions into it

mod bridge;
mod service;

pub use bridge::MemoryBridge;
pub use service::{InMemoryMemoryService, MemoryEntry, MemoryService};
