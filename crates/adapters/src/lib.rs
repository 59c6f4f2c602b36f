//! agent-router adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `llm`: Routing classifiers (local inference endpoint, stub)
//! - `registry`: In-memory agent registry

mod registry_memory;

pub mod llm;

/// Re-exports for agent registry adapters
pub mod registry {
    pub use crate::registry_memory::InMemoryAgentRegistry;
}
