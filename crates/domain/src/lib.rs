//! agent-router domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `tool`: The structured-output tool a routing model is asked to call

pub mod model;
pub mod ports;
pub mod tool;

pub use model::*;
pub use ports::*;
pub use tool::{ANALYZE_PROMPT_TOOL, ToolInput, ToolSpec};
