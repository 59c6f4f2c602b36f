//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An agent that classified input can be routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Routing identifier, matched case-insensitively
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// What the agent handles; shown to operators
    #[serde(default)]
    pub description: String,
}

impl Agent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Shared reference to a registry-owned agent
pub type AgentHandle = Arc<Agent>;

/// Reduce an agent identifier to its lookup key.
///
/// Models tend to answer with `"tech_agent"`, `"Tech_Agent"` or
/// `"tech_agent (handles hardware)"`; all three map to `tech_agent`.
pub fn normalize_agent_id(id: &str) -> String {
    id.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    User,
    Assistant,
}

/// A prior turn of the conversation being classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: ParticipantRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ParticipantRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ParticipantRole::Assistant,
            content: content.into(),
        }
    }
}

/// Outcome of classifying one input
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierResult {
    /// Agent the input should be routed to
    pub selected_agent: AgentHandle,
    /// Score reported by the model. Not clamped to [0, 1].
    pub confidence: f64,
}
