//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

use crate::model::{AgentHandle, ClassifierResult, ConversationMessage};

/// Why a tool invocation's arguments were rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolInputError {
    #[error("tool input is not a JSON object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("confidence `{0}` is not a finite number")]
    InvalidConfidence(String),
}

/// Error type for agent registry lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown agent: {id}")]
    UnknownAgent { id: String },
}

/// Error type for classifier operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("No tool use found in the response")]
    MissingToolUse,
    #[error("Tool input does not match expected structure: {0}")]
    MalformedToolInput(#[from] ToolInputError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ClassifyError {
    /// Short stable label, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Config(_) => "config",
            ClassifyError::Transport(_) => "transport",
            ClassifyError::MissingToolUse => "missing_tool_use",
            ClassifyError::MalformedToolInput(_) => "malformed_tool_input",
            ClassifyError::Registry(RegistryError::UnknownAgent { .. }) => "unknown_agent",
        }
    }
}

/// Port for routing classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Pick the agent that should handle `input_text`
    async fn process_request(
        &self,
        input_text: &str,
        chat_history: &[ConversationMessage],
    ) -> Result<ClassifierResult, ClassifyError>;

    /// Same as [`Classifier::process_request`], with a timing trace
    async fn classify(
        &self,
        input_text: &str,
        chat_history: &[ConversationMessage],
    ) -> Result<ClassifierResult, ClassifyError> {
        let started = Instant::now();
        let result = self.process_request(input_text, chat_history).await?;

        tracing::debug!(
            agent_id = %result.selected_agent.id,
            confidence = result.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Classified input"
        );

        Ok(result)
    }
}

/// Port for resolving agent identifiers
pub trait AgentRegistry: Send + Sync {
    /// Resolve an identifier as returned by a classifier
    fn lookup_agent_by_id(&self, id: &str) -> Result<AgentHandle, RegistryError>;

    /// All registered agents
    fn agents(&self) -> Vec<AgentHandle>;
}
