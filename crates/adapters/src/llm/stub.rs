//! Stub classifier for testing and offline mode

use agent_router_domain::{
    AgentRegistry, Classifier, ClassifierResult, ClassifyError, ConversationMessage,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Confidence reported by echo mode
const ECHO_CONFIDENCE: f64 = 0.75;

enum StubMode {
    Fixed(ClassifierResult),
    Error(ClassifyError),
    Echo(Arc<dyn AgentRegistry>),
}

/// Stub classifier that returns configurable responses
pub struct StubClassifier {
    mode: StubMode,
}

impl StubClassifier {
    /// Create a stub that always returns `result`
    pub fn with_result(result: ClassifierResult) -> Self {
        Self {
            mode: StubMode::Fixed(result),
        }
    }

    /// Create a stub that always returns an error
    pub fn with_error(error: ClassifyError) -> Self {
        Self {
            mode: StubMode::Error(error),
        }
    }

    /// Create a stub that picks the first agent whose id or name appears in
    /// the input. Input that mentions no agent behaves like a model that
    /// declined to call the tool.
    pub fn echo(registry: Arc<dyn AgentRegistry>) -> Self {
        Self {
            mode: StubMode::Echo(registry),
        }
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn process_request(
        &self,
        input_text: &str,
        _chat_history: &[ConversationMessage],
    ) -> Result<ClassifierResult, ClassifyError> {
        match &self.mode {
            StubMode::Fixed(result) => Ok(result.clone()),
            StubMode::Error(error) => Err(error.clone()),
            StubMode::Echo(registry) => {
                let input_lower = input_text.to_lowercase();

                registry
                    .agents()
                    .into_iter()
                    .find(|agent| {
                        [&agent.id, &agent.name].into_iter().any(|needle| {
                            !needle.is_empty() && input_lower.contains(&needle.to_lowercase())
                        })
                    })
                    .map(|selected_agent| ClassifierResult {
                        selected_agent,
                        confidence: ECHO_CONFIDENCE,
                    })
                    .ok_or(ClassifyError::MissingToolUse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryAgentRegistry;
    use agent_router_domain::Agent;

    fn sample_registry() -> Arc<InMemoryAgentRegistry> {
        Arc::new(InMemoryAgentRegistry::with_agents([
            Agent::new("tech", "Tech Support", "Hardware and software issues"),
            Agent::new("billing", "Billing", "Invoices and payments"),
        ]))
    }

    #[tokio::test]
    async fn test_fixed_result() {
        let expected = ClassifierResult {
            selected_agent: Arc::new(Agent::new("custom", "Custom", "")),
            confidence: 0.99,
        };

        let classifier = StubClassifier::with_result(expected.clone());
        let result = classifier.process_request("anything", &[]).await.unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_error_stub() {
        let classifier = StubClassifier::with_error(ClassifyError::Transport("down".to_string()));
        let result = classifier.process_request("anything", &[]).await;

        assert_eq!(result, Err(ClassifyError::Transport("down".to_string())));
    }

    #[tokio::test]
    async fn test_echo_matches_agent_name() {
        let classifier = StubClassifier::echo(sample_registry());
        let result = classifier
            .process_request("I need TECH SUPPORT for my printer", &[])
            .await
            .unwrap();

        assert_eq!(result.selected_agent.id, "tech");
        assert_eq!(result.confidence, ECHO_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_echo_without_match() {
        let classifier = StubClassifier::echo(sample_registry());
        let result = classifier.process_request("what's the weather?", &[]).await;

        assert_eq!(result, Err(ClassifyError::MissingToolUse));
    }

    #[tokio::test]
    async fn test_echo_ignores_blank_names() {
        let registry = Arc::new(InMemoryAgentRegistry::with_agents([
            Agent::new("", "", "Unnamed"),
            Agent::new("x1", "", "No display name"),
        ]));
        let classifier = StubClassifier::echo(registry);

        let result = classifier.process_request("what's the weather?", &[]).await;
        assert_eq!(result, Err(ClassifyError::MissingToolUse));

        let result = classifier.process_request("route to X1 please", &[]).await.unwrap();
        assert_eq!(result.selected_agent.id, "x1");
    }
}
