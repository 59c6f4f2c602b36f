//! Locally hosted model adapter
//!
//! Sends the input to `<api_url>/generate` together with the `analyzePrompt`
//! tool and turns the model's tool invocation into a [`ClassifierResult`].

use agent_router_domain::{
    ANALYZE_PROMPT_TOOL, AgentRegistry, Classifier, ClassifierResult, ClassifyError,
    ConversationMessage, ToolInput, ToolSpec,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::{DEFAULT_TIMEOUT_SECS, InferenceConfig, InferenceParams};

const TOOLS: &[ToolSpec] = &[ANALYZE_PROMPT_TOOL];

/// Construction options for [`LocalClassifier`]
#[derive(Debug, Clone, Default)]
pub struct LocalClassifierOptions {
    /// Base URL of the inference server
    pub api_url: String,
    /// Model to classify with
    pub model_name: String,
    /// Sampling parameters. `max_tokens` falls back to [`super::DEFAULT_MAX_TOKENS`],
    /// other unset values are left to the server
    pub inference_config: Option<InferenceConfig>,
    /// HTTP request timeout, defaults to [`DEFAULT_TIMEOUT_SECS`]
    pub timeout_secs: Option<u64>,
}

/// Classifier backed by a locally hosted model
pub struct LocalClassifier {
    client: Client,
    api_url: String,
    model_name: String,
    inference: InferenceParams,
    registry: Arc<dyn AgentRegistry>,
}

impl LocalClassifier {
    pub fn new(
        options: LocalClassifierOptions,
        registry: Arc<dyn AgentRegistry>,
    ) -> Result<Self, ClassifyError> {
        let api_url = options.api_url.trim().trim_end_matches('/');
        let model_name = options.model_name.trim();

        if api_url.is_empty() || model_name.is_empty() {
            return Err(ClassifyError::Config(
                "API URL and model name are required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            model_name: model_name.to_string(),
            inference: InferenceParams::from_config(options.inference_config.as_ref()),
            registry,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn inference_params(&self) -> &InferenceParams {
        &self.inference
    }

    async fn call_api(&self, input_text: &str) -> Result<GenerateResponse, ClassifyError> {
        let request = GenerateRequest {
            model: &self.model_name,
            prompt: input_text,
            max_tokens: self.inference.max_tokens,
            temperature: self.inference.temperature,
            top_p: self.inference.top_p,
            stop: self.inference.stop_sequences.as_deref(),
            tools: TOOLS,
        };

        let url = format!("{}/generate", self.api_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifyError::Transport(format!("Request timed out: {}", e))
                } else {
                    ClassifyError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Transport(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClassifyError::Transport(format!("Invalid response body: {}", e)))
    }

    async fn classify_text(&self, input_text: &str) -> Result<ClassifierResult, ClassifyError> {
        let response = self.call_api(input_text).await?;

        let tool_use = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.tool_use)
            .ok_or(ClassifyError::MissingToolUse)?;

        let input = ToolInput::from_value(&tool_use.input)?;
        let selected_agent = self.registry.lookup_agent_by_id(&input.selected_agent)?;

        Ok(ClassifierResult {
            selected_agent,
            confidence: input.confidence,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    tools: &'a [ToolSpec],
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_use: Option<ToolUse>,
}

#[derive(Deserialize)]
struct ToolUse {
    #[serde(default)]
    input: Value,
}

#[async_trait]
impl Classifier for LocalClassifier {
    async fn process_request(
        &self,
        input_text: &str,
        chat_history: &[ConversationMessage],
    ) -> Result<ClassifierResult, ClassifyError> {
        tracing::debug!(
            model = %self.model_name,
            history_len = chat_history.len(),
            "Sending classification request"
        );

        self.classify_text(input_text).await.inspect_err(|e| {
            tracing::error!(
                error = %e,
                kind = e.kind(),
                input = %input_text,
                model = %self.model_name,
                api_url = %self.api_url,
                "Error processing request"
            );
        })
    }
}
