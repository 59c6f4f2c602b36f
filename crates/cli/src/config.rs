//! Configuration loading and management

use agent_router_adapters::llm::{DEFAULT_TIMEOUT_SECS, InferenceConfig};
use agent_router_domain::Agent;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub inference: InferenceConfig,
}

// Default value functions
fn default_provider() -> String {
    "local".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("AGENT_ROUTER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# agent-router configuration

[classifier]
provider = "local"  # local, stub
api_url = "http://localhost:8080"
model = "llama3.1"
timeout_secs = 45

[classifier.inference]
max_tokens = 1000
# temperature = 0.0
# top_p = 0.9
# stop_sequences = ["</s>"]

[[agents]]
id = "tech"
name = "Tech Support"
description = "Hardware, software and connectivity problems"

[[agents]]
id = "billing"
name = "Billing"
description = "Invoices, payments and refunds"
"#
        .to_string()
    }
}
