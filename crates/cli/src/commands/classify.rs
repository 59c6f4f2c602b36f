//! Classify command - one-shot classification

use agent_router_adapters::{
    llm::{LocalClassifier, LocalClassifierOptions, StubClassifier},
    registry::InMemoryAgentRegistry,
};
use agent_router_domain::{AgentRegistry, Classifier, ConversationMessage};
use anyhow::{Context, Result, bail};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::ClassifyArgs;
use crate::config::AppConfig;

pub async fn execute(args: ClassifyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    // Get text to classify
    let text = get_input_text(&args)?;

    if text.trim().is_empty() {
        bail!("No text provided for classification");
    }

    let history = match args.history {
        Some(ref path) => load_history(path)?,
        None => Vec::new(),
    };

    let registry = build_registry(&config);
    if registry.is_empty() {
        bail!("No agents configured; add [[agents]] entries to the config file");
    }

    tracing::info!(
        agents_count = registry.len(),
        history_len = history.len(),
        text_length = text.len(),
        "Classifying text"
    );

    let classifier = build_classifier(&config, registry)?;
    let result = classifier
        .classify(&text, &history)
        .await
        .context("Classification failed")?;

    // Output results
    if args.json {
        let output = serde_json::json!({
            "selected_agent": result.selected_agent.id,
            "agent_name": result.selected_agent.name,
            "confidence": result.confidence,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Classification Result");
        println!("=====================");
        println!();
        println!(
            "Agent: {} ({})",
            result.selected_agent.name, result.selected_agent.id
        );
        println!("Confidence: {:.2}", result.confidence);
    }

    Ok(())
}

pub(crate) fn build_registry(config: &AppConfig) -> Arc<InMemoryAgentRegistry> {
    Arc::new(InMemoryAgentRegistry::with_agents(config.agents.iter().cloned()))
}

pub(crate) fn build_classifier(
    config: &AppConfig,
    registry: Arc<dyn AgentRegistry>,
) -> Result<Box<dyn Classifier>> {
    let classifier = &config.classifier;

    match classifier.provider.as_str() {
        "local" => {
            let options = LocalClassifierOptions {
                api_url: classifier.api_url.clone(),
                model_name: classifier.model.clone(),
                inference_config: Some(classifier.inference.clone()),
                timeout_secs: Some(classifier.timeout_secs),
            };
            Ok(Box::new(
                LocalClassifier::new(options, registry)
                    .context("Failed to configure local classifier")?,
            ))
        }
        "stub" => Ok(Box::new(StubClassifier::echo(registry))),
        other => bail!("Unknown classifier provider: {}", other),
    }
}

fn load_history(path: &Path) -> Result<Vec<ConversationMessage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid history file: {}", path.display()))
}

fn get_input_text(args: &ClassifyArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        if path.as_os_str() == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            return Ok(text);
        }

        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    // Default to stdin if no input specified
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}
