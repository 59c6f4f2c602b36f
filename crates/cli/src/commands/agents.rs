//! Agents command - inspect configured agents

use anyhow::Result;
use std::path::PathBuf;

use super::classify::build_registry;
use crate::args::{AgentsArgs, AgentsCommands};
use crate::config::AppConfig;
use agent_router_domain::AgentRegistry;

pub async fn execute(args: AgentsArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        AgentsCommands::List { json } => list_agents(json, config_path).await,
    }
}

async fn list_agents(json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let agents = build_registry(&config).agents();

    if json {
        let output = serde_json::json!({
            "count": agents.len(),
            "agents": agents.iter().map(|a| a.as_ref()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Agents ({} configured)", agents.len());
        println!("==================");
        println!();

        for agent in &agents {
            println!("ID: {}", agent.id);
            println!("  Name: {}", agent.name);
            if !agent.description.is_empty() {
                println!("  Description: {}", agent.description);
            }
            println!();
        }
    }

    Ok(())
}
