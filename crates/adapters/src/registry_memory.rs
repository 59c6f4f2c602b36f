//! In-memory agent registry

use agent_router_domain::{Agent, AgentHandle, AgentRegistry, RegistryError, normalize_agent_id};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Agent registry keyed by normalized agent id
pub struct InMemoryAgentRegistry {
    agents: RwLock<BTreeMap<String, AgentHandle>>,
}

impl InMemoryAgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let registry = Self::new();
        for agent in agents {
            registry.register(agent);
        }
        registry
    }

    /// Add an agent, replacing any agent with the same normalized id
    pub fn register(&self, agent: Agent) -> AgentHandle {
        let key = normalize_agent_id(&agent.id);
        let handle = Arc::new(agent);

        let mut agents = self.agents.write().unwrap_or_else(|e| e.into_inner());
        if agents.insert(key, handle.clone()).is_some() {
            tracing::warn!(agent_id = %handle.id, "Replaced previously registered agent");
        }

        handle
    }

    pub fn len(&self) -> usize {
        self.agents.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry for InMemoryAgentRegistry {
    fn lookup_agent_by_id(&self, id: &str) -> Result<AgentHandle, RegistryError> {
        let agents = self.agents.read().unwrap_or_else(|e| e.into_inner());
        agents
            .get(&normalize_agent_id(id))
            .cloned()
            .ok_or_else(|| RegistryError::UnknownAgent { id: id.to_string() })
    }

    fn agents(&self) -> Vec<AgentHandle> {
        let agents = self.agents.read().unwrap_or_else(|e| e.into_inner());
        agents.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = InMemoryAgentRegistry::new();
        let registered = registry.register(Agent::new("TechAgent", "Tech", ""));

        let found = registry.lookup_agent_by_id("techagent").unwrap();
        assert!(Arc::ptr_eq(&found, &registered));

        let found = registry.lookup_agent_by_id("TECHAGENT (hardware)").unwrap();
        assert!(Arc::ptr_eq(&found, &registered));
    }

    #[test]
    fn test_unknown_agent() {
        let registry = InMemoryAgentRegistry::with_agents([Agent::new("tech", "Tech", "")]);

        let result = registry.lookup_agent_by_id("Weather");

        assert_eq!(
            result,
            Err(RegistryError::UnknownAgent {
                id: "Weather".to_string()
            })
        );
    }

    #[test]
    fn test_register_replaces_same_id() {
        let registry = InMemoryAgentRegistry::with_agents([
            Agent::new("tech", "Old", ""),
            Agent::new("Tech", "New", ""),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup_agent_by_id("tech").unwrap().name, "New");
    }

    #[test]
    fn test_agents_are_ordered_by_id() {
        let registry = InMemoryAgentRegistry::with_agents([
            Agent::new("tech", "Tech", ""),
            Agent::new("billing", "Billing", ""),
        ]);

        let ids: Vec<_> = registry.agents().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["billing", "tech"]);
    }
}
