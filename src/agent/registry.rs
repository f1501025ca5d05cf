//! Builtin agent definitions and lookup by name

use super::prompts::{ANALYZER_INSTRUCTION, ORCHESTRATOR_INSTRUCTION, SEARCH_INSTRUCTION};
use super::types::{AgentDefinition, AgentRole};
use crate::config::AgentsConfig;
use crate::tools::{GET_ARTIFACT_SUMMARY, LOAD_RESEARCH_ARTIFACTS, SAVE_RESEARCH_ARTIFACT};

pub const ORCHESTRATOR_AGENT: &str = "top_10_orchestrator";
pub const SEARCH_AGENT: &str = "search_specialist";
pub const ANALYZER_AGENT: &str = "list_analyzer";

/// Framework-provided tools referenced by the builtin agents
pub const GOOGLE_SEARCH: &str = "google_search";
const LOAD_MEMORY: &str = "load_memory";
const PRELOAD_MEMORY: &str = "preload_memory";
const LOAD_ARTIFACTS: &str = "load_artifacts";

/// The set of agents available to a research session
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<AgentDefinition>,
}

impl AgentRegistry {
    /// The orchestrator, search and analyzer agents
    pub fn builtin(config: &AgentsConfig) -> Self {
        Self {
            agents: builtin_agents(&config.model),
        }
    }

    /// Get an agent by name
    pub fn get(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Role of the named agent
    pub fn role_of(&self, name: &str) -> Option<AgentRole> {
        self.get(name).map(|a| a.role)
    }

    /// First agent with the given role
    pub fn by_role(&self, role: AgentRole) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.role == role)
    }

    /// The agent that receives user messages
    pub fn root(&self) -> Option<&AgentDefinition> {
        self.by_role(AgentRole::Orchestrator)
    }

    pub fn list(&self) -> &[AgentDefinition] {
        &self.agents
    }
}

fn builtin_agents(model: &str) -> Vec<AgentDefinition> {
    vec![
        AgentDefinition {
            name: ORCHESTRATOR_AGENT.to_string(),
            role: AgentRole::Orchestrator,
            model: model.to_string(),
            description: "Coordinates the search for top 10 lists and delivers an expert top 5"
                .to_string(),
            instruction: ORCHESTRATOR_INSTRUCTION.to_string(),
            tools: vec![
                LOAD_MEMORY.to_string(),
                PRELOAD_MEMORY.to_string(),
                LOAD_ARTIFACTS.to_string(),
                SAVE_RESEARCH_ARTIFACT.to_string(),
                LOAD_RESEARCH_ARTIFACTS.to_string(),
                GET_ARTIFACT_SUMMARY.to_string(),
                SEARCH_AGENT.to_string(),
            ],
            sub_agents: vec![ANALYZER_AGENT.to_string()],
        },
        AgentDefinition {
            name: SEARCH_AGENT.to_string(),
            role: AgentRole::Search,
            model: model.to_string(),
            description: "Finds curated top 10 lists from credible review sources".to_string(),
            instruction: SEARCH_INSTRUCTION.to_string(),
            tools: vec![GOOGLE_SEARCH.to_string()],
            sub_agents: Vec::new(),
        },
        AgentDefinition {
            name: ANALYZER_AGENT.to_string(),
            role: AgentRole::Analyzer,
            model: model.to_string(),
            description: "Identifies consensus picks across top 10 lists".to_string(),
            instruction: ANALYZER_INSTRUCTION.to_string(),
            tools: Vec::new(),
            sub_agents: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_agents() {
        let registry = AgentRegistry::builtin(&AgentsConfig::default());
        assert_eq!(registry.list().len(), 3);

        let root = registry.root().unwrap();
        assert_eq!(root.name, ORCHESTRATOR_AGENT);
        assert!(root.tools.iter().any(|t| t == SAVE_RESEARCH_ARTIFACT));
        assert!(root.tools.iter().any(|t| t == SEARCH_AGENT));
        assert_eq!(root.sub_agents, vec![ANALYZER_AGENT]);

        let search = registry.get(SEARCH_AGENT).unwrap();
        assert_eq!(search.tools, vec![GOOGLE_SEARCH]);

        let analyzer = registry.by_role(AgentRole::Analyzer).unwrap();
        assert_eq!(analyzer.name, ANALYZER_AGENT);
        assert!(analyzer.tools.is_empty());
    }

    #[test]
    fn test_role_lookup() {
        let registry = AgentRegistry::builtin(&AgentsConfig::default());
        assert_eq!(registry.role_of(ANALYZER_AGENT), Some(AgentRole::Analyzer));
        assert_eq!(registry.role_of(SEARCH_AGENT), Some(AgentRole::Search));
        assert_eq!(registry.role_of("unknown_agent"), None);
    }

    #[test]
    fn test_model_from_config() {
        let config = AgentsConfig {
            model: "gemini-2.5-pro".to_string(),
        };
        let registry = AgentRegistry::builtin(&config);
        assert!(registry.list().iter().all(|a| a.model == "gemini-2.5-pro"));
    }

    #[test]
    fn test_instructions_mention_their_tools() {
        let registry = AgentRegistry::builtin(&AgentsConfig::default());
        let root = registry.root().unwrap();
        assert!(root.instruction.contains(SEARCH_AGENT));
        assert!(root.instruction.contains(ANALYZER_AGENT));
        assert!(root.instruction.contains(SAVE_RESEARCH_ARTIFACT));
    }
}
