//! Agent definition types
//!
//! Agents are prompt-configured roles executed by an external agent framework.
//! The crate only describes them; it never calls a model itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The part an agent plays in a research session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Talks to the user, delegates, and writes the final top-5
    Orchestrator,
    /// Finds top 10 lists on the web
    Search,
    /// Turns search results into a consensus analysis
    Analyzer,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Orchestrator => "orchestrator",
            Self::Search => "search",
            Self::Analyzer => "analyzer",
        };
        f.write_str(name)
    }
}

/// Everything the agent framework needs to instantiate one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique agent name, also used as the tool name when wrapped as a tool
    pub name: String,
    pub role: AgentRole,
    pub model: String,
    pub description: String,
    /// System instruction
    pub instruction: String,
    /// Names of the tools the agent may call
    pub tools: Vec<String>,
    /// Names of agents this one can hand the conversation to
    pub sub_agents: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_role_serialization() {
        assert_eq!(
            serde_json::to_string(&AgentRole::Analyzer).unwrap(),
            "\"analyzer\""
        );
        let parsed: AgentRole = serde_json::from_str("\"orchestrator\"").unwrap();
        assert_eq!(parsed, AgentRole::Orchestrator);
        assert_eq!(AgentRole::Search.to_string(), "search");
    }
}
