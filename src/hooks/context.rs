//! Per-turn callback context

use crate::agent::{AgentDefinition, AgentRole};
use crate::session::{SessionKey, SessionState, SessionSummary};

/// Which agent is running, and in which session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub key: SessionKey,
    pub agent_name: String,
    pub role: AgentRole,
}

impl Invocation {
    pub fn new(key: SessionKey, agent_name: impl Into<String>, role: AgentRole) -> Self {
        Self {
            key,
            agent_name: agent_name.into(),
            role,
        }
    }

    pub fn for_agent(key: SessionKey, agent: &AgentDefinition) -> Self {
        Self::new(key, agent.name.clone(), agent.role)
    }
}

/// State handed to every hook of a session.
///
/// The host keeps one context per session and switches the active agent when
/// the conversation is delegated.
#[derive(Debug, Clone)]
pub struct CallbackContext {
    invocation: Invocation,
    state: Option<SessionState>,
}

impl CallbackContext {
    /// Context for a session that has not run a turn yet
    pub fn new(invocation: Invocation) -> Self {
        Self {
            invocation,
            state: None,
        }
    }

    /// Context resuming previously stored state
    pub fn with_state(invocation: Invocation, state: Option<SessionState>) -> Self {
        Self { invocation, state }
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Hand the session to another agent
    pub fn set_agent(&mut self, agent: &AgentDefinition) {
        self.invocation.agent_name = agent.name.clone();
        self.invocation.role = agent.role;
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn into_state(self) -> Option<SessionState> {
        self.state
    }

    /// Whether the state was created during this call
    pub(crate) fn ensure_state(&mut self) -> (&mut SessionState, bool) {
        let created = self.state.is_none();
        (self.state.get_or_insert_with(SessionState::new), created)
    }

    pub fn session_summary(&self) -> SessionSummary {
        self.state
            .as_ref()
            .map(SessionState::summary)
            .unwrap_or_else(SessionSummary::unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRegistry;
    use crate::config::AgentsConfig;

    fn invocation() -> Invocation {
        Invocation::new(
            SessionKey::new("top_10_agent", "user-1", "s-1"),
            "top_10_orchestrator",
            AgentRole::Orchestrator,
        )
    }

    #[test]
    fn test_new_context_has_no_state() {
        let ctx = CallbackContext::new(invocation());
        assert!(ctx.state().is_none());
        assert_eq!(ctx.session_summary(), SessionSummary::unknown());
    }

    #[test]
    fn test_ensure_state_creates_once() {
        let mut ctx = CallbackContext::new(invocation());

        let (state, created) = ctx.ensure_state();
        assert!(created);
        state.record_search();
        let id = state.session_id().to_string();

        let (state, created) = ctx.ensure_state();
        assert!(!created);
        assert_eq!(state.session_id(), id);
        assert_eq!(state.searches_count(), 1);
    }

    #[test]
    fn test_set_agent_switches_role() {
        let registry = AgentRegistry::builtin(&AgentsConfig::default());
        let mut ctx = CallbackContext::new(invocation());

        ctx.set_agent(registry.by_role(AgentRole::Analyzer).unwrap());
        assert_eq!(ctx.invocation().role, AgentRole::Analyzer);
        assert_eq!(ctx.invocation().agent_name, "list_analyzer");
        assert_eq!(ctx.invocation().key.session_id, "s-1");
    }

    #[test]
    fn test_resume_with_state() {
        let mut state = SessionState::new();
        state.record_artifact_saved();
        let ctx = CallbackContext::with_state(invocation(), Some(state.clone()));
        assert_eq!(ctx.session_summary().artifacts_saved, 1);
        assert_eq!(ctx.into_state(), Some(state));
    }
}
