//! Turn lifecycle hooks
//!
//! The agent framework calls these around every agent turn and every model
//! call. They keep the session counters current, enforce the per-session search
//! limit, and archive the session once the analyzer has produced its analysis.

use super::context::{CallbackContext, Invocation};
use crate::agent::{AgentDefinition, AgentRole, LlmRequest, LlmResponse, ModelContent};
use crate::config::{MemoryConfig, SessionConfig};
use crate::error::Result;
use crate::memory::{MemoryBridge, MemoryService};
use crate::session::{SessionEvent, SessionService};
use std::sync::Arc;

/// What a tool invocation counts towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolKind {
    Search,
    ArtifactSave,
    Other,
}

/// Session bookkeeping hooks for one host process
#[derive(Clone)]
pub struct SessionHooks {
    config: SessionConfig,
    archive_on_analysis: bool,
    app_name: String,
    default_user_id: String,
    bridge: MemoryBridge,
}

impl SessionHooks {
    pub fn new(
        session: &SessionConfig,
        memory: &MemoryConfig,
        sessions: Arc<dyn SessionService>,
        memory_service: Arc<dyn MemoryService>,
    ) -> Self {
        Self {
            config: session.clone(),
            archive_on_analysis: memory.enabled,
            app_name: memory.app_name.clone(),
            default_user_id: memory.default_user_id.clone(),
            bridge: MemoryBridge::new(sessions, memory_service),
        }
    }

    /// Register a new session under the configured app name and return the
    /// context its turns run with.
    ///
    /// `user_id` falls back to the configured default user.
    pub async fn start_session(
        &self,
        user_id: Option<&str>,
        session_id: Option<&str>,
        agent: &AgentDefinition,
    ) -> Result<CallbackContext> {
        let user_id = user_id.unwrap_or(self.default_user_id.as_str());
        let session = self
            .bridge
            .sessions()
            .create_session(&self.app_name, user_id, session_id)
            .await?;
        Ok(CallbackContext::new(Invocation::for_agent(session.key, agent)))
    }

    /// Before the agent runs.
    ///
    /// Returns a refusal to send instead of running the turn once the session
    /// has used up its searches.
    pub async fn before_agent(&self, ctx: &mut CallbackContext) -> Option<ModelContent> {
        let agent = ctx.invocation().agent_name.clone();
        let (state, created) = ctx.ensure_state();
        if created {
            tracing::info!(
                "Initialized session state {} for agent {}",
                state.session_id(),
                agent
            );
        }
        state.touch();

        if state.search_limit_reached(self.config.search_limit) {
            tracing::info!(
                "Session {} reached the search limit ({}), refusing turn",
                state.session_id(),
                self.config.search_limit
            );
            return Some(ModelContent::text(self.config.refusal_message()));
        }

        None
    }

    /// After the agent finished its turn
    pub async fn after_agent(&self, ctx: &mut CallbackContext) {
        let (state, _) = ctx.ensure_state();
        state.touch();
        let snapshot = state.clone();

        let key = &ctx.invocation().key;
        if let Err(e) = self.bridge.sessions().update_state(key, snapshot).await {
            tracing::debug!("Could not store state for session {}: {}", key, e);
        }
    }

    /// Before each model call. Nothing is tracked here yet.
    pub async fn before_model(&self, ctx: &mut CallbackContext, request: &LlmRequest) {
        tracing::trace!(
            "Model call by {} ({} messages, {} tools)",
            ctx.invocation().agent_name,
            request.contents.len(),
            request.tools.len()
        );
    }

    /// After each model call
    pub async fn after_model(&self, ctx: &mut CallbackContext, response: &LlmResponse) {
        let (state, _) = ctx.ensure_state();
        state.touch();

        for name in response.tool_calls() {
            match self.classify(name) {
                ToolKind::Search => {
                    let count = state.record_search();
                    tracing::debug!("Search via {} ({} this session)", name, count);
                }
                ToolKind::ArtifactSave => {
                    let count = state.record_artifact_saved();
                    tracing::debug!("Artifact save ({} this session)", count);
                }
                ToolKind::Other => {}
            }
        }

        if !response.has_content() {
            return;
        }

        let invocation = ctx.invocation().clone();
        let text = response.text();
        if !text.trim().is_empty() {
            let event = SessionEvent::new(invocation.agent_name.clone(), text);
            if let Err(e) = self.bridge.sessions().append_event(&invocation.key, event).await {
                tracing::debug!("Could not record response for session {}: {}", invocation.key, e);
            }
        }

        if invocation.role != AgentRole::Analyzer {
            return;
        }

        let (state, _) = ctx.ensure_state();
        state.mark_analyzer_completed();
        if !self.archive_on_analysis {
            return;
        }

        let snapshot = state.clone();
        if self.bridge.archive(&invocation.key, &snapshot).await {
            state.mark_saved_to_memory();
        }
    }

    fn classify(&self, tool_name: &str) -> ToolKind {
        if self.config.search_tools.iter().any(|t| t == tool_name) {
            ToolKind::Search
        } else if self.config.artifact_tools.iter().any(|t| t == tool_name) {
            ToolKind::ArtifactSave
        } else {
            ToolKind::Other
        }
    }
}
