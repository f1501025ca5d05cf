//! Session archival into long-lived memory
//!
//! Archival is best-effort: a missing session or a failing service is logged
//! and reported as `false`, never as an error to the turn that triggered it.

use super::service::MemoryService;
use crate::error::Result;
use crate::session::{SessionKey, SessionService, SessionState};
use std::sync::Arc;

/// Copies complete sessions from the session service into memory
#[derive(Clone)]
pub struct MemoryBridge {
    sessions: Arc<dyn SessionService>,
    memory: Arc<dyn MemoryService>,
}

impl MemoryBridge {
    pub fn new(sessions: Arc<dyn SessionService>, memory: Arc<dyn MemoryService>) -> Self {
        Self { sessions, memory }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionService> {
        &self.sessions
    }

    /// Store `state` on the session, then archive the whole session.
    ///
    /// Returns whether the session reached the memory service.
    pub async fn archive(&self, key: &SessionKey, state: &SessionState) -> bool {
        match self.try_archive(key, state).await {
            Ok(true) => {
                tracing::info!("Session {} saved to memory", key);
                true
            }
            Ok(false) => {
                tracing::warn!("Session {} not found, skipping memory archival", key);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to save session {} to memory: {}", key, e);
                false
            }
        }
    }

    async fn try_archive(&self, key: &SessionKey, state: &SessionState) -> Result<bool> {
        let Some(mut session) = self.sessions.get_session(key).await? else {
            return Ok(false);
        };

        self.sessions.update_state(key, state.clone()).await?;
        session.state = Some(state.clone());

        self.memory.add_session_to_memory(&session).await?;
        Ok(true)
    }
}
