//! Long-lived memory of archived sessions
//!
//! Archived sessions outlive the session service and are recalled by later
//! sessions through keyword search, e.g. "have we researched headphones before?".

use crate::error::Result;
use crate::session::{Session, SessionKey};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One remembered transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub session_id: String,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Store of archived sessions
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// Archive a complete session. Re-archiving replaces the earlier copy.
    async fn add_session_to_memory(&self, session: &Session) -> Result<()>;

    /// Entries of one user that mention any word of `query`
    async fn search_memory(
        &self,
        app_name: &str,
        user_id: &str,
        query: &str,
    ) -> Result<Vec<MemoryEntry>>;
}

type UserKey = (String, String);

/// Process-local memory service
#[derive(Clone, Default)]
pub struct InMemoryMemoryService {
    /// (app, user) -> session id -> entries
    sessions: Arc<RwLock<HashMap<UserKey, HashMap<String, Vec<MemoryEntry>>>>>,
}

impl InMemoryMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session has been archived
    pub async fn contains_session(&self, key: &SessionKey) -> bool {
        self.sessions
            .read()
            .await
            .get(&(key.app_name.clone(), key.user_id.clone()))
            .is_some_and(|s| s.contains_key(&key.session_id))
    }
}

#[async_trait]
impl MemoryService for InMemoryMemoryService {
    async fn add_session_to_memory(&self, session: &Session) -> Result<()> {
        let entries: Vec<MemoryEntry> = session
            .events
            .iter()
            .filter(|e| !e.text.trim().is_empty())
            .map(|e| MemoryEntry {
                session_id: session.key.session_id.clone(),
                author: e.author.clone(),
                text: e.text.clone(),
                timestamp: e.timestamp,
            })
            .collect();

        tracing::debug!(
            "Archiving session {} ({} entries)",
            session.key,
            entries.len()
        );

        self.sessions
            .write()
            .await
            .entry((session.key.app_name.clone(), session.key.user_id.clone()))
            .or_default()
            .insert(session.key.session_id.clone(), entries);
        Ok(())
    }

    async fn search_memory(
        &self,
        app_name: &str,
        user_id: &str,
        query: &str,
    ) -> Result<Vec<MemoryEntry>> {
        let wanted = words(query);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let sessions = self.sessions.read().await;
        let Some(user_sessions) = sessions.get(&(app_name.to_string(), user_id.to_string()))
        else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<MemoryEntry> = user_sessions
            .values()
            .flatten()
            .filter(|entry| !words(&entry.text).is_disjoint(&wanted))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(matches)
    }
}

/// Lowercased alphanumeric words
fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
