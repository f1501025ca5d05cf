//! Session service
//!
//! Sessions are registered under (app name, user id, session id) and carry the
//! typed research state plus the transcript of the turns that happened in them.
//! The memory bridge reads complete sessions back from here when it archives.

use super::state::SessionState;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identity of a session inside the service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.app_name, self.user_id, self.session_id)
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// `"user"` or the name of the agent that produced the text
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A complete session as held by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub key: SessionKey,
    /// Research state, absent until the first turn
    pub state: Option<SessionState>,
    pub events: Vec<SessionEvent>,
    pub last_update_time: DateTime<Utc>,
}

impl Session {
    fn new(key: SessionKey) -> Self {
        Self {
            key,
            state: None,
            events: Vec::new(),
            last_update_time: Utc::now(),
        }
    }
}

/// Registry of live sessions
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Register a new session. A generated id is used when `session_id` is `None`.
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Session>;

    /// Fetch a complete session
    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>>;

    /// Append a transcript event
    async fn append_event(&self, key: &SessionKey, event: SessionEvent) -> Result<()>;

    /// Replace the stored research state
    async fn update_state(&self, key: &SessionKey, state: SessionState) -> Result<()>;

    /// All sessions of one user
    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>>;
}

/// Process-local session service
#[derive(Clone, Default)]
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<SessionKey, Session>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn with_session<F>(&self, key: &SessionKey, update: F) -> Result<()>
    where
        F: FnOnce(&mut Session) + Send,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(key)
            .ok_or_else(|| Error::Session(format!("session {} not found", key)))?;
        update(session);
        session.last_update_time = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<Session> {
        let id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let key = SessionKey::new(app_name, user_id, id);

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&key) {
            return Err(Error::Session(format!("session {} already exists", key)));
        }

        let session = Session::new(key.clone());
        sessions.insert(key, session.clone());

        tracing::info!("Created session {}", session.key);
        Ok(session)
    }

    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn append_event(&self, key: &SessionKey, event: SessionEvent) -> Result<()> {
        self.with_session(key, |session| session.events.push(event))
            .await
    }

    async fn update_state(&self, key: &SessionKey, state: SessionState) -> Result<()> {
        self.with_session(key, |session| session.state = Some(state))
            .await
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.key.app_name == app_name && s.key.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.last_update_time.cmp(&a.last_update_time));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let service = InMemorySessionService::new();

        let session = service
            .create_session("top_10_agent", "user-1", Some("s-1"))
            .await
            .unwrap();
        assert_eq!(session.key, SessionKey::new("top_10_agent", "user-1", "s-1"));
        assert!(session.state.is_none());
        assert!(session.events.is_empty());

        let fetched = service.get_session(&session.key).await.unwrap().unwrap();
        assert_eq!(fetched.key, session.key);
        assert_eq!(service.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_generates_id() {
        let service = InMemorySessionService::new();
        let a = service.create_session("app", "u", None).await.unwrap();
        let b = service.create_session("app", "u", None).await.unwrap();
        assert_ne!(a.key.session_id, b.key.session_id);
        assert_eq!(service.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_session_rejected() {
        let service = InMemorySessionService::new();
        service.create_session("app", "u", Some("dup")).await.unwrap();

        let err = service
            .create_session("app", "u", Some("dup"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let service = InMemorySessionService::new();
        let key = SessionKey::new("app", "u", "missing");
        assert!(service.get_session(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_event_and_update_state() {
        let service = InMemorySessionService::new();
        let session = service.create_session("app", "u", Some("s")).await.unwrap();

        service
            .append_event(&session.key, SessionEvent::new("user", "best headphones?"))
            .await
            .unwrap();

        let mut state = SessionState::new();
        state.record_search();
        service
            .update_state(&session.key, state.clone())
            .await
            .unwrap();

        let fetched = service.get_session(&session.key).await.unwrap().unwrap();
        assert_eq!(fetched.events.len(), 1);
        assert_eq!(fetched.events[0].author, "user");
        assert_eq!(fetched.state, Some(state));
        assert!(fetched.last_update_time >= session.last_update_time);
    }

    #[tokio::test]
    async fn test_updates_on_unknown_session_fail() {
        let service = InMemorySessionService::new();
        let key = SessionKey::new("app", "u", "ghost");

        let err = service
            .append_event(&key, SessionEvent::new("user", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(_)));

        let err = service
            .update_state(&key, SessionState::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Session(_)));
    }

    #[tokio::test]
    async fn test_list_sessions_scoped_to_user() {
        let service = InMemorySessionService::new();
        service.create_session("app", "alice", Some("1")).await.unwrap();
        service.create_session("app", "alice", Some("2")).await.unwrap();
        service.create_session("app", "bob", Some("3")).await.unwrap();
        service.create_session("other", "alice", Some("4")).await.unwrap();

        let alice = service.list_sessions("app", "alice").await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|s| s.key.user_id == "alice"));

        let bob = service.list_sessions("app", "bob").await.unwrap();
        assert_eq!(bob.len(), 1);
    }

    #[test]
    fn test_session_key_display() {
        let key = SessionKey::new("app", "user", "abc");
        assert_eq!(key.to_string(), "app:user:abc");
    }
}
