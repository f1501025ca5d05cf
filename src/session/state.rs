//! Per-session research bookkeeping
//!
//! `SessionState` is created on the first turn of a session and then mutated by
//! the turn hooks. Counters only ever go up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the generated session token
const SESSION_TOKEN_LEN: usize = 8;

/// Counters and timestamps for one research session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    session_id: String,
    searches_count: u32,
    artifacts_saved: u32,
    start_time: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    #[serde(default)]
    analyzer_completed: bool,
    #[serde(default)]
    analysis_time: Option<DateTime<Utc>>,
    #[serde(default)]
    session_saved_to_memory: bool,
}

impl SessionState {
    /// Fresh state with a random short id and zeroed counters
    pub fn new() -> Self {
        let now = Utc::now();
        let mut session_id = Uuid::new_v4().simple().to_string();
        session_id.truncate(SESSION_TOKEN_LEN);

        Self {
            session_id,
            searches_count: 0,
            artifacts_saved: 0,
            start_time: now,
            last_activity: now,
            analyzer_completed: false,
            analysis_time: None,
            session_saved_to_memory: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn searches_count(&self) -> u32 {
        self.searches_count
    }

    pub fn artifacts_saved(&self) -> u32 {
        self.artifacts_saved
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn analyzer_completed(&self) -> bool {
        self.analyzer_completed
    }

    pub fn analysis_time(&self) -> Option<DateTime<Utc>> {
        self.analysis_time
    }

    pub fn session_saved_to_memory(&self) -> bool {
        self.session_saved_to_memory
    }

    /// Update last activity
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Count one search tool invocation, returning the new total
    pub fn record_search(&mut self) -> u32 {
        self.searches_count = self.searches_count.saturating_add(1);
        self.searches_count
    }

    /// Count one artifact save, returning the new total
    pub fn record_artifact_saved(&mut self) -> u32 {
        self.artifacts_saved = self.artifacts_saved.saturating_add(1);
        self.artifacts_saved
    }

    /// Whether the session has used up its searches
    pub fn search_limit_reached(&self, limit: u32) -> bool {
        self.searches_count >= limit
    }

    /// Record that the analyzer produced its analysis
    pub fn mark_analyzer_completed(&mut self) {
        self.analyzer_completed = true;
        self.analysis_time = Some(Utc::now());
    }

    pub fn mark_saved_to_memory(&mut self) {
        self.session_saved_to_memory = true;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            searches_count: self.searches_count,
            artifacts_saved: self.artifacts_saved,
            start_time: self.start_time.to_rfc3339(),
            last_activity: self.last_activity.to_rfc3339(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat view of a session's counters for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub searches_count: u32,
    pub artifacts_saved: u32,
    pub start_time: String,
    pub last_activity: String,
}

impl SessionSummary {
    /// Summary for a session whose state was never initialized
    pub fn unknown() -> Self {
        Self {
            session_id: "unknown".to_string(),
            searches_count: 0,
            artifacts_saved: 0,
            start_time: "unknown".to_string(),
            last_activity: "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = SessionState::new();
        assert_eq!(state.session_id().len(), 8);
        assert!(state.session_id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(state.searches_count(), 0);
        assert_eq!(state.artifacts_saved(), 0);
        assert_eq!(state.start_time(), state.last_activity());
        assert!(!state.analyzer_completed());
        assert!(state.analysis_time().is_none());
        assert!(!state.session_saved_to_memory());
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(SessionState::new().session_id(), SessionState::new().session_id());
    }

    #[test]
    fn test_counters_and_limit() {
        let mut state = SessionState::new();
        for expected in 1..=4 {
            assert_eq!(state.record_search(), expected);
            assert!(!state.search_limit_reached(5));
        }
        state.record_search();
        assert!(state.search_limit_reached(5));

        assert_eq!(state.record_artifact_saved(), 1);
        assert_eq!(state.artifacts_saved(), 1);
    }

    #[test]
    fn test_touch_moves_forward() {
        let mut state = SessionState::new();
        let before = state.last_activity();
        state.touch();
        assert!(state.last_activity() >= before);
        assert_eq!(state.start_time(), before);
    }

    #[test]
    fn test_mark_analyzer_completed() {
        let mut state = SessionState::new();
        state.mark_analyzer_completed();
        assert!(state.analyzer_completed());
        assert!(state.analysis_time().is_some());
    }

    #[test]
    fn test_summary() {
        let mut state = SessionState::new();
        state.record_search();
        state.record_artifact_saved();
        state.record_artifact_saved();

        let summary = state.summary();
        assert_eq!(summary.session_id, state.session_id());
        assert_eq!(summary.searches_count, 1);
        assert_eq!(summary.artifacts_saved, 2);

        assert_eq!(SessionSummary::unknown().session_id, "unknown");
    }

    #[test]
    fn test_state_serialization() {
        let mut state = SessionState::new();
        state.record_search();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["searches_count"], 1);
        assert!(json["start_time"].is_string());

        let parsed: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, state);
    }
}
