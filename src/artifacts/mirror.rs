//! Secondary artifact persistence
//!
//! The agent framework usually keeps its own per-session artifact list. After a
//! local save succeeds the store forwards the document to an `ArtifactMirror`.
//! The local file stays authoritative: mirror failures are logged by the store
//! and never reach the caller.

use super::types::ArtifactDocument;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Destination for copies of saved artifacts
#[async_trait]
pub trait ArtifactMirror: Send + Sync {
    /// Store a copy of `document` under `filename`
    async fn save_artifact(&self, filename: &str, document: &ArtifactDocument) -> Result<()>;
}

/// Mirror that keeps pretty-printed copies in memory, keyed by file name
#[derive(Clone, Default)]
pub struct InMemoryArtifactMirror {
    artifacts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryArtifactMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mirrored JSON text for a file name
    pub async fn get(&self, filename: &str) -> Option<String> {
        self.artifacts.read().await.get(filename).cloned()
    }
}

#[async_trait]
impl ArtifactMirror for InMemoryArtifactMirror {
    async fn save_artifact(&self, filename: &str, document: &ArtifactDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        self.artifacts
            .write()
            .await
            .insert(filename.to_string(), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::types::ArtifactType;

    #[tokio::test]
    async fn test_in_memory_mirror_keeps_json_text() {
        let mirror = InMemoryArtifactMirror::new();
        let document = ArtifactDocument {
            category: "monitors".to_string(),
            artifact_type: ArtifactType::Recommendations,
            timestamp: "2025-05-01T10:00:00.000000Z".to_string(),
            data: serde_json::Map::new(),
        };

        mirror
            .save_artifact("monitors_recommendations_abcd1234.json", &document)
            .await
            .unwrap();

        let text = mirror
            .get("monitors_recommendations_abcd1234.json")
            .await
            .unwrap();
        let parsed: ArtifactDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, document);
        assert!(mirror.get("missing.json").await.is_none());
    }
}
