//! Artifact store with file-based JSON persistence
//!
//! Directory layout:
//! ```text
//! agent/artifacts/
//! ├── headphones_search_results_1a2b3c4d.json
//! ├── headphones_analysis_9f8e7d6c.json
//! └── ...
//! ```
//!
//! Every save creates a new file and nothing is ever rewritten. Loads re-read
//! the directory each time, so files dropped in by hand show up immediately and
//! corrupt files are skipped rather than failing the scan.

use super::mirror::ArtifactMirror;
use super::types::*;
use crate::config::StorageConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Hex characters kept from the id hash
const ARTIFACT_ID_LEN: usize = 8;

/// Salted ids tried before giving up on a save
const MAX_ID_ATTEMPTS: u32 = 16;

/// Entries included in `ArtifactSummary::recent_artifacts`
const RECENT_LIMIT: usize = 5;

/// Flat-file store of research artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.artifacts_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Save a new artifact and return its receipt
    pub async fn save(
        &self,
        category: &str,
        artifact_type: ArtifactType,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Result<SaveReceipt> {
        let (receipt, _) = self.write(category, artifact_type, data, Utc::now()).await?;
        Ok(receipt)
    }

    /// Save a new artifact, then copy it to `mirror`.
    ///
    /// Only the local write can fail the call.
    pub async fn save_mirrored(
        &self,
        category: &str,
        artifact_type: ArtifactType,
        data: serde_json::Map<String, serde_json::Value>,
        mirror: &dyn ArtifactMirror,
    ) -> Result<SaveReceipt> {
        let (receipt, document) = self.write(category, artifact_type, data, Utc::now()).await?;

        if let Err(e) = mirror.save_artifact(&receipt.filename, &document).await {
            tracing::warn!(
                "Failed to mirror artifact {} (local copy kept): {}",
                receipt.filename,
                e
            );
        }

        Ok(receipt)
    }

    /// Save with an explicit creation time
    #[cfg(test)]
    pub(crate) async fn save_at(
        &self,
        category: &str,
        artifact_type: ArtifactType,
        data: serde_json::Map<String, serde_json::Value>,
        at: DateTime<Utc>,
    ) -> Result<SaveReceipt> {
        let (receipt, _) = self.write(category, artifact_type, data, at).await?;
        Ok(receipt)
    }

    async fn write(
        &self,
        category: &str,
        artifact_type: ArtifactType,
        data: serde_json::Map<String, serde_json::Value>,
        at: DateTime<Utc>,
    ) -> Result<(SaveReceipt, ArtifactDocument)> {
        if category.trim().is_empty() {
            return Err(Error::Artifact("artifact category is required".to_string()));
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let document = ArtifactDocument {
            category: category.to_string(),
            artifact_type,
            timestamp: iso_timestamp(at),
            data,
        };
        let json = serde_json::to_string_pretty(&document)?;

        for attempt in 0..MAX_ID_ATTEMPTS {
            let artifact_id = artifact_id(
                &document.category,
                &document.artifact_type,
                &document.timestamp,
                attempt,
            );
            let filename =
                artifact_filename(&document.category, &document.artifact_type, &artifact_id);
            let path = self.dir.join(&filename);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!("Artifact id {} already taken, re-salting", artifact_id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let written = async {
                file.write_all(json.as_bytes()).await?;
                file.flush().await
            }
            .await;
            if let Err(e) = written {
                drop(file);
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        "Failed to remove partial artifact {}: {}",
                        path.display(),
                        cleanup
                    );
                }
                return Err(e.into());
            }

            tracing::info!(
                "Saved artifact {} ({} / {})",
                filename,
                document.category,
                document.artifact_type
            );

            let receipt = SaveReceipt {
                status: "saved".to_string(),
                artifact_id,
                filename,
                category: document.category.clone(),
                artifact_type: document.artifact_type.clone(),
            };
            return Ok((receipt, document));
        }

        Err(Error::Artifact(format!(
            "no free artifact id for {}/{} after {} attempts",
            document.category, document.artifact_type, MAX_ID_ATTEMPTS
        )))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read every artifact file, newest first, recording the files that failed
    pub async fn scan(&self) -> ArtifactScan {
        let mut scan = ArtifactScan::default();

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read directory {}: {}", self.dir.display(), e);
                }
                return scan;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to list {}: {}", self.dir.display(), e);
                    break;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let reason = match tokio::fs::read_to_string(&path).await {
                Ok(text) => match serde_json::from_str::<ArtifactDocument>(&text) {
                    Ok(document) => {
                        scan.artifacts.push(document);
                        continue;
                    }
                    Err(e) => format!("parse error: {}", e),
                },
                Err(e) => format!("read error: {}", e),
            };

            tracing::warn!("Skipping artifact file {}: {}", path.display(), reason);
            scan.skipped.push(SkippedFile { path, reason });
        }

        scan.artifacts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        scan
    }

    /// Load artifacts matching `query`, newest first
    pub async fn load(&self, query: &ArtifactQuery) -> Vec<ArtifactDocument> {
        self.scan()
            .await
            .artifacts
            .into_iter()
            .filter(|a| query.matches(a))
            .collect()
    }

    /// Count artifacts by category and type and list the most recent ones
    pub async fn summarize(&self) -> ArtifactSummary {
        let scan = self.scan().await;

        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for artifact in &scan.artifacts {
            *by_category.entry(artifact.category.clone()).or_default() += 1;
            *by_type
                .entry(artifact.artifact_type.as_str().to_string())
                .or_default() += 1;
        }

        let artifacts_directory = std::path::absolute(&self.dir)
            .unwrap_or_else(|_| self.dir.clone())
            .display()
            .to_string();

        ArtifactSummary {
            total_artifacts: scan.artifacts.len(),
            artifacts_directory,
            by_category,
            by_type,
            recent_artifacts: scan
                .artifacts
                .iter()
                .take(RECENT_LIMIT)
                .map(RecentArtifact::from)
                .collect(),
            skipped_files: scan.skipped.len(),
        }
    }
}

/// Short hex id derived from category, type and timestamp.
///
/// `attempt` salts the input after a collision; attempt 0 is unsalted.
fn artifact_id(category: &str, artifact_type: &ArtifactType, timestamp: &str, attempt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}_{}_{}", category, artifact_type, timestamp).as_bytes());
    if attempt > 0 {
        hasher.update(format!("#{}", attempt).as_bytes());
    }
    let mut id = format!("{:x}", hasher.finalize());
    id.truncate(ARTIFACT_ID_LEN);
    id
}

fn artifact_filename(category: &str, artifact_type: &ArtifactType, artifact_id: &str) -> String {
    format!(
        "{}_{}_{}.json",
        filename_component(category),
        filename_component(artifact_type.as_str()),
        artifact_id
    )
}

/// Replace characters that would escape the directory or break file names
fn filename_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}
