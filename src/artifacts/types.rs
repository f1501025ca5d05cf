//! Research artifact data types
//!
//! An artifact is an immutable JSON record of research data tagged by product
//! category and artifact type. The on-disk document is exactly
//! `{category, type, timestamp, data}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// The kind of research data an artifact holds.
///
/// The three named variants are the ones the builtin agents produce. Any other
/// string is kept verbatim as `Other` so documents written by other tools
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactType {
    /// Raw findings from the search agent
    SearchResults,
    /// Consensus analysis from the analyzer agent
    Analysis,
    /// Final top-5 recommendations from the orchestrator
    Recommendations,
    /// Any other type name
    Other(String),
}

impl ArtifactType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SearchResults => "search_results",
            Self::Analysis => "analysis",
            Self::Recommendations => "recommendations",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ArtifactType {
    fn from(value: &str) -> Self {
        match value {
            "search_results" => Self::SearchResults,
            "analysis" => Self::Analysis,
            "recommendations" => Self::Recommendations,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ArtifactType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ArtifactType> for String {
    fn from(value: ArtifactType) -> Self {
        match value {
            ArtifactType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored artifact document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDocument {
    /// Product category being researched
    pub category: String,
    /// Artifact type
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    /// ISO-8601 creation time; ordering key for loads
    #[serde(default)]
    pub timestamp: String,
    /// Caller-supplied payload
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// Always `"saved"`
    pub status: String,
    /// Short hex identifier
    pub artifact_id: String,
    /// File name inside the artifacts directory
    pub filename: String,
    pub category: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
}

/// Filter for [`ArtifactStore::load`](super::ArtifactStore::load).
///
/// Empty fields match everything; set fields must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactQuery {
    pub category: Option<String>,
    pub artifact_type: Option<ArtifactType>,
}

impl ArtifactQuery {
    /// Query matching every artifact
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to one artifact type
    pub fn artifact_type(mut self, artifact_type: impl Into<ArtifactType>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn matches(&self, document: &ArtifactDocument) -> bool {
        if let Some(category) = &self.category {
            if &document.category != category {
                return false;
            }
        }
        if let Some(artifact_type) = &self.artifact_type {
            if &document.artifact_type != artifact_type {
                return false;
            }
        }
        true
    }
}

/// A file that was present in the artifacts directory but could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Unfiltered result of reading the artifacts directory
#[derive(Debug, Clone, Default)]
pub struct ArtifactScan {
    /// Parsed documents, newest first
    pub artifacts: Vec<ArtifactDocument>,
    /// Files that failed to read or parse
    pub skipped: Vec<SkippedFile>,
}

/// Condensed view of an artifact for summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentArtifact {
    pub category: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    pub timestamp: String,
}

impl From<&ArtifactDocument> for RecentArtifact {
    fn from(document: &ArtifactDocument) -> Self {
        Self {
            category: document.category.clone(),
            artifact_type: document.artifact_type.clone(),
            timestamp: document.timestamp.clone(),
        }
    }
}

/// Counts and recent entries across the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub total_artifacts: usize,
    /// Absolute path of the artifacts directory
    pub artifacts_directory: String,
    pub by_category: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    /// The five most recent artifacts
    pub recent_artifacts: Vec<RecentArtifact>,
    /// Number of files that could not be loaded
    pub skipped_files: usize,
}

/// Format a timestamp with fixed microsecond precision so that string order
/// matches chronological order.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_artifact_type_known_names() {
        assert_eq!(ArtifactType::from("search_results"), ArtifactType::SearchResults);
        assert_eq!(ArtifactType::from("analysis"), ArtifactType::Analysis);
        assert_eq!(ArtifactType::from("recommendations"), ArtifactType::Recommendations);
        assert_eq!(ArtifactType::Analysis.to_string(), "analysis");
    }

    #[test]
    fn test_artifact_type_custom_name_is_preserved() {
        let custom = ArtifactType::from("price_history");
        assert_eq!(custom, ArtifactType::Other("price_history".to_string()));

        let json = serde_json::to_string(&custom).unwrap();
        assert_eq!(json, "\"price_history\"");
    }

    #[test]
    fn test_document_uses_type_key() {
        let document = ArtifactDocument {
            category: "headphones".to_string(),
            artifact_type: ArtifactType::SearchResults,
            timestamp: "2025-01-01T00:00:00.000000Z".to_string(),
            data: json!({"x": 1}).as_object().unwrap().clone(),
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["type"], "search_results");
        assert_eq!(value["category"], "headphones");
        assert_eq!(value["data"]["x"], 1);
    }

    #[test]
    fn test_document_without_timestamp_still_parses() {
        let document: ArtifactDocument = serde_json::from_str(
            r#"{"category": "laptops", "type": "analysis", "data": {}}"#,
        )
        .unwrap();
        assert!(document.timestamp.is_empty());
    }

    #[test]
    fn test_document_with_non_object_data_is_rejected() {
        let result: Result<ArtifactDocument, _> = serde_json::from_str(
            r#"{"category": "laptops", "type": "analysis", "timestamp": "", "data": [1, 2]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_query_matching() {
        let document = ArtifactDocument {
            category: "cameras".to_string(),
            artifact_type: ArtifactType::Analysis,
            timestamp: String::new(),
            data: serde_json::Map::new(),
        };

        assert!(ArtifactQuery::all().matches(&document));
        assert!(ArtifactQuery::all().category("cameras").matches(&document));
        assert!(!ArtifactQuery::all().category("Cameras").matches(&document));
        assert!(ArtifactQuery::all()
            .category("cameras")
            .artifact_type("analysis")
            .matches(&document));
        assert!(!ArtifactQuery::all()
            .artifact_type(ArtifactType::Recommendations)
            .matches(&document));
    }

    #[test]
    fn test_iso_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).unwrap();
        let later = whole + chrono::Duration::microseconds(1);

        let a = iso_timestamp(whole);
        let b = iso_timestamp(later);
        assert_eq!(a, "2025-03-01T09:05:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }
}
