//! Top 10 Agent configuration management

use crate::agent::{GOOGLE_SEARCH, SEARCH_AGENT};
use crate::error::{Error, Result};
use crate::tools::SAVE_RESEARCH_ARTIFACT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Top 10 Agent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopTenConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session tracking configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Memory archival configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Agent definitions configuration
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl TopTenConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot express as types
    pub fn validate(&self) -> Result<()> {
        if self.storage.artifacts_dir.as_os_str().is_empty() {
            return Err(Error::Config("storage.artifacts_dir must not be empty".to_string()));
        }
        if self.memory.app_name.is_empty() {
            return Err(Error::Config("memory.app_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Default configuration file location (`<config dir>/topten/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join("topten").join("config.toml"))
    }
}

/// Artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per artifact
    pub artifacts_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("agent").join("artifacts"),
        }
    }
}

/// Session tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum searches per session before turns are refused
    pub search_limit: u32,

    /// Message returned instead of running a turn once the limit is reached.
    /// Unset means a message naming `search_limit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_message: Option<String>,

    /// Tool names counted as searches
    pub search_tools: Vec<String>,

    /// Tool names counted as artifact saves
    pub artifact_tools: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_limit: 5,
            limit_message: None,
            search_tools: vec![GOOGLE_SEARCH.to_string(), SEARCH_AGENT.to_string()],
            artifact_tools: vec![SAVE_RESEARCH_ARTIFACT.to_string()],
        }
    }
}

impl SessionConfig {
    /// Text sent back once the session has used up its searches
    pub fn refusal_message(&self) -> String {
        self.limit_message.clone().unwrap_or_else(|| {
            format!(
                "Search limit reached ({} searches per session). Please start a new session.",
                self.search_limit
            )
        })
    }
}

/// Memory archival configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Archive the session into memory when the analyzer completes
    pub enabled: bool,

    /// Application name sessions are registered under
    pub app_name: String,

    /// User id used when the host does not supply one
    pub default_user_id: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_name: "top_10_agent".to_string(),
            default_user_id: "default_user".to_string(),
        }
    }
}

/// Agent definitions configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Model identifier handed to the agent framework
    pub model: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
        }
    }
}
