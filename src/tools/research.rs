//! Research artifact tools exposed to the model

use crate::artifacts::{ArtifactMirror, ArtifactQuery, ArtifactStore, ArtifactType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SAVE_RESEARCH_ARTIFACT: &str = "save_research_artifact";
pub const LOAD_RESEARCH_ARTIFACTS: &str = "load_research_artifacts";
pub const GET_ARTIFACT_SUMMARY: &str = "get_artifact_summary";

/// A tool as advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveArgs {
    category: String,
    #[serde(alias = "type")]
    artifact_type: ArtifactType,
    data: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoadArgs {
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "type")]
    artifact_type: Option<ArtifactType>,
}

/// Dispatches model tool calls to the artifact store
#[derive(Debug, Clone)]
pub struct ResearchTools {
    store: ArtifactStore,
}

impl ResearchTools {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    /// Whether `name` is one of the tools handled here
    pub fn handles(name: &str) -> bool {
        matches!(
            name,
            SAVE_RESEARCH_ARTIFACT | LOAD_RESEARCH_ARTIFACTS | GET_ARTIFACT_SUMMARY
        )
    }

    pub fn declarations() -> Vec<FunctionDeclaration> {
        vec![
            FunctionDeclaration {
                name: SAVE_RESEARCH_ARTIFACT.to_string(),
                description: "Save research findings (search results, analysis or recommendations) for a product category.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "The product category being researched"
                        },
                        "artifact_type": {
                            "type": "string",
                            "enum": ["search_results", "analysis", "recommendations"]
                        },
                        "data": {
                            "type": "object",
                            "description": "The findings to save"
                        }
                    },
                    "required": ["category", "artifact_type", "data"]
                }),
            },
            FunctionDeclaration {
                name: LOAD_RESEARCH_ARTIFACTS.to_string(),
                description: "Load saved research artifacts, newest first, optionally filtered by category and type.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "category": {"type": "string"},
                        "artifact_type": {
                            "type": "string",
                            "enum": ["search_results", "analysis", "recommendations"]
                        }
                    }
                }),
            },
            FunctionDeclaration {
                name: GET_ARTIFACT_SUMMARY.to_string(),
                description: "Summarize saved research artifacts by category and type.".to_string(),
                parameters: json!({"type": "object", "properties": {}}),
            },
        ]
    }

    /// Run a tool call and return its JSON result.
    ///
    /// `mirror` receives a copy of saved artifacts when the host provides one.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
        mirror: Option<&dyn ArtifactMirror>,
    ) -> Result<Value> {
        tracing::debug!("Tool call {}", name);

        match name {
            SAVE_RESEARCH_ARTIFACT => {
                let args: SaveArgs = parse_args(name, args)?;
                let receipt = match mirror {
                    Some(mirror) => {
                        self.store
                            .save_mirrored(&args.category, args.artifact_type, args.data, mirror)
                            .await?
                    }
                    None => {
                        self.store
                            .save(&args.category, args.artifact_type, args.data)
                            .await?
                    }
                };
                Ok(serde_json::to_value(receipt)?)
            }
            LOAD_RESEARCH_ARTIFACTS => {
                let args: LoadArgs = parse_args(name, args)?;
                let query = ArtifactQuery {
                    category: args.category,
                    artifact_type: args.artifact_type,
                };
                Ok(serde_json::to_value(self.store.load(&query).await)?)
            }
            GET_ARTIFACT_SUMMARY => Ok(serde_json::to_value(self.store.summarize().await)?),
            other => Err(Error::Tool(format!("unknown tool '{}'", other))),
        }
    }
}

/// Deserialize tool arguments; `null` counts as no arguments
fn parse_args<T: serde::de::DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args)
        .map_err(|e| Error::Tool(format!("invalid arguments for {}: {}", tool, e)))
}
