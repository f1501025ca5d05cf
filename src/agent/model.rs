//! Model request/response types seen by the turn hooks
//!
//! These mirror the subset of the agent framework's message format that the
//! hooks inspect: text parts and tool invocations.

use serde::{Deserialize, Serialize};

/// Content block within a model message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: serde_json::Value,
        #[serde(default)]
        is_error: bool,
    },
}

/// A message produced by or sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelContent {
    /// `"model"` or `"user"`
    pub role: String,
    pub parts: Vec<ContentBlock>,
}

impl ModelContent {
    /// A model-authored text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Concatenated text parts
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Request about to be sent to the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    pub model: String,
    #[serde(default)]
    pub contents: Vec<ModelContent>,
    /// Names of the tools offered to the model
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Response returned by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    pub content: Option<ModelContent>,
}

impl LlmResponse {
    pub fn from_parts(parts: Vec<ContentBlock>) -> Self {
        Self {
            content: Some(ModelContent {
                role: "model".to_string(),
                parts,
            }),
        }
    }

    /// Whether the response carries any parts at all
    pub fn has_content(&self) -> bool {
        self.content.as_ref().is_some_and(|c| !c.parts.is_empty())
    }

    /// Names of the tools the model asked to invoke, in order
    pub fn tool_calls(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| match p {
                ContentBlock::ToolUse { name, .. } => Some(name.as_str()),
                _ => None,
            })
    }

    pub fn text(&self) -> String {
        self.content
            .as_ref()
            .map(ModelContent::joined_text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_calls_in_order() {
        let response = LlmResponse::from_parts(vec![
            ContentBlock::Text {
                text: "Searching now".to_string(),
            },
            ContentBlock::ToolUse {
                id: "t1".to_string(),
                name: "search_specialist".to_string(),
                input: json!({"request": "top 10 headphones"}),
            },
            ContentBlock::ToolUse {
                id: "t2".to_string(),
                name: "save_research_artifact".to_string(),
                input: json!({}),
            },
        ]);

        let calls: Vec<&str> = response.tool_calls().collect();
        assert_eq!(calls, vec!["search_specialist", "save_research_artifact"]);
        assert_eq!(response.text(), "Searching now");
        assert!(response.has_content());
    }

    #[test]
    fn test_empty_response() {
        let response = LlmResponse::default();
        assert!(!response.has_content());
        assert_eq!(response.tool_calls().count(), 0);
        assert!(response.text().is_empty());

        assert!(!LlmResponse::from_parts(Vec::new()).has_content());
    }

    #[test]
    fn test_content_block_wire_format() {
        let block: ContentBlock = serde_json::from_value(json!({
            "type": "tool_use",
            "id": "tu1",
            "name": "google_search",
            "input": {"q": "best blenders"}
        }))
        .unwrap();
        assert!(matches!(block, ContentBlock::ToolUse { ref name, .. } if name.as_str() == "google_search"));

        let result: ContentBlock = serde_json::from_value(json!({
            "type": "tool_result",
            "tool_use_id": "tu1",
            "content": "ok"
        }))
        .unwrap();
        assert!(matches!(result, ContentBlock::ToolResult { is_error: false, .. }));
    }

    #[test]
    fn test_model_content_text() {
        let content = ModelContent::text("limit reached");
        assert_eq!(content.role, "model");
        assert_eq!(content.joined_text(), "limit reached");
    }
}
