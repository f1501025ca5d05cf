//! Agent definitions and model message types
//!
//! The agents themselves run inside an external agent framework. This module
//! describes them (role, model, instruction, tools) and the message shapes the
//! turn hooks inspect.

mod model;
mod prompts;
mod registry;
mod types;

pub use model::{ContentBlock, LlmRequest, LlmResponse, ModelContent};
pub use registry::{AgentRegistry, ANALYZER_AGENT, GOOGLE_SEARCH, ORCHESTRATOR_AGENT, SEARCH_AGENT};
pub use types::{AgentDefinition, AgentRole};
