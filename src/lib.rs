//! Top 10 Agent - research core for multi-agent product recommendations
//!
//! An orchestrator agent, a search agent and an analyzer agent (all run by an
//! external LLM agent framework) aggregate "top 10" lists into a consolidated
//! top-5 recommendation. This crate is the deterministic core they call into.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Agent framework (external)                       │
//! │   top_10_orchestrator ──► search_specialist    list_analyzer     │
//! └──────┬───────────────────────────┬──────────────────────┬────────┘
//!        │ tool calls                │ lifecycle hooks      │
//! ┌──────▼──────────┐   ┌────────────▼──────────┐   ┌───────▼────────┐
//! │ ResearchTools   │   │ SessionHooks          │   │ AgentRegistry  │
//! │  save / load /  │   │  search limit         │   │  roles, tools, │
//! │  summarize      │   │  counters, timestamps │   │  instructions  │
//! └──────┬──────────┘   └────────────┬──────────┘   └────────────────┘
//!        │                           │ analyzer completed
//! ┌──────▼──────────┐   ┌────────────▼──────────┐   ┌────────────────┐
//! │ ArtifactStore   │   │ MemoryBridge          ├──►│ MemoryService  │
//! │ agent/artifacts │   │ (SessionService)      │   │ (long-lived)   │
//! └─────────────────┘   └───────────────────────┘   └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`artifacts`]: file-backed JSON artifact store
//! - [`session`]: typed session state and the session service
//! - [`memory`]: long-lived memory and session archival
//! - [`hooks`]: agent turn and model call hooks
//! - [`agent`]: agent definitions and model message types
//! - [`tools`]: tool declarations and dispatch
//! - [`config`]: configuration management

pub mod agent;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod hooks;
pub mod memory;
pub mod session;
pub mod tools;

pub use config::TopTenConfig;
pub use error::{Error, Result};
