//! Tools the agents call into the core

mod research;

pub use research::{
    FunctionDeclaration, ResearchTools, GET_ARTIFACT_SUMMARY, LOAD_RESEARCH_ARTIFACTS,
    SAVE_RESEARCH_ARTIFACT,
};
