//! Top 10 Agent error types

use thiserror::Error;

/// Top 10 Agent error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Artifact store error
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Memory service error
    #[error("Memory error: {0}")]
    Memory(String),

    /// Tool dispatch error
    #[error("Tool error: {0}")]
    Tool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Top 10 Agent operations
pub type Result<T> = std::result::Result<T, Error>;
