// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for graph mapping and loading

use thiserror::Error;

use crate::domain::NodeKind;

/// Errors that can occur while mapping resources or applying graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    /// A required identity was empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An edge was applied before one of its endpoint nodes existed
    #[error("Missing endpoint {kind}({identity}) for {relationship} edge")]
    MissingEndpoint {
        /// Kind of the missing node
        kind: NodeKind,
        /// Identity of the missing node
        identity: String,
        /// Relationship type name of the rejected edge
        relationship: &'static str,
    },

    /// Resource record deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Reading resource input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Graph database error
    #[error("Database error: {0}")]
    Database(String),

    /// Operation execution failed
    #[error("Execution failed: {0}")]
    Execution(String),
}

impl GraphError {
    /// Shorthand for an empty-identity error on the given node kind
    pub fn empty_identity(kind: NodeKind) -> Self {
        GraphError::InvalidArgument(format!("empty identity for {} node", kind))
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Deserialization(err.to_string())
    }
}

impl From<crate::projection::executor::ExecutorError> for GraphError {
    fn from(err: crate::projection::executor::ExecutorError) -> Self {
        GraphError::Execution(err.to_string())
    }
}
