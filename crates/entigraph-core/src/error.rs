//! Error types for graph and interaction operations.

use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Errors raised by the graph store and the coordinate transform.
///
/// None of these are fatal. The editor session logs them and drops the
/// offending event, leaving the graph untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Unknown entity type: {0:?}")]
    UnknownEntityType(String),
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),
    #[error("Invalid edge endpoint: {0}")]
    InvalidEndpoint(NodeId),
    #[error("Self-loop rejected on node {0}")]
    SelfLoop(NodeId),
    #[error("Edge between {source_id} and {target_id} already exists")]
    DuplicateEdge { source_id: NodeId, target_id: NodeId },
    #[error("Position is not finite: ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },
    #[error("Canvas geometry is not available")]
    TransformUnavailable,
    #[error("Duplicate id in graph: {0}")]
    DuplicateId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
