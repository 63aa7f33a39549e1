//! Error types for tree operations

use crate::NodeId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid position: node {node_id}, offset {offset}")]
    InvalidPosition { node_id: NodeId, offset: usize },

    #[error("Node {0} is not attached to the document")]
    Detached(NodeId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Tree structure error: {0}")]
    TreeStructureError(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
