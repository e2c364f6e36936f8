use thiserror::Error;

use crate::types::{EdgeId, NodeId};

/// Error type for ArborGraph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArborGraphError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),
    #[error("no relation between {from} and {to}")]
    RelationNotFound { from: NodeId, to: NodeId },
    #[error("relation already exists between {from} and {to}")]
    DuplicateRelation { from: NodeId, to: NodeId },
    #[error("self loops are not supported: {0}")]
    SelfLoop(NodeId),
    #[error("invalid conversion: {0}")]
    InvalidConversion(String),
    #[error("operation requires a directed graph")]
    NotDirected,
    #[error("observer already registered")]
    AlreadyRegistered,
    #[error("observer not registered")]
    NotRegistered,
    #[error("cycle detected at node {0}")]
    CycleDetected(NodeId),
    #[error("root node is not set")]
    RootNotSet,
    #[error("write error: {0}")]
    Write(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ArborGraphError {
    pub fn invalid_conversion<T: Into<String>>(msg: T) -> Self {
        ArborGraphError::InvalidConversion(msg.into())
    }

    pub fn write<T: Into<String>>(msg: T) -> Self {
        ArborGraphError::Write(msg.into())
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        ArborGraphError::InvalidConfig(msg.into())
    }

    pub fn relation_not_found(from: NodeId, to: NodeId) -> Self {
        ArborGraphError::RelationNotFound { from, to }
    }

    pub fn duplicate_relation(from: NodeId, to: NodeId) -> Self {
        ArborGraphError::DuplicateRelation { from, to }
    }
}

pub type Result<T> = std::result::Result<T, ArborGraphError>;
