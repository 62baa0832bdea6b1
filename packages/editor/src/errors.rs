//! Error types for the editor

use pagecraft_model::ModelError;
use thiserror::Error;

/// Why a tree mutation was rejected. The document is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Cannot reparent {0} into itself")]
    SelfReparent(String),

    #[error("Cannot reparent {node_id} into its own descendant {parent_id}")]
    CircularReparent { node_id: String, parent_id: String },

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Clipboard is empty")]
    EmptyClipboard,
}

pub type MutationResult<T> = Result<T, MutationError>;
