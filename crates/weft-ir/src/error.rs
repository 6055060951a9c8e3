//! Error types for design loading.

use thiserror::Error;

/// Errors raised while loading a design.
#[derive(Error, Debug)]
pub enum DesignError {
    /// The document is not valid JSON.
    #[error("invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An element of unrecognized kind, or with invalid fields.
    #[error("element {index} has unrecognized kind '{kind}': {reason}")]
    UnknownElement {
        /// Position in the flattened stream.
        index: usize,
        /// The `type` tag (or JSON value kind) that was found.
        kind: String,
        /// Underlying decoding failure.
        reason: String,
    },
}

/// Result type for design operations.
pub type Result<T> = std::result::Result<T, DesignError>;
