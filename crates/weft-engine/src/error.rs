//! Error and diagnostic types for the transform engine.

use serde::Serialize;
use thiserror::Error;
use weft_ir::DesignError;

/// Fatal transform errors. No output is produced when one is returned.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The machine configuration cannot support the requested action,
    /// e.g. printing with no active cross-section.
    #[error("configuration error at element {index} ({kind}): {reason}")]
    Configuration {
        /// Position in the flattened stream.
        index: usize,
        /// Kind of the offending element.
        kind: String,
        /// What is wrong.
        reason: String,
    },

    /// An element of unrecognized kind.
    #[error("malformed sequence at element {index}: unrecognized kind '{kind}'")]
    MalformedSequence {
        /// Position in the flattened stream.
        index: usize,
        /// The kind that was found.
        kind: String,
    },

    /// The design document could not be read at all.
    #[error(transparent)]
    Design(DesignError),

    /// Initialization data could not be parsed.
    #[error("invalid initialization data: {0}")]
    Initialization(String),
}

impl From<DesignError> for TransformError {
    fn from(err: DesignError) -> Self {
        match err {
            DesignError::UnknownElement { index, kind, .. } => {
                TransformError::MalformedSequence { index, kind }
            }
            other => TransformError::Design(other),
        }
    }
}

/// A non-fatal problem attached to an element position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Position in the flattened stream.
    pub index: usize,
    /// Kind of the element that raised it.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, TransformError>;
