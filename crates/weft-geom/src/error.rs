//! Error types for geometry generation.

use thiserror::Error;

/// Invalid generator parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A segment or side count below the minimum.
    #[error("{name} must be at least {min}, got {value}")]
    TooFewSegments {
        /// Parameter name.
        name: &'static str,
        /// Minimum accepted value.
        min: usize,
        /// Value supplied.
        value: usize,
    },

    /// A NaN or infinite numeric parameter.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },

    /// A point is missing an axis the operation needs.
    #[error("point is missing its {axis} coordinate")]
    MissingAxis {
        /// Axis letter.
        axis: char,
    },

    /// Three points on one line have no circumscribed circle.
    #[error("points are collinear, no unique circle")]
    CollinearPoints,

    /// An operation that needs at least one point received none.
    #[error("path has no points")]
    EmptyPath,
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { name, value })
    }
}

pub(crate) fn at_least(name: &'static str, min: usize, value: usize) -> Result<usize> {
    if value >= min {
        Ok(value)
    } else {
        Err(GeometryError::TooFewSegments { name, min, value })
    }
}
