//! Error types for boundary validation.
//!
//! Matching itself never fails. These errors are produced when a caller
//! validates an [`Entity`](crate::Entity) or [`FilterSet`](crate::FilterSet)
//! built from untrusted input, or parses one of the engine's textual forms.

use thiserror::Error;

/// Errors raised while validating or parsing engine inputs.
#[derive(Debug, Error, PartialEq)]
pub enum FacetError {
    /// A numeric field held NaN or an infinity.
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: &'static str },

    /// A lower bound was greater than its upper bound.
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Keyword mode was neither `and` nor `or`.
    #[error("invalid keyword mode '{0}' (expected 'and' or 'or')")]
    InvalidKeywordMode(String),

    /// Sort order could not be parsed.
    #[error("invalid sort order '{0}'")]
    InvalidSortKey(String),

    /// A request parameter could not be interpreted.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// An entity was built without an identifier.
    #[error("entity id must not be empty")]
    EmptyIdentifier,
}

/// Result type for engine validation and parsing.
pub type Result<T> = std::result::Result<T, FacetError>;
