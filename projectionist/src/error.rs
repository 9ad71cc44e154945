//! Error types for projection lookups.
//!
//! Two failure kinds are kept apart: structural defects in the loaded registry
//! data, which abort a whole query, and placeholder expansion failures, which
//! only drop the affected candidate.

use thiserror::Error;

/// Result type alias using ProjectionError.
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Errors raised while expanding a single `{...}` placeholder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// The token is not delimited by a leading `{` and a trailing `}`.
    #[error("'{token}' does not look like a placeholder")]
    NotAPlaceholder { token: String },

    /// The placeholder fell back to the `match` value but none was captured.
    #[error("placeholder '{token}' needs a match value but the context has none")]
    MissingMatch { token: String },
}

/// Errors that can occur while querying projections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// A pattern did not split into exactly one or three parts on its wildcard.
    #[error(
        "malformed pattern '{pattern}': wildcard split produced {parts} parts, expected 1 or 3"
    )]
    MalformedPattern { pattern: String, parts: usize },

    /// The anchor used to trim a single-segment capture could not be built.
    #[error("malformed pattern '{pattern}': cannot build segment anchor: {message}")]
    InvalidAnchor { pattern: String, message: String },

    /// A placeholder in a template value could not be expanded.
    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),
}

impl ProjectionError {
    /// Create a MalformedPattern error.
    pub fn malformed_pattern(pattern: impl Into<String>, parts: usize) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            parts,
        }
    }

    /// Whether this error invalidates the whole query.
    ///
    /// Fatal errors point at corrupt registry data. Non-fatal errors only
    /// concern the candidate being expanded.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::MalformedPattern { .. } | Self::InvalidAnchor { .. } => true,
            Self::Placeholder(_) => false,
        }
    }
}
