//! Error types for DDL extraction.
//!
//! Failures are never retried: callers either abort (primary object DDL) or
//! downgrade them to an empty contribution (supplementary facets).

use thiserror::Error;

/// Errors that can occur while fetching or assembling DDL.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A metadata query or DDL-generation call failed (broken connection,
    /// missing privilege on the dictionary views, ...).
    #[error("data access error ({context}): {message}")]
    DataAccess { context: String, message: String },

    /// The catalogue reported an object type the extractor does not handle.
    #[error("unsupported object type: {0}")]
    UnsupportedObjectType(String),

    /// No catalogue entry exists for the requested object.
    #[error("object not found: \"{schema}\".\"{name}\"")]
    ObjectNotFound { schema: String, name: String },
}

impl ExtractError {
    /// Creates a [`DataAccess`](ExtractError::DataAccess) error.
    pub fn data_access(context: impl Into<String>, message: impl ToString) -> Self {
        Self::DataAccess {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
