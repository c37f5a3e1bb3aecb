//! Outbound lookup error types.

use thiserror::Error;

/// Failure modes of a single lookup service call.
///
/// The two variants are deliberately distinguishable at the resolver
/// boundary: a clean negative answer must never be treated as a service
/// failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LookupError {
    #[error("no image found for query: {query}")]
    NotFound { query: String },

    #[error("lookup service unreachable: {message}")]
    Transport { message: String },
}

impl LookupError {
    /// Creates a clean not-found result.
    #[must_use]
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Creates a transport-level failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns whether this failure indicates an unreachable or failing
    /// service, as opposed to a valid negative answer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
