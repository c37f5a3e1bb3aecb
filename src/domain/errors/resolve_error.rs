//! Resolution error taxonomy.

use thiserror::Error;

/// Why a resolution produced no image.
///
/// Callers can distinguish "try again later" (`BreakerOpen`,
/// `ServiceUnavailable`) from "this vehicle simply has no photo"
/// (`NoMatch`) and from "nothing was attempted" (`EmptyKey`). The
/// subsystem itself never retries; any retry policy belongs to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("resolution not attempted: vehicle has no descriptive fields")]
    EmptyKey,

    #[error("resolution not attempted: lookups suspended until cooldown elapses")]
    BreakerOpen,

    #[error("no image matches query: {query}")]
    NoMatch { query: String },

    #[error("lookup service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

impl ResolveError {
    /// Creates a clean no-match outcome.
    #[must_use]
    pub fn no_match(query: impl Into<String>) -> Self {
        Self::NoMatch {
            query: query.into(),
        }
    }

    /// Creates a service-unavailable outcome.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Returns true when no lookup was attempted at all (empty key or
    /// suppressed by the circuit breaker).
    #[must_use]
    pub const fn is_not_attempted(&self) -> bool {
        matches!(self, Self::EmptyKey | Self::BreakerOpen)
    }

    /// Returns true when a later attempt could plausibly succeed.
    /// `NoMatch` is a stable negative answer and is not retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::BreakerOpen | Self::ServiceUnavailable { .. })
    }
}
