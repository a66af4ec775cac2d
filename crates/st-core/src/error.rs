//! Error types for sequential tests.

use crate::hypothesis::Decision;
use thiserror::Error;

/// Errors surfaced by test construction and updates.
///
/// Every error is reported synchronously to the caller; nothing is
/// swallowed or retried, since the error-rate guarantees depend on every
/// observation being accounted for exactly once.
#[derive(Debug, Error)]
pub enum TestError {
    /// A construction parameter is outside its valid range.
    #[error("invalid parameter {name} = {value} ({constraint})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// An observation falls outside the support of the assumed
    /// distribution, or is not a finite number.
    #[error("invalid observation {value} for the {distribution} log-likelihood")]
    InvalidObservation {
        value: f64,
        distribution: &'static str,
    },

    /// `update` was called after the test reached a terminal decision.
    #[error("test already terminated: {0}")]
    TestAlreadyTerminated(Decision),
}

/// Result type alias for test operations.
pub type Result<T> = std::result::Result<T, TestError>;
