//! Error-rate validation and Wald decision boundaries.

use crate::error::{Result, TestError};
use serde::Serialize;

/// Tolerated error probabilities for a sequential test.
///
/// `alpha` is the probability of rejecting a true null (Type I error),
/// `beta` the probability of accepting a false null (Type II error). Both
/// must lie strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorRates {
    pub alpha: f64,
    pub beta: f64,
}

impl ErrorRates {
    /// Validate the pair. NaN fails the range check like any other
    /// out-of-range value.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TestError::InvalidParameter {
                name: "alpha",
                value: alpha,
                constraint: "must be in (0, 1)",
            });
        }
        if !(beta > 0.0 && beta < 1.0) {
            return Err(TestError::InvalidParameter {
                name: "beta",
                value: beta,
                constraint: "must be in (0, 1)",
            });
        }
        Ok(Self { alpha, beta })
    }
}

/// Log-scale decision thresholds for the cumulative statistic.
///
/// Wald's approximate boundaries: `lower = ln(beta / (1 - alpha))` and
/// `upper = ln((1 - beta) / alpha)`. Crossing the lower boundary accepts
/// the null; crossing the upper boundary rejects it. For `alpha`, `beta`
/// below one half, `lower < 0 < upper`. Computed once at construction and
/// immutable for the lifetime of the test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundaries {
    pub lower: f64,
    pub upper: f64,
}

impl Boundaries {
    /// Closed-form boundaries from validated error rates.
    pub fn from_rates(rates: ErrorRates) -> Self {
        Self {
            lower: (rates.beta / (1.0 - rates.alpha)).ln(),
            upper: ((1.0 - rates.beta) / rates.alpha).ln(),
        }
    }
}
