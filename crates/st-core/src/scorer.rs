//! Log-likelihood-ratio scoring for simple-vs-simple hypotheses.
//!
//! The decision engine is agnostic to the population model; it only needs,
//! for each observation, the log-likelihood ratio of the alternative
//! parameter to the null. Concrete families are interchangeable strategy
//! implementations of [`LogLikelihoodRatio`], not variations of the
//! engine.

use crate::error::{Result, TestError};
use serde::{Deserialize, Serialize};
use st_math::loglik::{exponential_log_pdf, normal_log_pdf};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Per-observation log-likelihood-ratio scoring.
pub trait LogLikelihoodRatio {
    /// `ln f(x; theta1) - ln f(x; theta0)` under the population model.
    ///
    /// Must be a pure, deterministic function of its inputs, defined for
    /// every value the population can produce. An observation outside the
    /// support (or a non-finite one) fails with
    /// [`TestError::InvalidObservation`] instead of smuggling a NaN or
    /// infinity into the statistic.
    fn log_likelihood_ratio(&self, x: f64, theta0: f64, theta1: f64) -> Result<f64>;

    /// Identifying description, used in test summaries.
    fn name(&self) -> String;
}

impl<T: LogLikelihoodRatio + ?Sized> LogLikelihoodRatio for Box<T> {
    fn log_likelihood_ratio(&self, x: f64, theta0: f64, theta1: f64) -> Result<f64> {
        (**self).log_likelihood_ratio(x, theta0, theta1)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Exponential family in the rate parameterization
/// `f(x; theta) = theta * exp(-theta * x)`, support `x >= 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialRatio;

impl LogLikelihoodRatio for ExponentialRatio {
    fn log_likelihood_ratio(&self, x: f64, theta0: f64, theta1: f64) -> Result<f64> {
        for (name, theta) in [("theta0", theta0), ("theta1", theta1)] {
            if !(theta > 0.0) || theta.is_infinite() {
                return Err(TestError::InvalidParameter {
                    name,
                    value: theta,
                    constraint: "must be a positive rate",
                });
            }
        }
        if !x.is_finite() || x < 0.0 {
            return Err(TestError::InvalidObservation {
                value: x,
                distribution: "exponential",
            });
        }
        Ok(exponential_log_pdf(x, theta1) - exponential_log_pdf(x, theta0))
    }

    fn name(&self) -> String {
        "Exponential(theta) log-likelihood".to_string()
    }
}

/// Normal location family with fixed dispersion `sigma`.
#[derive(Debug, Clone, Copy)]
pub struct NormalRatio {
    sigma: f64,
}

impl NormalRatio {
    /// Scorer with the given dispersion; `sigma` must be a positive finite
    /// number.
    pub fn new(sigma: f64) -> Result<Self> {
        if !(sigma > 0.0) || sigma.is_infinite() {
            return Err(TestError::InvalidParameter {
                name: "sigma",
                value: sigma,
                constraint: "must be a positive dispersion",
            });
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for NormalRatio {
    /// Standard dispersion `sigma = 1`.
    fn default() -> Self {
        Self { sigma: 1.0 }
    }
}

impl LogLikelihoodRatio for NormalRatio {
    fn log_likelihood_ratio(&self, x: f64, theta0: f64, theta1: f64) -> Result<f64> {
        for (name, theta) in [("theta0", theta0), ("theta1", theta1)] {
            if !theta.is_finite() {
                return Err(TestError::InvalidParameter {
                    name,
                    value: theta,
                    constraint: "must be finite",
                });
            }
        }
        if !x.is_finite() {
            return Err(TestError::InvalidObservation {
                value: x,
                distribution: "normal",
            });
        }
        Ok(normal_log_pdf(x, theta1, self.sigma) - normal_log_pdf(x, theta0, self.sigma))
    }

    fn name(&self) -> String {
        format!("Normal(theta, sigma={}) log-likelihood", self.sigma)
    }
}

/// Errors from parsing a likelihood-family query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FamilyParseError {
    /// No family label starts with the query.
    #[error("no likelihood family matches '{0}' (expected one of: exponential, normal)")]
    Unknown(String),

    /// More than one family label starts with the query.
    #[error("ambiguous likelihood family query '{query}': matches {matches:?}")]
    Ambiguous {
        query: String,
        matches: Vec<&'static str>,
    },
}

/// Supported likelihood families, constructible from a free-form query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Exponential,
    Normal,
}

impl Family {
    const ALL: [Family; 2] = [Family::Exponential, Family::Normal];

    pub fn label(self) -> &'static str {
        match self {
            Family::Exponential => "exponential",
            Family::Normal => "normal",
        }
    }

    /// Scorer for this family with its default parameters (`sigma = 1` for
    /// the normal family).
    pub fn scorer(self) -> Box<dyn LogLikelihoodRatio> {
        match self {
            Family::Exponential => Box::new(ExponentialRatio),
            Family::Normal => Box::new(NormalRatio::default()),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Family {
    type Err = FamilyParseError;

    /// Case-insensitive prefix match, so `"exp"` or `"N"` select a family.
    fn from_str(query: &str) -> std::result::Result<Self, Self::Err> {
        let q = query.trim().to_ascii_lowercase();
        let matches: Vec<Family> = Self::ALL
            .iter()
            .copied()
            .filter(|family| family.label().starts_with(&q))
            .collect();
        match matches.as_slice() {
            [family] => Ok(*family),
            [] => Err(FamilyParseError::Unknown(query.to_string())),
            _ => Err(FamilyParseError::Ambiguous {
                query: query.to_string(),
                matches: matches.iter().map(|family| family.label()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn exponential_ratio_golden_value() {
        // For rates theta0=1, theta1=2: ln(2) - x.
        let scorer = ExponentialRatio;
        let llr = scorer.log_likelihood_ratio(0.5, 1.0, 2.0).unwrap();
        assert!(approx_eq(llr, 2.0f64.ln() - 0.5, 1e-12));
    }

    #[test]
    fn exponential_ratio_rejects_out_of_support() {
        let scorer = ExponentialRatio;
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            let err = scorer.log_likelihood_ratio(bad, 1.0, 2.0).unwrap_err();
            assert!(matches!(err, TestError::InvalidObservation { .. }), "x = {bad}");
        }
    }

    #[test]
    fn exponential_ratio_rejects_bad_rates() {
        let scorer = ExponentialRatio;
        assert!(scorer.log_likelihood_ratio(1.0, 0.0, 2.0).is_err());
        assert!(scorer.log_likelihood_ratio(1.0, 1.0, -2.0).is_err());
        assert!(scorer.log_likelihood_ratio(1.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn normal_ratio_golden_value() {
        // With theta0=1, theta1=2, sigma=1 the ratio reduces to x - 1.5.
        let scorer = NormalRatio::default();
        for x in [-1.0, 0.0, 1.5, 2.4] {
            let llr = scorer.log_likelihood_ratio(x, 1.0, 2.0).unwrap();
            assert!(approx_eq(llr, x - 1.5, 1e-12), "x = {x}");
        }
    }

    #[test]
    fn normal_ratio_scales_with_dispersion() {
        let wide = NormalRatio::new(2.0).unwrap();
        let narrow = NormalRatio::default();
        let llr_wide = wide.log_likelihood_ratio(3.0, 1.0, 2.0).unwrap();
        let llr_narrow = narrow.log_likelihood_ratio(3.0, 1.0, 2.0).unwrap();
        // Larger dispersion means each observation carries less evidence.
        assert!(llr_wide.abs() < llr_narrow.abs());
        assert!(approx_eq(llr_wide, llr_narrow / 4.0, 1e-12));
    }

    #[test]
    fn normal_ratio_rejects_bad_sigma() {
        assert!(NormalRatio::new(0.0).is_err());
        assert!(NormalRatio::new(-1.0).is_err());
        assert!(NormalRatio::new(f64::NAN).is_err());
        assert!(NormalRatio::new(f64::INFINITY).is_err());
    }

    #[test]
    fn normal_ratio_rejects_non_finite_observation() {
        let scorer = NormalRatio::default();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(scorer.log_likelihood_ratio(bad, 1.0, 2.0).is_err());
        }
    }

    #[test]
    fn boxed_scorer_delegates() {
        let boxed: Box<dyn LogLikelihoodRatio> = Box::new(ExponentialRatio);
        let llr = boxed.log_likelihood_ratio(0.5, 1.0, 2.0).unwrap();
        assert!(approx_eq(llr, 2.0f64.ln() - 0.5, 1e-12));
        assert_eq!(boxed.name(), ExponentialRatio.name());
    }

    #[test]
    fn family_query_exact_and_prefix() {
        assert_eq!("exponential".parse::<Family>(), Ok(Family::Exponential));
        assert_eq!("exp".parse::<Family>(), Ok(Family::Exponential));
        assert_eq!("E".parse::<Family>(), Ok(Family::Exponential));
        assert_eq!("Normal".parse::<Family>(), Ok(Family::Normal));
        assert_eq!("n".parse::<Family>(), Ok(Family::Normal));
    }

    #[test]
    fn family_query_unknown() {
        assert_eq!(
            "poisson".parse::<Family>(),
            Err(FamilyParseError::Unknown("poisson".to_string()))
        );
    }

    #[test]
    fn family_query_ambiguous() {
        match "".parse::<Family>() {
            Err(FamilyParseError::Ambiguous { matches, .. }) => {
                assert_eq!(matches, vec!["exponential", "normal"]);
            }
            other => panic!("expected ambiguous query, got {other:?}"),
        }
    }

    #[test]
    fn family_scorer_names() {
        assert_eq!(
            Family::Exponential.scorer().name(),
            "Exponential(theta) log-likelihood"
        );
        assert_eq!(
            Family::Normal.scorer().name(),
            "Normal(theta, sigma=1) log-likelihood"
        );
    }
}
