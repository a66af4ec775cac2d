//! Wald's Sequential Probability Ratio Test.
//!
//! Tests the simple hypothesis H0: theta = theta0 against H1: theta =
//! theta1 by accumulating per-observation log-likelihood ratios and
//! comparing the cumulative statistic S against two fixed log-scale
//! boundaries derived from the tolerated error rates:
//!
//! ```text
//! S <= ln(beta / (1 - alpha))  -> accept H0
//! S >= ln((1 - beta) / alpha)  -> reject H0
//! otherwise                    -> continue sampling
//! ```
//!
//! The caller owns the data feed; `update` is a plain synchronous call
//! that never blocks and never spawns work.
//!
//! # Usage
//!
//! ```
//! use st_core::hypothesis::Decision;
//! use st_core::scorer::ExponentialRatio;
//! use st_core::sprt::Sprt;
//!
//! let mut test = Sprt::new(1.0, 2.0, 0.05, 0.05, ExponentialRatio).unwrap();
//! let decision = test.update(&[0.5, 1.5]).unwrap();
//! assert_eq!(decision, Decision::Continue);
//! ```

use crate::boundaries::{Boundaries, ErrorRates};
use crate::error::{Result, TestError};
use crate::evidence::EvidenceAccumulator;
use crate::hypothesis::{Decision, HypothesisTest, SeqHypothesisTest, TestSummary};
use crate::scorer::LogLikelihoodRatio;
use serde::Serialize;
use tracing::debug;

/// The simple-vs-simple hypothesis pair (theta0, theta1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hypotheses {
    pub theta0: f64,
    pub theta1: f64,
}

impl Hypotheses {
    /// Validate the pair: both finite, theta1 distinct from theta0.
    ///
    /// No direction is assumed beyond what the scorer encodes; theta1 may
    /// lie on either side of theta0.
    pub fn new(theta0: f64, theta1: f64) -> Result<Self> {
        if !theta0.is_finite() {
            return Err(TestError::InvalidParameter {
                name: "theta0",
                value: theta0,
                constraint: "must be finite",
            });
        }
        if !theta1.is_finite() {
            return Err(TestError::InvalidParameter {
                name: "theta1",
                value: theta1,
                constraint: "must be finite",
            });
        }
        if theta0 == theta1 {
            return Err(TestError::InvalidParameter {
                name: "theta1",
                value: theta1,
                constraint: "must differ from theta0",
            });
        }
        Ok(Self { theta0, theta1 })
    }
}

/// Sequential probability ratio test over a pluggable scorer.
///
/// Each instance exclusively owns its accumulated statistic, count and
/// decision; there is no internal locking, so concurrent callers must
/// serialize access to a given instance externally.
#[derive(Debug, Clone)]
pub struct Sprt<S> {
    hypotheses: Hypotheses,
    rates: ErrorRates,
    boundaries: Boundaries,
    evidence: EvidenceAccumulator,
    decision: Decision,
    scorer: S,
}

impl<S: LogLikelihoodRatio> Sprt<S> {
    /// Build a test for H0: theta = `theta0` vs H1: theta = `theta1` with
    /// tolerated error rates `alpha` (Type I) and `beta` (Type II).
    ///
    /// Fails with [`TestError::InvalidParameter`] when a rate is outside
    /// (0, 1) or the hypotheses coincide; no partial engine is created.
    pub fn new(theta0: f64, theta1: f64, alpha: f64, beta: f64, scorer: S) -> Result<Self> {
        let hypotheses = Hypotheses::new(theta0, theta1)?;
        let rates = ErrorRates::new(alpha, beta)?;
        let boundaries = Boundaries::from_rates(rates);
        Ok(Self {
            hypotheses,
            rates,
            boundaries,
            evidence: EvidenceAccumulator::new(),
            decision: Decision::Continue,
            scorer,
        })
    }

    /// Fold an ordered batch of observations and return the resulting
    /// decision.
    ///
    /// The whole batch is scored before any state changes, so a rejected
    /// observation leaves the statistic and count untouched. The boundary
    /// comparison happens once, after the entire batch is folded: a batch
    /// can overshoot a boundary an intermediate observation had already
    /// crossed, and the decision reported is the one implied by the full
    /// batch. Callers that need per-observation granularity feed
    /// observations one at a time via [`Sprt::update_one`].
    ///
    /// Fails with [`TestError::TestAlreadyTerminated`] once a terminal
    /// decision has been reached, even for an empty batch. An empty batch
    /// on a live test is a no-op returning the current decision.
    pub fn update(&mut self, observations: &[f64]) -> Result<Decision> {
        if self.decision.is_terminal() {
            return Err(TestError::TestAlreadyTerminated(self.decision));
        }
        if observations.is_empty() {
            return Ok(self.decision);
        }

        let mut contributions = Vec::with_capacity(observations.len());
        for &x in observations {
            contributions.push(self.scorer.log_likelihood_ratio(
                x,
                self.hypotheses.theta0,
                self.hypotheses.theta1,
            )?);
        }

        self.evidence.fold(&contributions);
        let statistic = self.evidence.statistic();
        self.decision = if statistic <= self.boundaries.lower {
            Decision::Accept
        } else if statistic >= self.boundaries.upper {
            Decision::Reject
        } else {
            Decision::Continue
        };

        if self.decision.is_terminal() {
            debug!(
                statistic,
                n = self.evidence.count(),
                decision = %self.decision,
                "decision boundary crossed"
            );
        }
        Ok(self.decision)
    }

    /// Fold a single observation; equivalent to `update(&[x])`.
    pub fn update_one(&mut self, x: f64) -> Result<Decision> {
        self.update(std::slice::from_ref(&x))
    }

    /// Current decision. Never fails, callable in any state.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Cumulative log-likelihood-ratio statistic S.
    pub fn statistic(&self) -> f64 {
        self.evidence.statistic()
    }

    /// Observations incorporated so far.
    pub fn n(&self) -> usize {
        self.evidence.count()
    }

    pub fn hypotheses(&self) -> Hypotheses {
        self.hypotheses
    }

    pub fn error_rates(&self) -> ErrorRates {
        self.rates
    }

    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    /// Summary of the test state; callable at any point, including before
    /// any observation.
    pub fn summary(&self) -> TestSummary {
        TestSummary {
            null: format!("theta = {}", self.hypotheses.theta0),
            alternative: format!("theta = {}", self.hypotheses.theta1),
            loglikelihood: self.scorer.name(),
            decision: self.decision,
            n: self.evidence.count(),
        }
    }
}

impl<S: LogLikelihoodRatio> HypothesisTest for Sprt<S> {
    fn decision(&self) -> Decision {
        self.decision
    }

    fn summary(&self) -> TestSummary {
        Sprt::summary(self)
    }
}

impl<S: LogLikelihoodRatio> SeqHypothesisTest for Sprt<S> {
    fn update(&mut self, observations: &[f64]) -> Result<Decision> {
        Sprt::update(self, observations)
    }
}
