//! The hypothesis-test contract: decisions, summaries and the capability
//! traits concrete testing procedures implement.
//!
//! The contract is split into a read-only capability ([`HypothesisTest`])
//! and a mutating extension ([`SeqHypothesisTest`]), so a non-sequential
//! procedure never carries an unused update operation.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a statistical hypothesis test.
///
/// See "Sequential Tests of Statistical Hypotheses" (Wald): a sequential
/// test either concludes for one of the two hypotheses or keeps sampling.
/// `Accept` and `Reject` are absorbing; `Continue` is the only valid
/// decision before any observation has been incorporated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Keep sampling; no boundary has been crossed.
    Continue,
    /// Conclude in favor of the null hypothesis.
    Accept,
    /// Conclude against the null hypothesis, in favor of the alternative.
    Reject,
}

impl Decision {
    /// Whether the decision is absorbing (the test has concluded).
    pub fn is_terminal(self) -> bool {
        !matches!(self, Decision::Continue)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Continue => write!(f, "Continue testing"),
            Decision::Accept => write!(f, "Accept the null hypothesis"),
            Decision::Reject => write!(f, "Reject the null hypothesis"),
        }
    }
}

/// Summary record for a simple-vs-simple test.
#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    /// Description of the null hypothesis, e.g. `"theta = 1"`.
    pub null: String,
    /// Description of the alternative hypothesis, e.g. `"theta = 2"`.
    pub alternative: String,
    /// Identifying description of the log-likelihood scorer in use.
    pub loglikelihood: String,
    /// The current decision.
    pub decision: Decision,
    /// Observations incorporated so far.
    #[serde(rename = "N")]
    pub n: usize,
}

/// Read-only capabilities every hypothesis test offers.
///
/// Invariant: `Decision::Continue` may only be reported while the test has
/// not concluded; once a test has seen data and concluded, it must keep
/// reporting its terminal decision.
pub trait HypothesisTest {
    /// Current decision. Never fails, callable in any state.
    fn decision(&self) -> Decision;

    /// Summary of the test state. Never fails, callable in any state,
    /// including before any observation.
    fn summary(&self) -> TestSummary;

    /// P-value, for procedures that produce one. Boundary-crossing
    /// procedures such as the SPRT do not.
    fn p_value(&self) -> Option<f64> {
        None
    }
}

/// A hypothesis test that can revise its decision on newly observed data,
/// following the cycle: sample externally, update, decide, repeat or stop.
pub trait SeqHypothesisTest: HypothesisTest {
    /// Fold an ordered batch of observations into the test and return the
    /// resulting decision.
    fn update(&mut self, observations: &[f64]) -> Result<Decision>;

    /// Whether the test has stopped sampling.
    fn stopped(&self) -> bool {
        self.decision().is_terminal()
    }
}
