//! Sequential Testing Core Library
//!
//! This library provides the core decision procedure for sequential
//! hypothesis testing:
//! - The hypothesis-test contract (decisions, summaries, capability traits)
//! - Wald's Sequential Probability Ratio Test (SPRT)
//! - Pluggable log-likelihood-ratio scorers for the supported families
//! - Error-rate validation and decision-boundary derivation
//!
//! The caller owns the data feed: observations are pushed in batches into
//! [`sprt::Sprt::update`], and the test reports whether to accept the null
//! hypothesis, reject it, or continue sampling.

pub mod boundaries;
pub mod error;
pub mod evidence;
pub mod hypothesis;
pub mod scorer;
pub mod sprt;

pub use boundaries::{Boundaries, ErrorRates};
pub use error::{Result, TestError};
pub use evidence::EvidenceAccumulator;
pub use hypothesis::{Decision, HypothesisTest, SeqHypothesisTest, TestSummary};
pub use scorer::{ExponentialRatio, Family, FamilyParseError, LogLikelihoodRatio, NormalRatio};
pub use sprt::{Hypotheses, Sprt};
