//! Permutation-tested correlation statistics over labelled point patterns

/// Cross pair-correlation function with boundary edge correction
pub mod pcf;
/// Seeded label shuffling for permutation nulls
pub mod permutation;
/// Quadrat co-localization matrices with standardized effect sizes
pub mod quadrat;

pub use pcf::{CrossPcfResult, PcfConfig, PcfSample, cross_pcf};
pub use permutation::LabelPermuter;
pub use quadrat::{QuadratAnalysis, QuadratConfig, QuadratCorrelationResult, quadrat_correlation};
