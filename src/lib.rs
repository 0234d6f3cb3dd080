//! Correlation statistics for labelled 2D point patterns
//!
//! The crate loads point sets with categorical and continuous label
//! attachments, tiles their spatial domain into quadrats, and computes
//! permutation-tested co-localization matrices and cross pair-correlation
//! functions against complete spatial randomness.

#![forbid(unsafe_code)]

/// Quadrat correlation and pair-correlation statistics with permutation nulls
pub mod analysis;
/// Input/output operations, CLI orchestration, and error handling
pub mod io;
/// Mathematical utilities for moments, correlation, and planar geometry
pub mod math;
/// Point sets, label attachments, boundaries, and quadrat tiling
pub mod spatial;

pub use io::error::{AnalysisError, Result};
