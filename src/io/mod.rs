//! Input/output glue: CSV datasets, CLI, rendering, and error types

/// Command-line interface for batch processing CSV datasets
pub mod cli;
/// Analysis constants and runtime configuration defaults
pub mod configuration;
/// CSV loading and coordinate round-tripping
pub mod dataset;
/// Error types and context management
pub mod error;
/// Scatter-plot rendering of labelled point sets
pub mod plot;
/// Progress reporting for permutation replicates
pub mod progress;
