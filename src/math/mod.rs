//! Mathematical building blocks shared by the statistics

/// Planar geometry predicates for polygons and circles
pub mod geometry;
/// Running moments and correlation matrices
pub mod moments;
