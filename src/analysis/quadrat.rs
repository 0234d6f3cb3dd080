//! Region-based co-localization statistic over quadrat tilings
//!
//! Counts label values per quadrat, correlates the counts across regions,
//! and standardizes the observed correlations against a permutation null.
//! Regions and label values below the minimum-observation threshold are
//! fixed from the observed configuration and excluded from every replicate
//! so the matrix shape stays constant.

use ndarray::Array2;
use serde::Serialize;

use crate::analysis::permutation::LabelPermuter;
use crate::io::error::{Result, insufficient_data, invalid_parameter};
use crate::math::moments::{MatrixMoments, correlation_matrix};
use crate::spatial::labels::Domain;
use crate::spatial::quadrats::QuadratGrid;

/// Parameters for the quadrat correlation statistic
#[derive(Debug, Clone)]
pub struct QuadratConfig {
    /// Side length of each square quadrat
    pub side: f64,
    /// Minimum total observations for a region or label value to be retained
    pub min_observations: usize,
    /// Number of permutation replicates for the null distribution
    pub permutations: usize,
    /// Seed for the permutation random stream
    pub seed: u64,
}

/// Observed correlations and standardized effect sizes per label-value pair
#[derive(Debug, Clone, Serialize)]
pub struct QuadratCorrelationResult {
    /// Retained label values in sorted order
    pub levels: Vec<String>,
    /// Observed Pearson correlation of per-quadrat counts
    pub observed: Array2<f64>,
    /// Standardized effect size against the permutation null
    pub ses: Array2<f64>,
    /// Number of quadrat regions retained after thresholding
    pub regions_used: usize,
    /// Number of permutation replicates folded into the null
    pub permutations: usize,
}

/// Incremental quadrat correlation run
///
/// Construction validates parameters and computes the observed statistic;
/// callers then drive [`Self::run_replicate`] once per permutation (reporting
/// progress as they go) and collect the result with [`Self::finish`].
#[derive(Debug)]
pub struct QuadratAnalysis<'domain> {
    domain: &'domain Domain,
    grid: QuadratGrid,
    kept_regions: Vec<usize>,
    kept_levels: Vec<usize>,
    level_names: Vec<String>,
    level_count: usize,
    observed: Array2<f64>,
    permuter: LabelPermuter,
    null_moments: MatrixMoments,
    permutations: usize,
}

impl<'domain> QuadratAnalysis<'domain> {
    /// Set up a quadrat correlation over a categorical label
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-positive side length or zero
    /// permutations, `DataFormat` if the label is absent or not categorical,
    /// and `InsufficientData` if fewer than two regions or label values
    /// survive the minimum-observation threshold
    pub fn new(domain: &'domain Domain, label_name: &str, config: &QuadratConfig) -> Result<Self> {
        if config.permutations == 0 {
            return Err(invalid_parameter(
                "permutations",
                &config.permutations,
                &"permutation count must be strictly positive",
            ));
        }

        let label = domain.categorical(label_name)?;
        let grid = QuadratGrid::tile(domain.boundary(), config.side)?;

        let level_count = label.levels().len();
        let counts = grid.count_by_region(
            domain.points(),
            domain.boundary(),
            label.codes(),
            level_count,
        );

        let threshold = config.min_observations as f64;
        let kept_regions: Vec<usize> = (0..counts.nrows())
            .filter(|&region| counts.row(region).sum() >= threshold)
            .collect();
        if kept_regions.len() < 2 {
            return Err(insufficient_data(
                &"retained quadrat regions",
                kept_regions.len(),
                2,
            ));
        }

        let kept_levels: Vec<usize> = (0..level_count)
            .filter(|&level| {
                let total: f64 = kept_regions
                    .iter()
                    .filter_map(|&region| counts.get([region, level]))
                    .sum();
                total >= threshold.max(1.0)
            })
            .collect();
        if kept_levels.len() < 2 {
            return Err(insufficient_data(
                &"retained label values",
                kept_levels.len(),
                2,
            ));
        }

        let level_names: Vec<String> = kept_levels
            .iter()
            .filter_map(|&level| label.levels().get(level).cloned())
            .collect();

        let reduced = reduce_counts(&counts, &kept_regions, &kept_levels);
        let observed = correlation_matrix(&reduced);
        let matrix_shape = (kept_levels.len(), kept_levels.len());

        Ok(Self {
            domain,
            grid,
            kept_regions,
            kept_levels,
            level_names,
            level_count,
            observed,
            permuter: LabelPermuter::new(label.codes(), config.seed),
            null_moments: MatrixMoments::new(matrix_shape),
            permutations: config.permutations,
        })
    }

    /// Number of permutation replicates this analysis was configured with
    pub const fn permutations(&self) -> usize {
        self.permutations
    }

    /// Number of replicates folded into the null so far
    pub fn replicates_done(&self) -> usize {
        self.null_moments.count()
    }

    /// Run one permutation replicate
    ///
    /// # Errors
    ///
    /// Returns a computation error if the replicate matrix shape diverges
    /// from the observed matrix (cannot happen with a fixed retention set)
    pub fn run_replicate(&mut self) -> Result<()> {
        let permuted = self.permuter.next_permutation();
        let counts = self.grid.count_by_region(
            self.domain.points(),
            self.domain.boundary(),
            permuted,
            self.level_count,
        );
        let reduced = reduce_counts(&counts, &self.kept_regions, &self.kept_levels);
        self.null_moments.push(&correlation_matrix(&reduced))
    }

    /// Standardize the observed matrix against the accumulated null
    ///
    /// Pairs whose null distribution has (near-)zero spread report an effect
    /// size of 0.0; with labels shuffled freely this only happens for the
    /// trivial diagonal.
    pub fn finish(self) -> QuadratCorrelationResult {
        let null_mean = self.null_moments.mean();
        let null_std = self.null_moments.std_dev();

        let mut ses = Array2::zeros(self.observed.dim());
        for ((row, column), cell) in ses.indexed_iter_mut() {
            let observed = self.observed.get([row, column]).copied().unwrap_or(0.0);
            let mean = null_mean.get([row, column]).copied().unwrap_or(0.0);
            let std = null_std.get([row, column]).copied().unwrap_or(0.0);
            *cell = if std > f64::EPSILON {
                (observed - mean) / std
            } else {
                0.0
            };
        }

        QuadratCorrelationResult {
            levels: self.level_names,
            observed: self.observed,
            ses,
            regions_used: self.kept_regions.len(),
            permutations: self.null_moments.count(),
        }
    }
}

/// Quadrat correlation with all permutation replicates run internally
///
/// # Errors
///
/// Propagates the same errors as [`QuadratAnalysis::new`] and
/// [`QuadratAnalysis::run_replicate`]
pub fn quadrat_correlation(
    domain: &Domain,
    label_name: &str,
    config: &QuadratConfig,
) -> Result<QuadratCorrelationResult> {
    let mut analysis = QuadratAnalysis::new(domain, label_name, config)?;
    for _ in 0..analysis.permutations() {
        analysis.run_replicate()?;
    }
    Ok(analysis.finish())
}

// Select retained regions and levels out of the full count matrix
fn reduce_counts(
    counts: &Array2<f64>,
    kept_regions: &[usize],
    kept_levels: &[usize],
) -> Array2<f64> {
    let mut reduced = Array2::zeros((kept_regions.len(), kept_levels.len()));
    for (row, &region) in kept_regions.iter().enumerate() {
        for (column, &level) in kept_levels.iter().enumerate() {
            if let (Some(cell), Some(&count)) =
                (reduced.get_mut([row, column]), counts.get([region, level]))
            {
                *cell = count;
            }
        }
    }
    reduced
}
