//! Running moments and Pearson correlation over quadrat count matrices
//!
//! Null distributions from permutation replicates are never materialised;
//! only element-wise mean and variance are retained via Welford updates.

use ndarray::Array2;

use crate::io::error::{Result, computation_error};

/// Online mean and variance accumulator for a scalar stream
#[derive(Debug, Clone, Default)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one observation into the accumulator
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 = delta.mul_add(delta2, self.m2);
    }

    /// Number of observations folded in so far
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Mean of the observations, or 0.0 when empty
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation, or 0.0 with fewer than two observations
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}

/// Element-wise running moments over a stream of equally shaped matrices
#[derive(Debug, Clone)]
pub struct MatrixMoments {
    shape: (usize, usize),
    cells: Vec<RunningMoments>,
}

impl MatrixMoments {
    /// Create an accumulator for matrices of the given shape
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            shape,
            cells: vec![RunningMoments::new(); shape.0 * shape.1],
        }
    }

    /// Fold one matrix observation into the accumulator
    ///
    /// # Errors
    ///
    /// Returns a computation error if the matrix shape differs from the
    /// shape the accumulator was created with
    pub fn push(&mut self, matrix: &Array2<f64>) -> Result<()> {
        if matrix.dim() != self.shape {
            return Err(computation_error(
                "matrix moments",
                &format!(
                    "shape mismatch: expected {:?}, got {:?}",
                    self.shape,
                    matrix.dim()
                ),
            ));
        }

        for (cell, &value) in self.cells.iter_mut().zip(matrix.iter()) {
            cell.push(value);
        }

        Ok(())
    }

    /// Number of matrices folded in so far
    pub fn count(&self) -> usize {
        self.cells.first().map_or(0, RunningMoments::count)
    }

    /// Element-wise mean of the observed matrices
    pub fn mean(&self) -> Array2<f64> {
        self.assemble(RunningMoments::mean)
    }

    /// Element-wise sample standard deviation
    ///
    /// Zero-filled with fewer than two observations.
    pub fn std_dev(&self) -> Array2<f64> {
        self.assemble(RunningMoments::std_dev)
    }

    fn assemble(&self, extract: impl Fn(&RunningMoments) -> f64) -> Array2<f64> {
        let mut matrix = Array2::zeros(self.shape);
        for (cell, value) in matrix.iter_mut().zip(self.cells.iter().map(extract)) {
            *cell = value;
        }
        matrix
    }
}

/// Pearson correlation between two equal-length samples
///
/// Returns `None` when either sample has zero variance or the samples
/// contain fewer than two observations.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance = dx.mul_add(dy, covariance);
        var_x = dx.mul_add(dx, var_x);
        var_y = dy.mul_add(dy, var_y);
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator <= f64::EPSILON {
        return None;
    }

    Some(covariance / denominator)
}

/// Pearson correlation matrix across the columns of a count matrix
///
/// Each row is one quadrat region, each column one label value. Pairs where
/// either column has zero variance across regions are reported as 0.0 so the
/// observed and null matrices stay comparable cell by cell.
pub fn correlation_matrix(counts: &Array2<f64>) -> Array2<f64> {
    let (_, columns) = counts.dim();
    let mut matrix = Array2::zeros((columns, columns));

    for a in 0..columns {
        for b in a..columns {
            let column_a = counts.column(a);
            let column_b = counts.column(b);
            let xs: Vec<f64> = column_a.iter().copied().collect();
            let ys: Vec<f64> = column_b.iter().copied().collect();
            let r = pearson(&xs, &ys).unwrap_or(0.0);
            if let Some(cell) = matrix.get_mut([a, b]) {
                *cell = r;
            }
            if let Some(cell) = matrix.get_mut([b, a]) {
                *cell = r;
            }
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_moments_matches_direct_computation() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut moments = RunningMoments::new();
        for value in values {
            moments.push(value);
        }

        assert!((moments.mean() - 5.0).abs() < 1e-12);
        // Sample std of the classic textbook sequence
        assert!((moments.std_dev() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let r = pearson(&xs, &ys).unwrap_or(0.0);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_none() {
        let xs = [3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(pearson(&xs, &ys).is_none());
    }
}
