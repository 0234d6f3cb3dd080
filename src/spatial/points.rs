//! Immutable 2D point sets with stable integer identity
//!
//! A point's identity is its load-order index; the coordinate sequence is
//! fixed once constructed so label attachments stay aligned for the lifetime
//! of an analysis.

use crate::io::error::{AnalysisError, Result};

/// Ordered, immutable sequence of finite 2D coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    coordinates: Vec<[f64; 2]>,
}

impl PointSet {
    /// Create a point set from raw coordinates
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if any coordinate is NaN or infinite
    pub fn new(coordinates: Vec<[f64; 2]>) -> Result<Self> {
        for (index, &[x, y]) in coordinates.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(AnalysisError::InvalidSourceData {
                    reason: format!("non-finite coordinate ({x}, {y}) at point {index}"),
                });
            }
        }

        Ok(Self { coordinates })
    }

    /// Number of points in the set
    pub const fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Check whether the set holds no points
    pub const fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Coordinate of the point with the given identity, if present
    pub fn get(&self, index: usize) -> Option<[f64; 2]> {
        self.coordinates.get(index).copied()
    }

    /// All coordinates in identity order
    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    /// Iterate over `(identity, coordinate)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, [f64; 2])> + '_ {
        self.coordinates.iter().copied().enumerate()
    }

    /// Minimal axis-aligned bounding box as `(min, max)` corners
    ///
    /// Returns `None` for an empty point set.
    pub fn bounding_box(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.coordinates.first()?;
        let mut min = *first;
        let mut max = *first;

        for &[x, y] in &self.coordinates {
            min[0] = min[0].min(x);
            min[1] = min[1].min(y);
            max[0] = max[0].max(x);
            max[1] = max[1].max(y);
        }

        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let result = PointSet::new(vec![[0.0, 1.0], [f64::NAN, 2.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bounding_box_spans_all_points() {
        let points = PointSet::new(vec![[3.0, -1.0], [-2.0, 4.0], [0.5, 0.5]]);
        let Ok(points) = points else {
            unreachable!("finite coordinates must construct")
        };
        assert_eq!(points.bounding_box(), Some(([-2.0, -1.0], [3.0, 4.0])));
    }
}
