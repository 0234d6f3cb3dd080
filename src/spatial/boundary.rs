//! Closed polygon boundaries delimiting the valid spatial domain
//!
//! A boundary supplies the domain area for density normalization, point
//! containment for quadrat counting, and circumference coverage for the
//! pair-correlation edge correction. When no explicit boundary is supplied,
//! the minimal axis-aligned bounding box of the loaded points is used.

use crate::io::error::{AnalysisError, Result};
use crate::math::geometry;
use crate::spatial::points::PointSet;

/// Closed simple polygon with strictly positive area
///
/// Vertices are stored without repeating the first vertex; the closing edge
/// is implicit. Axis-aligned rectangles remember their shape so containment
/// and coverage queries can take an exact fast path.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    vertices: Vec<[f64; 2]>,
    is_rectangle: bool,
}

impl Boundary {
    /// Create a boundary from polygon vertices
    ///
    /// A trailing vertex equal to the first is dropped before validation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if fewer than three distinct vertices
    /// remain, any vertex is non-finite, or the enclosed area is zero
    pub fn polygon(mut vertices: Vec<[f64; 2]>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!("boundary needs at least 3 vertices, got {}", vertices.len()),
            });
        }

        for &[x, y] in &vertices {
            if !x.is_finite() || !y.is_finite() {
                return Err(AnalysisError::InvalidSourceData {
                    reason: format!("non-finite boundary vertex ({x}, {y})"),
                });
            }
        }

        if geometry::signed_area(&vertices).abs() <= f64::EPSILON {
            return Err(AnalysisError::InvalidSourceData {
                reason: "boundary encloses zero area".to_string(),
            });
        }

        Ok(Self {
            vertices,
            is_rectangle: false,
        })
    }

    /// Create an axis-aligned rectangular boundary from corner coordinates
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the corners are non-finite or the
    /// rectangle is degenerate in either axis
    pub fn rectangle(min: [f64; 2], max: [f64; 2]) -> Result<Self> {
        if !min[0].is_finite() || !min[1].is_finite() || !max[0].is_finite() || !max[1].is_finite()
        {
            return Err(AnalysisError::InvalidSourceData {
                reason: "non-finite rectangle corner".to_string(),
            });
        }

        if max[0] <= min[0] || max[1] <= min[1] {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!(
                    "degenerate rectangle: ({}, {}) to ({}, {})",
                    min[0], min[1], max[0], max[1]
                ),
            });
        }

        Ok(Self {
            vertices: vec![
                [min[0], min[1]],
                [max[0], min[1]],
                [max[0], max[1]],
                [min[0], max[1]],
            ],
            is_rectangle: true,
        })
    }

    /// Infer a bounding-box boundary from a point set
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the point set is empty or all points
    /// are collinear along an axis (zero-area box)
    pub fn bounding_box_of(points: &PointSet) -> Result<Self> {
        let (min, max) = points
            .bounding_box()
            .ok_or_else(|| AnalysisError::InvalidSourceData {
                reason: "cannot infer a boundary from an empty point set".to_string(),
            })?;

        Self::rectangle(min, max)
    }

    /// Polygon vertices without the repeated closing vertex
    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Enclosed area, strictly positive by construction
    pub fn area(&self) -> f64 {
        geometry::signed_area(&self.vertices).abs()
    }

    /// Axis-aligned bounding box of the boundary as `(min, max)` corners
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = self.vertices.first().copied().unwrap_or([0.0, 0.0]);
        let mut max = min;
        for &[x, y] in &self.vertices {
            min[0] = min[0].min(x);
            min[1] = min[1].min(y);
            max[0] = max[0].max(x);
            max[1] = max[1].max(y);
        }
        (min, max)
    }

    /// Test whether a point lies inside the boundary
    ///
    /// Rectangle boundaries treat edges as inclusive; general polygons use
    /// even-odd ray casting.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        if self.is_rectangle {
            let (min, max) = self.bounding_box();
            return point[0] >= min[0]
                && point[0] <= max[0]
                && point[1] >= min[1]
                && point[1] <= max[1];
        }

        geometry::point_in_polygon(point, &self.vertices)
    }

    /// Fraction of a circle's circumference lying inside the boundary
    ///
    /// Circles fully contained in a rectangular boundary short-circuit to
    /// 1.0; all other cases sample the circumference.
    pub fn circle_coverage(&self, center: [f64; 2], radius: f64, samples: usize) -> f64 {
        if self.is_rectangle {
            let (min, max) = self.bounding_box();
            let clearance = (center[0] - min[0])
                .min(max[0] - center[0])
                .min(center[1] - min[1])
                .min(max[1] - center[1]);
            if radius <= clearance {
                return 1.0;
            }
        }

        geometry::circle_coverage(&self.vertices, center, radius, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_area_is_exact() {
        let points = PointSet::new(vec![[0.0, 0.0], [100.0, 25.0], [40.0, 50.0]]);
        let Ok(points) = points else {
            unreachable!("finite coordinates must construct")
        };
        let Ok(boundary) = Boundary::bounding_box_of(&points) else {
            unreachable!("non-degenerate box must construct")
        };
        assert!((boundary.area() - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polygon_rejects_zero_area() {
        let collinear = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        assert!(Boundary::polygon(collinear).is_err());
    }

    #[test]
    fn test_interior_circle_has_full_coverage() {
        let Ok(boundary) = Boundary::rectangle([0.0, 0.0], [10.0, 10.0]) else {
            unreachable!("valid rectangle must construct")
        };
        assert!((boundary.circle_coverage([5.0, 5.0], 2.0, 128) - 1.0).abs() < f64::EPSILON);
        assert!(boundary.circle_coverage([0.5, 5.0], 2.0, 128) < 1.0);
    }
}
