//! Quadrat tiling of a boundary's bounding box
//!
//! Partitions the spatial domain into fixed-size square regions for counting.
//! Points falling exactly on a shared edge are assigned to the lower/left
//! region so tilings never double-count.

use ndarray::Array2;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::boundary::Boundary;
use crate::spatial::points::PointSet;

/// Regular square tiling covering a boundary's bounding box
#[derive(Debug, Clone)]
pub struct QuadratGrid {
    origin: [f64; 2],
    side: f64,
    columns: usize,
    rows: usize,
}

impl QuadratGrid {
    /// Tile the boundary's bounding box with squares of the given side
    ///
    /// The tiling starts at the bounding box minimum corner; the final row
    /// and column may overhang the boundary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the side length is not strictly
    /// positive and finite
    pub fn tile(boundary: &Boundary, side: f64) -> Result<Self> {
        if !side.is_finite() || side <= 0.0 {
            return Err(invalid_parameter(
                "side",
                &side,
                &"quadrat side length must be strictly positive",
            ));
        }

        let (min, max) = boundary.bounding_box();
        let columns = (((max[0] - min[0]) / side).ceil() as usize).max(1);
        let rows = (((max[1] - min[1]) / side).ceil() as usize).max(1);

        Ok(Self {
            origin: min,
            side,
            columns,
            rows,
        })
    }

    /// Number of regions in the tiling
    pub const fn region_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Quadrat side length
    pub const fn side(&self) -> f64 {
        self.side
    }

    /// Region index of a point, or `None` outside the tiled area
    ///
    /// Points exactly on an interior shared edge belong to the lower/left
    /// region; points on the tiling's outer maximum edge belong to the last
    /// row or column.
    pub fn region_of(&self, point: [f64; 2]) -> Option<usize> {
        let column = Self::axis_index(point[0] - self.origin[0], self.side, self.columns)?;
        let row = Self::axis_index(point[1] - self.origin[1], self.side, self.rows)?;
        Some(row * self.columns + column)
    }

    /// Count occurrences of each label code per region
    ///
    /// Produces a `region_count x level_count` matrix of counts. Points
    /// outside the tiled area or outside the boundary are skipped. Codes are
    /// taken positionally, aligned with point identity.
    pub fn count_by_region(
        &self,
        points: &PointSet,
        boundary: &Boundary,
        codes: &[usize],
        level_count: usize,
    ) -> Array2<f64> {
        let mut counts = Array2::zeros((self.region_count(), level_count));

        for (identity, coordinate) in points.iter() {
            let Some(&code) = codes.get(identity) else {
                continue;
            };
            if code >= level_count || !boundary.contains(coordinate) {
                continue;
            }
            if let Some(region) = self.region_of(coordinate) {
                if let Some(cell) = counts.get_mut([region, code]) {
                    *cell += 1.0;
                }
            }
        }

        counts
    }

    // Lower/left tie-break: offsets landing exactly on an interior edge are
    // pushed into the preceding interval
    #[allow(clippy::float_cmp)] // exact edge hits must compare equal
    fn axis_index(offset: f64, side: f64, limit: usize) -> Option<usize> {
        if offset < 0.0 {
            return None;
        }

        let floor = (offset / side).floor();
        let mut index = floor as usize;
        if index > 0 && offset == floor * side {
            index -= 1;
        }

        (index < limit).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_10x10() -> QuadratGrid {
        let Ok(boundary) = Boundary::rectangle([0.0, 0.0], [100.0, 100.0]) else {
            unreachable!("valid rectangle must construct")
        };
        let Ok(grid) = QuadratGrid::tile(&boundary, 10.0) else {
            unreachable!("positive side must tile")
        };
        grid
    }

    #[test]
    fn test_shared_edge_goes_to_lower_left_region() {
        let grid = grid_10x10();
        assert_eq!(grid.region_count(), 100);

        // Interior point
        assert_eq!(grid.region_of([5.0, 5.0]), Some(0));
        // Exactly on the vertical edge between columns 0 and 1
        assert_eq!(grid.region_of([10.0, 5.0]), Some(0));
        // Exactly on the horizontal edge between rows 0 and 1
        assert_eq!(grid.region_of([5.0, 10.0]), Some(0));
        // Outer maximum corner lands in the last region
        assert_eq!(grid.region_of([100.0, 100.0]), Some(99));
    }

    #[test]
    fn test_points_outside_tiling_have_no_region() {
        let grid = grid_10x10();
        assert_eq!(grid.region_of([-0.1, 5.0]), None);
        assert_eq!(grid.region_of([5.0, 100.1]), None);
    }

    #[test]
    fn test_zero_side_is_rejected() {
        let Ok(boundary) = Boundary::rectangle([0.0, 0.0], [10.0, 10.0]) else {
            unreachable!("valid rectangle must construct")
        };
        assert!(QuadratGrid::tile(&boundary, 0.0).is_err());
        assert!(QuadratGrid::tile(&boundary, -3.0).is_err());
    }
}
