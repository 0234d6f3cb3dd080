//! Uniform-grid neighbour index for radius-bounded pair sweeps
//!
//! Buckets a subset of points into square cells at least as wide as the
//! query radius, so candidate neighbours of any point are confined to the
//! 3x3 cell neighbourhood around it.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::points::PointSet;

/// Spatial hash over a subset of a point set
#[derive(Debug, Clone)]
pub struct GridIndex {
    origin: [f64; 2],
    cell_size: f64,
    columns: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl GridIndex {
    /// Build an index over the given point identities
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the cell size is not strictly positive
    /// and finite
    pub fn build(points: &PointSet, subset: &[usize], cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"index cell size must be strictly positive",
            ));
        }

        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        for &identity in subset {
            if let Some([x, y]) = points.get(identity) {
                min[0] = min[0].min(x);
                min[1] = min[1].min(y);
                max[0] = max[0].max(x);
                max[1] = max[1].max(y);
            }
        }

        if subset.is_empty() || min[0] > max[0] {
            return Ok(Self {
                origin: [0.0, 0.0],
                cell_size,
                columns: 0,
                rows: 0,
                cells: Vec::new(),
            });
        }

        let columns = (((max[0] - min[0]) / cell_size).floor() as usize) + 1;
        let rows = (((max[1] - min[1]) / cell_size).floor() as usize) + 1;
        let mut cells = vec![Vec::new(); columns * rows];

        for &identity in subset {
            if let Some([x, y]) = points.get(identity) {
                let column = (((x - min[0]) / cell_size).floor() as usize).min(columns - 1);
                let row = (((y - min[1]) / cell_size).floor() as usize).min(rows - 1);
                if let Some(cell) = cells.get_mut(row * columns + column) {
                    cell.push(identity);
                }
            }
        }

        Ok(Self {
            origin: min,
            cell_size,
            columns,
            rows,
            cells,
        })
    }

    /// Identities of indexed points that may lie within one cell size of
    /// the query point
    ///
    /// Returns a superset of the true neighbours; callers filter by exact
    /// distance.
    pub fn candidates_near(&self, point: [f64; 2], out: &mut Vec<usize>) {
        out.clear();
        if self.cells.is_empty() {
            return;
        }

        let column = ((point[0] - self.origin[0]) / self.cell_size).floor() as i64;
        let row = ((point[1] - self.origin[1]) / self.cell_size).floor() as i64;

        for row_offset in -1..=1i64 {
            for column_offset in -1..=1i64 {
                let neighbour_row = row + row_offset;
                let neighbour_column = column + column_offset;
                if neighbour_row < 0
                    || neighbour_column < 0
                    || neighbour_row >= self.rows as i64
                    || neighbour_column >= self.columns as i64
                {
                    continue;
                }
                let cell_index = neighbour_row as usize * self.columns + neighbour_column as usize;
                if let Some(cell) = self.cells.get(cell_index) {
                    out.extend_from_slice(cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_cover_all_points_within_radius() {
        let coordinates: Vec<[f64; 2]> = (0..100)
            .map(|index| [(index % 10) as f64 * 7.0, (index / 10) as f64 * 7.0])
            .collect();
        let Ok(points) = PointSet::new(coordinates) else {
            unreachable!("finite coordinates must construct")
        };
        let subset: Vec<usize> = (0..points.len()).collect();
        let Ok(index) = GridIndex::build(&points, &subset, 15.0) else {
            unreachable!("positive cell size must build")
        };

        let query = [35.0, 35.0];
        let mut candidates = Vec::new();
        index.candidates_near(query, &mut candidates);

        for (identity, [x, y]) in points.iter() {
            let distance = (x - query[0]).hypot(y - query[1]);
            if distance <= 15.0 {
                assert!(
                    candidates.contains(&identity),
                    "point {identity} within radius missing from candidates"
                );
            }
        }
    }
}
