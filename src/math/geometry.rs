//! Planar geometry predicates for polygon boundaries
//!
//! Provides signed area, point containment, and circle coverage used for
//! boundary area normalization and edge correction of pair counts.

/// Signed area of a simple polygon via the shoelace formula
///
/// Positive for counter-clockwise vertex order, negative for clockwise.
/// The polygon is implicitly closed; the first vertex is not repeated.
pub fn signed_area(vertices: &[[f64; 2]]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let mut doubled = 0.0;
    for (index, &[x1, y1]) in vertices.iter().enumerate() {
        let next = vertices
            .get(index + 1)
            .or_else(|| vertices.first())
            .copied()
            .unwrap_or([x1, y1]);
        doubled = x1.mul_add(next[1], doubled) - next[0] * y1;
    }

    doubled / 2.0
}

/// Even-odd ray casting point-in-polygon test
///
/// Points exactly on an edge may land on either side of the predicate;
/// callers that need deterministic edge handling (quadrat assignment)
/// implement their own tie-break rather than relying on this test.
pub fn point_in_polygon(point: [f64; 2], vertices: &[[f64; 2]]) -> bool {
    let [px, py] = point;
    let mut inside = false;

    for (index, &[x1, y1]) in vertices.iter().enumerate() {
        let [x2, y2] = vertices
            .get(index + 1)
            .or_else(|| vertices.first())
            .copied()
            .unwrap_or([x1, y1]);

        let crosses = (y1 > py) != (y2 > py);
        if crosses {
            let slope_x = (x2 - x1).mul_add((py - y1) / (y2 - y1), x1);
            if px < slope_x {
                inside = !inside;
            }
        }
    }

    inside
}

/// Fraction of a circle's circumference lying inside a polygon
///
/// Samples the circumference at evenly spaced angles and tests each sample
/// for containment. Used as a Ripley-style edge correction: pairs whose
/// separation circle leaves the boundary are up-weighted by the reciprocal
/// of this fraction.
pub fn circle_coverage(
    vertices: &[[f64; 2]],
    center: [f64; 2],
    radius: f64,
    samples: usize,
) -> f64 {
    if samples == 0 || radius <= 0.0 {
        return 1.0;
    }

    let step = std::f64::consts::TAU / samples as f64;
    let mut inside = 0usize;
    for sample in 0..samples {
        let angle = step * sample as f64;
        let point = [
            radius.mul_add(angle.cos(), center[0]),
            radius.mul_add(angle.sin(), center[1]),
        ];
        if point_in_polygon(point, vertices) {
            inside += 1;
        }
    }

    inside as f64 / samples as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    #[test]
    fn test_signed_area_orientation() {
        assert!((signed_area(&UNIT_SQUARE) - 1.0).abs() < 1e-12);

        let clockwise: Vec<[f64; 2]> = UNIT_SQUARE.iter().rev().copied().collect();
        assert!((signed_area(&clockwise) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_in_polygon_square() {
        assert!(point_in_polygon([0.5, 0.5], &UNIT_SQUARE));
        assert!(!point_in_polygon([1.5, 0.5], &UNIT_SQUARE));
        assert!(!point_in_polygon([-0.1, 0.5], &UNIT_SQUARE));
    }

    #[test]
    fn test_circle_coverage_interior_and_corner() {
        let center_coverage = circle_coverage(&UNIT_SQUARE, [0.5, 0.5], 0.25, 256);
        assert!((center_coverage - 1.0).abs() < 1e-12);

        // A circle centred on a corner keeps roughly a quarter of its
        // circumference inside the square
        let corner_coverage = circle_coverage(&UNIT_SQUARE, [0.0, 0.0], 0.25, 1024);
        assert!((corner_coverage - 0.25).abs() < 0.02);
    }
}
