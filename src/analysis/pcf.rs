//! Cross pair-correlation function between two labelled populations
//!
//! Estimates g(r), the ratio of observed pair counts at separation r to the
//! count expected under complete spatial randomness. Values above 1 signal
//! clustering at that scale, values below 1 signal exclusion. Pairs whose
//! separation circle leaves the boundary are up-weighted by a Ripley-style
//! edge correction.

use serde::Serialize;

use crate::io::configuration::{EDGE_CORRECTION_SAMPLES, MIN_CIRCLE_COVERAGE};
use crate::io::error::{Result, insufficient_data, invalid_parameter};
use crate::spatial::index::GridIndex;
use crate::spatial::labels::Domain;

/// Parameters for the cross pair-correlation function
#[derive(Debug, Clone)]
pub struct PcfConfig {
    /// Maximum separation radius covered by the annulus sequence
    pub max_radius: f64,
    /// Width of each counting annulus
    pub annulus_width: f64,
    /// Spacing between successive annulus inner radii
    pub step: f64,
}

impl PcfConfig {
    fn validate(&self) -> Result<()> {
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(invalid_parameter(
                "max_radius",
                &self.max_radius,
                &"maximum radius must be strictly positive",
            ));
        }
        if !self.annulus_width.is_finite() || self.annulus_width <= 0.0 {
            return Err(invalid_parameter(
                "annulus_width",
                &self.annulus_width,
                &"annulus width must be strictly positive",
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(invalid_parameter(
                "step",
                &self.step,
                &"annulus step must be strictly positive",
            ));
        }
        if self.annulus_width > self.max_radius {
            return Err(invalid_parameter(
                "annulus_width",
                &self.annulus_width,
                &"annulus width exceeds the maximum radius; no annulus fits",
            ));
        }
        Ok(())
    }

    // Inner radii of all annuli fitting inside the maximum radius
    fn radii(&self) -> Vec<f64> {
        let mut radii = Vec::new();
        let mut annulus = 0usize;
        loop {
            let radius = annulus as f64 * self.step;
            if radius + self.annulus_width > self.max_radius + 1e-9 {
                break;
            }
            radii.push(radius);
            annulus += 1;
        }
        radii
    }
}

/// One sampled point of the pair-correlation curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PcfSample {
    /// Inner radius of the counting annulus
    pub radius: f64,
    /// Ratio of observed to expected pair counts in `[radius, radius + width)`
    pub g: f64,
}

/// Cross pair-correlation curve for a pair of populations
#[derive(Debug, Clone, Serialize)]
pub struct CrossPcfResult {
    /// Label value selecting the source population
    pub from: String,
    /// Label value selecting the target population
    pub to: String,
    /// Samples ordered by increasing radius
    pub samples: Vec<PcfSample>,
}

/// Compute the cross pair-correlation function between two populations
///
/// Populations are selected from a categorical label by value and may be
/// identical, in which case self-pairs are excluded and the expected count
/// uses ordered pairs `n(n - 1)`.
///
/// # Errors
///
/// Returns `InvalidParameter` for non-positive radius, width, or step (or an
/// unknown label value), `DataFormat` if the label is absent or not
/// categorical, and `InsufficientData` if either population holds fewer than
/// two points
pub fn cross_pcf(
    domain: &Domain,
    label_name: &str,
    from_value: &str,
    to_value: &str,
    config: &PcfConfig,
) -> Result<CrossPcfResult> {
    config.validate()?;

    let label = domain.categorical(label_name)?;
    let from_code = label
        .code_of(from_value)
        .ok_or_else(|| invalid_parameter("from", &from_value, &"label value not present"))?;
    let to_code = label
        .code_of(to_value)
        .ok_or_else(|| invalid_parameter("to", &to_value, &"label value not present"))?;

    let source = label.points_with_code(from_code);
    let target = label.points_with_code(to_code);
    if source.len() < 2 {
        return Err(insufficient_data(
            &format!("population '{from_value}'"),
            source.len(),
            2,
        ));
    }
    if target.len() < 2 {
        return Err(insufficient_data(
            &format!("population '{to_value}'"),
            target.len(),
            2,
        ));
    }

    let radii = config.radii();
    let reach = radii.last().copied().unwrap_or(0.0) + config.annulus_width;
    let same_population = from_code == to_code;

    let points = domain.points();
    let boundary = domain.boundary();
    let index = GridIndex::build(points, &target, reach)?;

    let mut bin_weights = vec![0.0f64; radii.len()];
    let mut candidates = Vec::new();

    for &source_identity in &source {
        let Some(center) = points.get(source_identity) else {
            continue;
        };

        index.candidates_near(center, &mut candidates);
        for &target_identity in &candidates {
            if same_population && target_identity == source_identity {
                continue;
            }
            let Some(neighbour) = points.get(target_identity) else {
                continue;
            };

            let distance = (center[0] - neighbour[0]).hypot(center[1] - neighbour[1]);
            if distance >= reach {
                continue;
            }

            let coverage = boundary
                .circle_coverage(center, distance, EDGE_CORRECTION_SAMPLES)
                .max(MIN_CIRCLE_COVERAGE);
            let weight = coverage.recip();

            // Annuli may overlap when the step is finer than the width, so
            // one pair can contribute to several bins
            let first_annulus = if distance < config.annulus_width {
                0
            } else {
                (((distance - config.annulus_width) / config.step).floor() as usize) + 1
            };
            let last_annulus = ((distance / config.step).floor() as usize).min(
                radii.len().saturating_sub(1),
            );
            for annulus in first_annulus..=last_annulus {
                if let Some(bin) = bin_weights.get_mut(annulus) {
                    *bin += weight;
                }
            }
        }
    }

    let area = boundary.area();
    let ordered_pairs = if same_population {
        (source.len() * (source.len() - 1)) as f64
    } else {
        (source.len() * target.len()) as f64
    };

    let samples = radii
        .iter()
        .zip(bin_weights.iter())
        .map(|(&radius, &weighted_count)| {
            let outer = radius + config.annulus_width;
            let annulus_area = std::f64::consts::PI * outer.mul_add(outer, -(radius * radius));
            PcfSample {
                radius,
                g: area * weighted_count / (ordered_pairs * annulus_area),
            }
        })
        .collect();

    Ok(CrossPcfResult {
        from: from_value.to_string(),
        to: to_value.to_string(),
        samples,
    })
}
