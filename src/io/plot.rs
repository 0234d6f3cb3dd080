//! Scatter-plot rendering of labelled point sets
//!
//! Renders a PNG overlay of a domain: points coloured by the active label
//! attachment (a fixed palette for categorical labels, a blue-to-red ramp
//! for continuous ones) with the boundary outlined. All appearance options
//! travel in an explicit [`PlotConfig`]; there is no shared colour-map state.

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::io::configuration::{PLOT_MARGIN, PLOT_WIDTH, POINT_HALF_SIZE};
use crate::io::error::{AnalysisError, Result, computation_error};
use crate::spatial::labels::{Domain, LabelAttachment};

/// Distinguishable colours for categorical levels, reused cyclically
const CATEGORY_PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

/// Appearance options for a single render call
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Output image width in pixels; height follows the boundary aspect
    pub width: u32,
    /// Background colour
    pub background: [u8; 3],
    /// Whether to outline the boundary polygon
    pub draw_boundary: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            background: [255, 255, 255],
            draw_boundary: true,
        }
    }
}

/// Render a domain's points coloured by the given label attachment
///
/// # Errors
///
/// Returns `DataFormat` if the label is absent and `Computation` if the
/// configured width leaves no drawable area
pub fn render_scatter(domain: &Domain, label_name: &str, config: &PlotConfig) -> Result<RgbImage> {
    let attachment = domain
        .label(label_name)
        .ok_or_else(|| crate::io::error::data_format(&label_name, &"no label attachment"))?;

    let (min, max) = domain.boundary().bounding_box();
    let drawable = config.width.saturating_sub(2 * PLOT_MARGIN);
    if drawable == 0 {
        return Err(computation_error(
            "plot layout",
            &format!("width {} leaves no drawable area", config.width),
        ));
    }

    let span_x = max[0] - min[0];
    let span_y = max[1] - min[1];
    let scale = drawable as f64 / span_x;
    let height = ((span_y * scale).ceil() as u32).max(1) + 2 * PLOT_MARGIN;

    let mut img = RgbImage::from_pixel(
        config.width,
        height,
        Rgb(config.background),
    );

    if config.draw_boundary {
        draw_boundary(&mut img, domain, min, scale, height);
    }

    for (identity, [x, y]) in domain.points().iter() {
        let pixel = to_pixel([x, y], min, scale, height);
        let colour = point_colour(attachment, identity);
        draw_point(&mut img, pixel, colour);
    }

    Ok(img)
}

/// Render and save a scatter plot as PNG
///
/// # Errors
///
/// Propagates rendering errors and returns `PlotExport` if the image cannot
/// be written
pub fn export_scatter_png(
    domain: &Domain,
    label_name: &str,
    config: &PlotConfig,
    path: &Path,
) -> Result<()> {
    let img = render_scatter(domain, label_name, config)?;
    img.save(path).map_err(|e| AnalysisError::PlotExport {
        path: path.to_path_buf(),
        source: e,
    })
}

fn to_pixel(point: [f64; 2], min: [f64; 2], scale: f64, height: u32) -> [i64; 2] {
    let x = (point[0] - min[0]).mul_add(scale, PLOT_MARGIN as f64);
    // Image rows grow downwards; flip y so the plot reads bottom-up
    let y = height as f64 - (point[1] - min[1]).mul_add(scale, PLOT_MARGIN as f64);
    [x.round() as i64, y.round() as i64]
}

fn point_colour(attachment: &LabelAttachment, identity: usize) -> Rgb<u8> {
    match attachment {
        LabelAttachment::Categorical(label) => {
            let code = label.codes().get(identity).copied().unwrap_or(0);
            let palette = CATEGORY_PALETTE
                .get(code % CATEGORY_PALETTE.len())
                .copied()
                .unwrap_or([0, 0, 0]);
            Rgb(palette)
        }
        LabelAttachment::Continuous(label) => {
            let value = label.values().get(identity).copied().unwrap_or(0.0);
            let (low, high) = label.range().unwrap_or((0.0, 1.0));
            let span = (high - low).max(f64::EPSILON);
            let t = ((value - low) / span).clamp(0.0, 1.0);
            // Blue (low) to red (high)
            Rgb([
                (t * 255.0).round() as u8,
                0,
                ((1.0 - t) * 255.0).round() as u8,
            ])
        }
    }
}

fn draw_point(img: &mut RgbImage, pixel: [i64; 2], colour: Rgb<u8>) {
    for dy in -POINT_HALF_SIZE..=POINT_HALF_SIZE {
        for dx in -POINT_HALF_SIZE..=POINT_HALF_SIZE {
            put_pixel_checked(img, pixel[0] + dx, pixel[1] + dy, colour);
        }
    }
}

fn draw_boundary(img: &mut RgbImage, domain: &Domain, min: [f64; 2], scale: f64, height: u32) {
    let outline = Rgb([60, 60, 60]);
    let vertices = domain.boundary().vertices();

    for (index, &start) in vertices.iter().enumerate() {
        let end = vertices
            .get(index + 1)
            .or_else(|| vertices.first())
            .copied()
            .unwrap_or(start);

        let from = to_pixel(start, min, scale, height);
        let to = to_pixel(end, min, scale, height);
        draw_segment(img, from, to, outline);
    }
}

// Sample along the segment at pixel resolution
fn draw_segment(img: &mut RgbImage, from: [i64; 2], to: [i64; 2], colour: Rgb<u8>) {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let steps = dx.abs().max(dy.abs()).max(1);

    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = (dx as f64).mul_add(t, from[0] as f64).round() as i64;
        let y = (dy as f64).mul_add(t, from[1] as f64).round() as i64;
        put_pixel_checked(img, x, y, colour);
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, colour: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, colour);
    }
}
