//! Analysis constants and runtime configuration defaults

// Edge correction settings for the pair-correlation function
/// Circumference samples per coverage query
pub const EDGE_CORRECTION_SAMPLES: usize = 128;
/// Floor on circle coverage to keep edge weights bounded
pub const MIN_CIRCLE_COVERAGE: f64 = 0.05;

// Default values for configurable parameters
/// Fixed seed for reproducible permutation nulls
pub const DEFAULT_SEED: u64 = 42;
/// Default permutation replicate count
pub const DEFAULT_PERMUTATIONS: usize = 1000;
/// Default quadrat side length in coordinate units
pub const DEFAULT_QUADRAT_SIDE: f64 = 100.0;
/// Default minimum observations per retained region
pub const DEFAULT_MIN_OBSERVATIONS: usize = 5;
/// Default maximum pair-correlation radius
pub const DEFAULT_MAX_RADIUS: f64 = 150.0;
/// Default annulus width
pub const DEFAULT_ANNULUS_WIDTH: f64 = 10.0;
/// Default annulus step
pub const DEFAULT_ANNULUS_STEP: f64 = 5.0;

// Input parsing
/// Name of the x-coordinate column
pub const COLUMN_X: &str = "x";
/// Name of the y-coordinate column
pub const COLUMN_Y: &str = "y";
/// Name of the categorical cell type column
pub const COLUMN_CELL_TYPE: &str = "Cell type";

// Plot rendering defaults
/// Width of rendered scatter plots in pixels
pub const PLOT_WIDTH: u32 = 800;
/// Margin around the plotted area in pixels
pub const PLOT_MARGIN: u32 = 20;
/// Half-size of the square drawn per point, in pixels
pub const POINT_HALF_SIZE: i64 = 1;

// Output settings
/// Suffix added to JSON analysis exports
pub const ANALYSIS_SUFFIX: &str = "_analysis";
/// Suffix added to scatter-plot exports
pub const PLOT_SUFFIX: &str = "_scatter";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
