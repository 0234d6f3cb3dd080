//! Spatial domain model: point sets, labels, boundaries, and tilings

/// Closed polygon boundaries with area and containment queries
pub mod boundary;
/// Uniform-grid neighbour index for radius-bounded pair sweeps
pub mod index;
/// Categorical and continuous label attachments on a point set
pub mod labels;
/// Immutable 2D point sets with stable integer identity
pub mod points;
/// Quadrat tiling of a boundary's bounding box
pub mod quadrats;

pub use boundary::Boundary;
pub use index::GridIndex;
pub use labels::{CategoricalLabel, ContinuousLabel, Domain, LabelAttachment};
pub use points::PointSet;
pub use quadrats::QuadratGrid;
