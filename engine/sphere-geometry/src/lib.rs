//! Spherical geometry backend for the tiling searches.
//!
//! This crate turns angular coordinates into the measurements the search
//! costs are built from:
//! - [`SphericalVoronoi`]: Voronoi regions of free generator points
//! - [`measure_polygons`]: regions of a fixed topology with free vertices
//! - [`GeometryEvaluator`]: the trait the searches consume, implemented by
//!   [`HullEvaluator`]
//!
//! Everything lives on the unit sphere.

pub mod coords;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod polygon;
pub mod topology;
pub mod voronoi;

// Re-export main types for convenience
pub use coords::{cartesian_to_spherical, geodesic_distance, spherical_to_cartesian, wrap_angle};
pub use error::GeometryError;
pub use evaluator::{GeometryEvaluator, HullEvaluator, Tessellation};
pub use metrics::{variance, CellMetrics};
pub use polygon::measure_polygons;
pub use topology::Topology;
pub use voronoi::SphericalVoronoi;
