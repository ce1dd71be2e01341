//! Evaluator trait turning angular coordinates into cell measurements.
//!
//! The tiling searches only talk to geometry through this trait, so an
//! alternative backend (or a deliberately failing one in tests) can be
//! swapped in without touching the search code.

use std::fmt;

use crate::coords::{cartesian_to_spherical, spherical_to_cartesian, wrap_angle};
use crate::error::GeometryError;
use crate::metrics::CellMetrics;
use crate::polygon::measure_polygons;
use crate::topology::Topology;
use crate::voronoi::SphericalVoronoi;

/// A Voronoi tessellation of generator points with its measurements.
#[derive(Debug, Clone)]
pub struct Tessellation {
    pub metrics: CellMetrics,

    /// Region vertex lists, one region per generator
    pub topology: Topology,

    /// Voronoi vertices as `[lat, lon]` pairs, longitude in `[-π, π)`
    pub vertices: Vec<[f64; 2]>,
}

impl Tessellation {
    /// Sorted region degrees.
    pub fn signature(&self) -> Vec<usize> {
        self.topology.signature()
    }
}

/// Trait for geometry backends.
///
/// Implementations could be:
/// - HullEvaluator: exact hull-dual construction (the default)
/// - test doubles that reject chosen inputs
pub trait GeometryEvaluator: Send + Sync + fmt::Debug {
    /// Build the Voronoi tessellation of generator points given as
    /// `[lon, lat]` pairs.
    fn build_tessellation(&self, points: &[[f64; 2]]) -> Result<Tessellation, GeometryError>;

    /// Measure the regions of a fixed topology with vertices given as
    /// `[lat, lon]` pairs.
    fn build_polygons(
        &self,
        vertices: &[[f64; 2]],
        topology: &Topology,
    ) -> Result<CellMetrics, GeometryError>;
}

/// Evaluator backed by [`SphericalVoronoi`] and [`measure_polygons`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HullEvaluator;

impl HullEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryEvaluator for HullEvaluator {
    fn build_tessellation(&self, points: &[[f64; 2]]) -> Result<Tessellation, GeometryError> {
        let generators = points
            .iter()
            .map(|&[lon, lat]| spherical_to_cartesian(lon, lat))
            .collect();
        let voronoi = SphericalVoronoi::new(generators)?;

        let vertices = voronoi
            .vertices()
            .iter()
            .map(|&v| {
                let (lon, lat) = cartesian_to_spherical(v);
                [lat, wrap_angle(lon)]
            })
            .collect();
        let topology = Topology::new(voronoi.regions().to_vec(), voronoi.vertices().len())?;

        Ok(Tessellation {
            metrics: voronoi.metrics(),
            topology,
            vertices,
        })
    }

    fn build_polygons(
        &self,
        vertices: &[[f64; 2]],
        topology: &Topology,
    ) -> Result<CellMetrics, GeometryError> {
        let corners: Vec<_> = vertices
            .iter()
            .map(|&[lat, lon]| spherical_to_cartesian(lon, lat))
            .collect();
        measure_polygons(&corners, topology)
    }
}
