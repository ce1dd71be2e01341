//! Spherical polygons over a fixed topology.
//!
//! Unlike a Voronoi diagram, the vertices here move freely and the regions
//! stay as given, so a region may become non-convex. Areas are therefore
//! computed as signed triangle fans around each region's centroid direction.

use glam::DVec3;

use crate::coords::{geodesic_distance, signed_triangle_area};
use crate::error::GeometryError;
use crate::metrics::CellMetrics;
use crate::topology::Topology;

/// Edges shorter than this collapse two vertices into one.
const MIN_EDGE_LENGTH: f64 = 1e-12;
/// Centroid norm below which a region has no usable fan centre.
const MIN_CENTROID_NORM: f64 = 1e-12;

/// Measure every region of `topology` with vertices at the given unit vectors.
pub fn measure_polygons(vertices: &[DVec3], topology: &Topology) -> Result<CellMetrics, GeometryError> {
    let mut areas = Vec::with_capacity(topology.num_regions());
    let mut edge_lengths = Vec::with_capacity(topology.num_edges());

    for (r, region) in topology.regions().iter().enumerate() {
        let k = region.len();
        if k < 3 {
            return Err(GeometryError::DegenerateInput(format!(
                "region {r} has only {k} vertices"
            )));
        }

        let corners: Vec<DVec3> = region
            .iter()
            .map(|&v| {
                vertices.get(v).copied().ok_or_else(|| {
                    GeometryError::InvalidTopology(format!("region {r} references missing vertex {v}"))
                })
            })
            .collect::<Result<_, _>>()?;

        let centroid: DVec3 = corners.iter().copied().sum();
        let norm = centroid.length();
        if norm < MIN_CENTROID_NORM {
            return Err(GeometryError::DegenerateInput(format!(
                "region {r} has no well-defined centre"
            )));
        }
        let center = centroid / norm;

        let mut signed_area = 0.0;
        for i in 0..k {
            let a = corners[i];
            let b = corners[(i + 1) % k];
            let length = geodesic_distance(a, b);
            if length < MIN_EDGE_LENGTH {
                return Err(GeometryError::DegenerateInput(format!(
                    "region {r} has a collapsed edge at position {i}"
                )));
            }
            edge_lengths.push(length);
            signed_area += signed_triangle_area(center, a, b);
        }

        if !signed_area.is_finite() {
            return Err(GeometryError::DegenerateInput(format!(
                "region {r} has a non-finite area"
            )));
        }
        areas.push(signed_area.abs());
    }

    Ok(CellMetrics {
        areas,
        perimeter: edge_lengths.iter().sum(),
        edge_lengths,
    })
}
