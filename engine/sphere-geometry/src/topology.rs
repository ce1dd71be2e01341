//! Combinatorial structure of a tessellation: which vertices bound which
//! region, in counter-clockwise order.

use serde::Serialize;

use crate::error::GeometryError;

/// Region vertex lists of a spherical tessellation.
///
/// Serialises as the bare list of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Topology {
    regions: Vec<Vec<usize>>,
}

impl Topology {
    /// Wrap region lists, checking every index against `num_vertices`.
    pub fn new(regions: Vec<Vec<usize>>, num_vertices: usize) -> Result<Self, GeometryError> {
        for (r, region) in regions.iter().enumerate() {
            if let Some(&bad) = region.iter().find(|&&v| v >= num_vertices) {
                return Err(GeometryError::InvalidTopology(format!(
                    "region {r} references vertex {bad}, only {num_vertices} exist"
                )));
            }
        }
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Vec<usize>] {
        &self.regions
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// Sum of region degrees. Every edge is counted once per adjacent
    /// region, so this is twice the number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.regions.iter().map(Vec::len).sum()
    }

    /// Sorted region degrees, independent of coordinates.
    pub fn signature(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.regions.iter().map(Vec::len).collect();
        degrees.sort_unstable();
        degrees
    }
}
