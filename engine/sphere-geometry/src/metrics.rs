//! Per-cell measurements shared by tessellations and fixed-topology polygons.

/// Areas, edge lengths and total perimeter of a set of spherical regions.
///
/// Edges are listed region by region, so an edge shared by two regions
/// appears twice and `perimeter` is twice the length of the edge network.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMetrics {
    pub areas: Vec<f64>,
    pub edge_lengths: Vec<f64>,
    pub perimeter: f64,
}

impl CellMetrics {
    /// Length of the edge network with every edge counted once.
    pub fn network_length(&self) -> f64 {
        self.perimeter / 2.0
    }

    pub fn total_area(&self) -> f64 {
        self.areas.iter().sum()
    }

    pub fn area_variance(&self) -> f64 {
        variance(&self.areas)
    }

    pub fn edge_variance(&self) -> f64 {
        variance(&self.edge_lengths)
    }
}

/// Population variance. Zero for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
