//! Cost weights shared by every configuration of a run.

use sphere_geometry::CellMetrics;

/// Weights of the three cost terms.
///
/// `cost = area * Var(areas) + perimeter ^ perimeter_exponent + edge * Var(edge lengths)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub area: f64,
    pub perimeter_exponent: f64,
    pub edge: f64,
}

impl CostWeights {
    pub fn new(area: f64, perimeter_exponent: f64, edge: f64) -> Self {
        Self {
            area,
            perimeter_exponent,
            edge,
        }
    }

    /// Weights whose variance terms grow linearly with the region count.
    pub fn scaled(size: usize, area_scale: f64, perimeter_exponent: f64, edge_scale: f64) -> Self {
        let n = size as f64;
        Self::new(area_scale * n, perimeter_exponent, edge_scale * n)
    }

    /// `[5N, 1, 0]`
    pub fn placement(size: usize) -> Self {
        Self::scaled(size, 5.0, 1.0, 0.0)
    }

    /// `[20N, 1, 10N]`
    pub fn relaxation(size: usize) -> Self {
        Self::scaled(size, 20.0, 1.0, 10.0)
    }

    pub fn cost(&self, metrics: &CellMetrics) -> f64 {
        self.area * metrics.area_variance()
            + metrics.perimeter.powf(self.perimeter_exponent)
            + self.edge * metrics.edge_variance()
    }
}
