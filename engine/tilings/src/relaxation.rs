//! Vertex relaxation over a fixed topology.
//!
//! Starting from the Voronoi vertices of a placement, the vertices move
//! freely while every region keeps its vertex list. Vertices are `[lat, lon]`
//! pairs and vertex 0 stays pinned.

use std::sync::Arc;

use mcts::{Configuration, Sample};
use once_cell::unsync::OnceCell;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::{CellMetrics, GeometryError, Tessellation, Topology};
use tracing::trace;

use crate::context::SearchContext;
use crate::perturb::perturb;

/// Divisor applied to the mean edge length to get the starting radius.
const RADIUS_DIVISOR: f64 = 5.0;

/// A candidate vertex layout for a fixed set of regions.
#[derive(Debug, Clone)]
pub struct Relaxation {
    vertices: Vec<[f64; 2]>,
    radius: f64,
    topology: Arc<Topology>,
    metrics: CellMetrics,
    context: Arc<SearchContext>,
    cost: OnceCell<f64>,
}

impl Relaxation {
    /// Build a layout and measure its regions.
    pub fn new(
        vertices: Vec<[f64; 2]>,
        topology: Arc<Topology>,
        radius: f64,
        context: Arc<SearchContext>,
    ) -> Result<Self, GeometryError> {
        let metrics = context.evaluator.build_polygons(&vertices, &topology)?;
        Ok(Self {
            vertices,
            radius,
            topology,
            metrics,
            context,
            cost: OnceCell::new(),
        })
    }

    /// Start from the vertices and regions of a tessellation.
    ///
    /// The starting radius is a fifth of the mean region edge length.
    pub fn from_tessellation(
        tessellation: &Tessellation,
        context: Arc<SearchContext>,
    ) -> Result<Self, GeometryError> {
        let topology = Arc::new(tessellation.topology.clone());
        let vertices = tessellation.vertices.clone();

        let metrics = context.evaluator.build_polygons(&vertices, &topology)?;
        let edges = topology.num_edges();
        if edges == 0 {
            return Err(GeometryError::InvalidTopology("topology has no edges".into()));
        }
        let radius = metrics.perimeter / (RADIUS_DIVISOR * edges as f64);

        Ok(Self {
            vertices,
            radius,
            topology,
            metrics,
            context,
            cost: OnceCell::new(),
        })
    }

    /// Vertices as `[lat, lon]`.
    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }
}

impl Configuration for Relaxation {
    fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self> {
        let vertices = perturb(&self.vertices, self.radius, rng);
        let radius = self.radius * self.context.decay;

        match Relaxation::new(
            vertices,
            Arc::clone(&self.topology),
            radius,
            Arc::clone(&self.context),
        ) {
            Ok(next) => Sample::Valid(next),
            Err(e) => {
                trace!(error = %e, "Rejected relaxation sample");
                Sample::Invalid(e.to_string())
            }
        }
    }

    fn cost(&self) -> f64 {
        *self
            .cost
            .get_or_init(|| self.context.weights.cost(&self.metrics))
    }

    fn equals(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }

    fn describe(&self) -> String {
        format!("perimeter={:.6}", self.metrics.network_length())
    }
}
