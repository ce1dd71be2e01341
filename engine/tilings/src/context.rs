//! Static per-run parameters shared by all configurations of one search.

use std::fmt;
use std::sync::Arc;

use sphere_geometry::{GeometryEvaluator, HullEvaluator};

use crate::weights::CostWeights;

/// Parameters that never change during a run.
///
/// Every configuration in a tree holds the same `Arc<SearchContext>`.
#[derive(Clone)]
pub struct SearchContext {
    pub weights: CostWeights,

    /// Radius multiplier applied per generation, in `(0, 1)`
    pub decay: f64,

    pub evaluator: Arc<dyn GeometryEvaluator>,
}

impl SearchContext {
    pub fn new(weights: CostWeights, decay: f64, evaluator: Arc<dyn GeometryEvaluator>) -> Self {
        Self {
            weights,
            decay,
            evaluator,
        }
    }

    /// Context backed by the default [`HullEvaluator`].
    pub fn with_hull(weights: CostWeights, decay: f64) -> Self {
        Self::new(weights, decay, Arc::new(HullEvaluator::new()))
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("weights", &self.weights)
            .field("decay", &self.decay)
            .field("evaluator", &self.evaluator)
            .finish()
    }
}
