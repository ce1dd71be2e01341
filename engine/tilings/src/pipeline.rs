//! Running the two search phases.
//!
//! Placement is repeated for several independently seeded runs and the
//! cheapest result wins. Relaxation then starts once from the winner's
//! tessellation.

use std::sync::Arc;

use mcts::{run_mcts, Configuration, MctsConfig, SearchStats};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::{GeometryEvaluator, Tessellation};
use tracing::{debug, info};

use crate::context::SearchContext;
use crate::error::TilingError;
use crate::placement::Placement;
use crate::relaxation::Relaxation;
use crate::weights::CostWeights;

/// Settings of one search phase.
#[derive(Debug, Clone)]
pub struct PhaseSettings {
    pub search: MctsConfig,
    pub weights: CostWeights,
    pub decay: f64,
}

impl PhaseSettings {
    /// Default placement phase for `size` regions.
    pub fn placement(size: usize) -> Self {
        Self {
            search: MctsConfig::placement(),
            weights: CostWeights::placement(size),
            decay: 0.8,
        }
    }

    /// Default relaxation phase for `size` regions.
    pub fn relaxation(size: usize) -> Self {
        Self {
            search: MctsConfig::relaxation(),
            weights: CostWeights::relaxation(size),
            decay: 0.9,
        }
    }

    fn context(&self, evaluator: &Arc<dyn GeometryEvaluator>) -> Arc<SearchContext> {
        Arc::new(SearchContext::new(
            self.weights,
            self.decay,
            Arc::clone(evaluator),
        ))
    }
}

/// Best placement over all runs.
#[derive(Debug)]
pub struct PlacementOutcome {
    pub best: Placement,
    pub best_cost: f64,

    /// Index of the run that produced `best`
    pub best_run: u32,

    /// Final cost of every run, in run order
    pub run_costs: Vec<f64>,
}

#[derive(Debug)]
pub struct RelaxationOutcome {
    pub best: Relaxation,
    pub best_cost: f64,
    pub root_cost: f64,
    pub stats: SearchStats,
}

/// Seed of placement run `run`.
pub fn placement_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add(u64::from(run))
}

/// Seed of the relaxation run following `runs` placement runs.
pub fn relaxation_seed(seed: u64, runs: u32) -> u64 {
    seed.wrapping_add(u64::from(runs))
}

/// Run the placement search `runs` times and keep the cheapest result.
///
/// Ties keep the earlier run.
pub fn run_placement(
    size: usize,
    runs: u32,
    settings: &PhaseSettings,
    evaluator: &Arc<dyn GeometryEvaluator>,
    seed: u64,
) -> Result<PlacementOutcome, TilingError> {
    if runs == 0 {
        return Err(TilingError::NoRuns);
    }
    let context = settings.context(evaluator);

    let mut best: Option<(u32, Placement, f64)> = None;
    let mut run_costs = Vec::with_capacity(runs as usize);

    for run in 0..runs {
        let mut rng = ChaCha20Rng::seed_from_u64(placement_seed(seed, run));
        let root = Placement::random(size, Arc::clone(&context), &mut rng)?;
        debug!(
            run,
            root_cost = root.cost(),
            signature = ?root.signature(),
            "Placement run starting"
        );

        let result = run_mcts(root, settings.search.clone(), &mut rng)?;
        info!(
            run,
            best_cost = result.best_cost,
            root_cost = result.root_cost,
            signature = ?result.best.signature(),
            nodes = result.tree.total_nodes,
            "Placement run finished"
        );

        run_costs.push(result.best_cost);
        let improved = best
            .as_ref()
            .map_or(true, |(_, _, cost)| result.best_cost < *cost);
        if improved {
            best = Some((run, result.best, result.best_cost));
        }
    }

    let (best_run, best, best_cost) = best.ok_or(TilingError::NoRuns)?;
    Ok(PlacementOutcome {
        best,
        best_cost,
        best_run,
        run_costs,
    })
}

/// Relax the vertices of a tessellation with its regions held fixed.
pub fn run_relaxation(
    tessellation: &Tessellation,
    settings: &PhaseSettings,
    evaluator: &Arc<dyn GeometryEvaluator>,
    seed: u64,
) -> Result<RelaxationOutcome, TilingError> {
    let context = settings.context(evaluator);
    let root = Relaxation::from_tessellation(tessellation, context)?;
    let initial_length = root.metrics().network_length();

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let result = run_mcts(root, settings.search.clone(), &mut rng)?;
    info!(
        best_cost = result.best_cost,
        root_cost = result.root_cost,
        initial_length,
        final_length = result.best.metrics().network_length(),
        invalid_samples = result.stats.invalid_samples,
        "Relaxation finished"
    );

    Ok(RelaxationOutcome {
        best_cost: result.best_cost,
        root_cost: result.root_cost,
        stats: result.stats,
        best: result.best,
    })
}
