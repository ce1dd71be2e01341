//! Runs both search phases for one configured size.

use std::sync::Arc;

use anyhow::{Context, Result};
use engine_config::CentralConfig;
use sphere_geometry::GeometryEvaluator;
use tilings::{
    relaxation_seed, run_placement, run_relaxation, PlacementOutcome, RelaxationOutcome,
};
use tracing::info;

use crate::config::Config;

/// Outcome of a complete optimisation.
#[derive(Debug)]
pub struct RunSummary {
    pub size: usize,
    pub seed: u64,
    pub placement: PlacementOutcome,
    pub relaxation: RelaxationOutcome,
}

pub fn run(
    config: &Config,
    central: &CentralConfig,
    evaluator: &Arc<dyn GeometryEvaluator>,
) -> Result<RunSummary> {
    let placement_settings = config.placement_settings(central);
    info!(
        size = config.size,
        runs = config.placement_runs,
        iterations = placement_settings.search.num_iterations,
        weights = ?placement_settings.weights,
        "Starting placement search"
    );

    let placement = run_placement(
        config.size,
        config.placement_runs,
        &placement_settings,
        evaluator,
        config.seed,
    )
    .context("placement search failed")?;

    info!(
        best_run = placement.best_run,
        best_cost = placement.best_cost,
        signature = ?placement.best.signature(),
        "Placement search finished"
    );

    let relaxation_settings = config.relaxation_settings(central);
    info!(
        iterations = relaxation_settings.search.num_iterations,
        weights = ?relaxation_settings.weights,
        "Starting relaxation search"
    );

    let relaxation = run_relaxation(
        placement.best.tessellation(),
        &relaxation_settings,
        evaluator,
        relaxation_seed(config.seed, config.placement_runs),
    )
    .context("relaxation search failed")?;

    Ok(RunSummary {
        size: config.size,
        seed: config.seed,
        placement,
        relaxation,
    })
}
