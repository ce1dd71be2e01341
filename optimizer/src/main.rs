//! Optimizer - sphere tiling search for Tessera
//!
//! A one-shot process that:
//! 1. Places N points on the sphere with several seeded tree-search runs
//! 2. Relaxes the Voronoi vertices of the best placement with the cell
//!    structure held fixed
//! 3. Writes `result<N>.txt` (and a JSON copy) to the results directory

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

mod config;
mod report;
mod runner;

use sphere_geometry::{GeometryEvaluator, HullEvaluator};

use crate::config::{Config, CENTRAL_CONFIG};
use crate::report::Report;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(
        size = config.size,
        seed = config.seed,
        results_dir = %config.results_dir,
        "Optimizer starting"
    );

    let started = Instant::now();
    let evaluator: Arc<dyn GeometryEvaluator> = Arc::new(HullEvaluator::new());

    let summary = match runner::run(&config, &CENTRAL_CONFIG, &evaluator) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Optimization failed: {:#}", e);
            return Err(e);
        }
    };

    let report = Report::from_summary(&summary);
    let path = report.write(Path::new(&config.results_dir))?;

    info!(
        path = %path.display(),
        topology = ?report.topology,
        total_perimeter = report.total_perimeter,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Optimizer completed successfully"
    );

    Ok(())
}
