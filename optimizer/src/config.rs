//! Configuration for the optimizer
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tilings::{CostWeights, PhaseSettings, MIN_SIZE};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_size() -> usize {
    CENTRAL_CONFIG.common.size
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_results_dir() -> String {
    CENTRAL_CONFIG.common.results_dir.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_placement_runs() -> u32 {
    CENTRAL_CONFIG.placement.runs
}

fn default_placement_iterations() -> u64 {
    CENTRAL_CONFIG.placement.iterations
}

fn default_relaxation_iterations() -> u64 {
    CENTRAL_CONFIG.relaxation.iterations
}

#[derive(Parser, Debug, Clone)]
#[command(name = "optimizer")]
#[command(about = "Tessera optimizer - near-optimal tilings of the sphere")]
#[command(
    long_about = "Places N points on the sphere so their Voronoi cells are as even and
compact as possible, then relaxes the cell vertices with the cell structure
held fixed. The result is written to <results-dir>/result<N>.txt.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of regions (at least 5)
    #[arg(long, default_value_t = default_size())]
    pub size: usize,

    /// Base seed; placement run i uses seed + i
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Directory the report files are written to
    #[arg(long, default_value_t = default_results_dir())]
    pub results_dir: String,

    /// Independent placement runs; the cheapest wins
    #[arg(long, default_value_t = default_placement_runs())]
    pub placement_runs: u32,

    /// Iterations per placement run
    #[arg(long, default_value_t = default_placement_iterations())]
    pub placement_iterations: u64,

    /// Iterations of the relaxation run
    #[arg(long, default_value_t = default_relaxation_iterations())]
    pub relaxation_iterations: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.validate_against(&CENTRAL_CONFIG)
    }

    pub fn validate_against(&self, central: &CentralConfig) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(anyhow!(
                "size must be at least {}, got {}",
                MIN_SIZE,
                self.size
            ));
        }

        if self.placement_runs == 0 {
            return Err(anyhow!("placement_runs must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        let search = &central.search;
        if !(0.0..=1.0).contains(&search.descend_probability) {
            return Err(anyhow!(
                "search.descend_probability must be in [0, 1], got {}",
                search.descend_probability
            ));
        }
        if search.exploration < 0.0 {
            return Err(anyhow!("search.exploration cannot be negative"));
        }

        for (phase, decay, branching_cap) in [
            (
                "placement",
                central.placement.decay,
                central.placement.branching_cap,
            ),
            (
                "relaxation",
                central.relaxation.decay,
                central.relaxation.branching_cap,
            ),
        ] {
            if !(decay > 0.0 && decay < 1.0) {
                return Err(anyhow!("{phase}.decay must be in (0, 1), got {decay}"));
            }
            if branching_cap == 0 {
                return Err(anyhow!("{phase}.branching_cap must be greater than 0"));
            }
        }

        Ok(())
    }

    /// Placement phase settings with CLI overrides applied.
    pub fn placement_settings(&self, central: &CentralConfig) -> PhaseSettings {
        let phase = &central.placement;
        PhaseSettings {
            search: search_config(central)
                .with_iterations(self.placement_iterations)
                .with_branching_cap(phase.branching_cap),
            weights: CostWeights::scaled(
                self.size,
                phase.area_weight_scale,
                phase.perimeter_exponent,
                phase.edge_weight_scale,
            ),
            decay: phase.decay,
        }
    }

    /// Relaxation phase settings with CLI overrides applied.
    pub fn relaxation_settings(&self, central: &CentralConfig) -> PhaseSettings {
        let phase = &central.relaxation;
        PhaseSettings {
            search: search_config(central)
                .with_iterations(self.relaxation_iterations)
                .with_branching_cap(phase.branching_cap),
            weights: CostWeights::scaled(
                self.size,
                phase.area_weight_scale,
                phase.perimeter_exponent,
                phase.edge_weight_scale,
            ),
            decay: phase.decay,
        }
    }
}

fn search_config(central: &CentralConfig) -> MctsConfig {
    let search = &central.search;
    MctsConfig::default()
        .with_exploration(search.exploration)
        .with_descend_probability(search.descend_probability)
        .with_log_interval(search.log_interval)
        .with_max_resample_attempts(search.resample_limit())
}
