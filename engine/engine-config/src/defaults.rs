//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and
//! the documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    placement: PlacementDefaults,
    relaxation: RelaxationDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    results_dir: String,
    seed: u64,
    size: usize,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    exploration: f64,
    descend_probability: f64,
    log_interval: u64,
    max_resample_attempts: u32,
}

#[derive(Debug, Deserialize)]
struct PlacementDefaults {
    runs: u32,
    iterations: u64,
    branching_cap: usize,
    decay: f64,
    area_weight_scale: f64,
    perimeter_exponent: f64,
    edge_weight_scale: f64,
}

#[derive(Debug, Deserialize)]
struct RelaxationDefaults {
    iterations: u64,
    branching_cap: usize,
    decay: f64,
    area_weight_scale: f64,
    perimeter_exponent: f64,
    edge_weight_scale: f64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn results_dir() -> &'static str {
    &DEFAULTS.common.results_dir
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}
pub fn size() -> usize {
    DEFAULTS.common.size
}

// Search
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn descend_probability() -> f64 {
    DEFAULTS.search.descend_probability
}
pub fn log_interval() -> u64 {
    DEFAULTS.search.log_interval
}
pub fn max_resample_attempts() -> u32 {
    DEFAULTS.search.max_resample_attempts
}

// Placement
pub fn placement_runs() -> u32 {
    DEFAULTS.placement.runs
}
pub fn placement_iterations() -> u64 {
    DEFAULTS.placement.iterations
}
pub fn placement_branching_cap() -> usize {
    DEFAULTS.placement.branching_cap
}
pub fn placement_decay() -> f64 {
    DEFAULTS.placement.decay
}
pub fn placement_area_weight_scale() -> f64 {
    DEFAULTS.placement.area_weight_scale
}
pub fn placement_perimeter_exponent() -> f64 {
    DEFAULTS.placement.perimeter_exponent
}
pub fn placement_edge_weight_scale() -> f64 {
    DEFAULTS.placement.edge_weight_scale
}

// Relaxation
pub fn relaxation_iterations() -> u64 {
    DEFAULTS.relaxation.iterations
}
pub fn relaxation_branching_cap() -> usize {
    DEFAULTS.relaxation.branching_cap
}
pub fn relaxation_decay() -> f64 {
    DEFAULTS.relaxation.decay
}
pub fn relaxation_area_weight_scale() -> f64 {
    DEFAULTS.relaxation.area_weight_scale
}
pub fn relaxation_perimeter_exponent() -> f64 {
    DEFAULTS.relaxation.perimeter_exponent
}
pub fn relaxation_edge_weight_scale() -> f64 {
    DEFAULTS.relaxation.edge_weight_scale
}
