//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_results_dir() -> String {
    defaults::results_dir().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_size() -> usize {
    defaults::size()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_descend_probability() -> f64 {
    defaults::descend_probability()
}
fn d_log_interval() -> u64 {
    defaults::log_interval()
}
fn d_max_resample_attempts() -> u32 {
    defaults::max_resample_attempts()
}
fn d_placement_runs() -> u32 {
    defaults::placement_runs()
}
fn d_placement_iterations() -> u64 {
    defaults::placement_iterations()
}
fn d_placement_branching_cap() -> usize {
    defaults::placement_branching_cap()
}
fn d_placement_decay() -> f64 {
    defaults::placement_decay()
}
fn d_placement_area() -> f64 {
    defaults::placement_area_weight_scale()
}
fn d_placement_exponent() -> f64 {
    defaults::placement_perimeter_exponent()
}
fn d_placement_edge() -> f64 {
    defaults::placement_edge_weight_scale()
}
fn d_relaxation_iterations() -> u64 {
    defaults::relaxation_iterations()
}
fn d_relaxation_branching_cap() -> usize {
    defaults::relaxation_branching_cap()
}
fn d_relaxation_decay() -> f64 {
    defaults::relaxation_decay()
}
fn d_relaxation_area() -> f64 {
    defaults::relaxation_area_weight_scale()
}
fn d_relaxation_exponent() -> f64 {
    defaults::relaxation_perimeter_exponent()
}
fn d_relaxation_edge() -> f64 {
    defaults::relaxation_edge_weight_scale()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub relaxation: RelaxationConfig,
}

/// Settings shared by the whole run
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    #[serde(default = "d_results_dir")]
    pub results_dir: String,
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Number of regions to tile the sphere with
    #[serde(default = "d_size")]
    pub size: usize,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            results_dir: defaults::results_dir().into(),
            seed: defaults::seed(),
            size: defaults::size(),
        }
    }
}

/// Tree search hyperparameters shared by both phases
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_descend_probability")]
    pub descend_probability: f64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u64,
    /// 0 means unbounded
    #[serde(default = "d_max_resample_attempts")]
    pub max_resample_attempts: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: defaults::exploration(),
            descend_probability: defaults::descend_probability(),
            log_interval: defaults::log_interval(),
            max_resample_attempts: defaults::max_resample_attempts(),
        }
    }
}

impl SearchConfig {
    /// Resample bound as the search engine expects it.
    pub fn resample_limit(&self) -> Option<u32> {
        (self.max_resample_attempts > 0).then_some(self.max_resample_attempts)
    }
}

/// Point placement phase
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlacementConfig {
    #[serde(default = "d_placement_runs")]
    pub runs: u32,
    #[serde(default = "d_placement_iterations")]
    pub iterations: u64,
    #[serde(default = "d_placement_branching_cap")]
    pub branching_cap: usize,
    #[serde(default = "d_placement_decay")]
    pub decay: f64,
    #[serde(default = "d_placement_area")]
    pub area_weight_scale: f64,
    #[serde(default = "d_placement_exponent")]
    pub perimeter_exponent: f64,
    #[serde(default = "d_placement_edge")]
    pub edge_weight_scale: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            runs: defaults::placement_runs(),
            iterations: defaults::placement_iterations(),
            branching_cap: defaults::placement_branching_cap(),
            decay: defaults::placement_decay(),
            area_weight_scale: defaults::placement_area_weight_scale(),
            perimeter_exponent: defaults::placement_perimeter_exponent(),
            edge_weight_scale: defaults::placement_edge_weight_scale(),
        }
    }
}

/// Vertex relaxation phase
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RelaxationConfig {
    #[serde(default = "d_relaxation_iterations")]
    pub iterations: u64,
    #[serde(default = "d_relaxation_branching_cap")]
    pub branching_cap: usize,
    #[serde(default = "d_relaxation_decay")]
    pub decay: f64,
    #[serde(default = "d_relaxation_area")]
    pub area_weight_scale: f64,
    #[serde(default = "d_relaxation_exponent")]
    pub perimeter_exponent: f64,
    #[serde(default = "d_relaxation_edge")]
    pub edge_weight_scale: f64,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::relaxation_iterations(),
            branching_cap: defaults::relaxation_branching_cap(),
            decay: defaults::relaxation_decay(),
            area_weight_scale: defaults::relaxation_area_weight_scale(),
            perimeter_exponent: defaults::relaxation_perimeter_exponent(),
            edge_weight_scale: defaults::relaxation_edge_weight_scale(),
        }
    }
}
