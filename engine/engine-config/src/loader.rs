//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TESSERA_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by TESSERA_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file falls back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: TESSERA_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "TESSERA_COMMON_LOG_LEVEL");
    env_override!(config, common.results_dir, "TESSERA_COMMON_RESULTS_DIR");
    env_override!(config, common.seed, "TESSERA_COMMON_SEED", parse);
    env_override!(config, common.size, "TESSERA_COMMON_SIZE", parse);

    // Search
    env_override!(
        config,
        search.exploration,
        "TESSERA_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.descend_probability,
        "TESSERA_SEARCH_DESCEND_PROBABILITY",
        parse
    );
    env_override!(
        config,
        search.log_interval,
        "TESSERA_SEARCH_LOG_INTERVAL",
        parse
    );
    env_override!(
        config,
        search.max_resample_attempts,
        "TESSERA_SEARCH_MAX_RESAMPLE_ATTEMPTS",
        parse
    );

    // Placement
    env_override!(config, placement.runs, "TESSERA_PLACEMENT_RUNS", parse);
    env_override!(
        config,
        placement.iterations,
        "TESSERA_PLACEMENT_ITERATIONS",
        parse
    );
    env_override!(
        config,
        placement.branching_cap,
        "TESSERA_PLACEMENT_BRANCHING_CAP",
        parse
    );
    env_override!(config, placement.decay, "TESSERA_PLACEMENT_DECAY", parse);
    env_override!(
        config,
        placement.area_weight_scale,
        "TESSERA_PLACEMENT_AREA_WEIGHT_SCALE",
        parse
    );
    env_override!(
        config,
        placement.perimeter_exponent,
        "TESSERA_PLACEMENT_PERIMETER_EXPONENT",
        parse
    );
    env_override!(
        config,
        placement.edge_weight_scale,
        "TESSERA_PLACEMENT_EDGE_WEIGHT_SCALE",
        parse
    );

    // Relaxation
    env_override!(
        config,
        relaxation.iterations,
        "TESSERA_RELAXATION_ITERATIONS",
        parse
    );
    env_override!(
        config,
        relaxation.branching_cap,
        "TESSERA_RELAXATION_BRANCHING_CAP",
        parse
    );
    env_override!(config, relaxation.decay, "TESSERA_RELAXATION_DECAY", parse);
    env_override!(
        config,
        relaxation.area_weight_scale,
        "TESSERA_RELAXATION_AREA_WEIGHT_SCALE",
        parse
    );
    env_override!(
        config,
        relaxation.perimeter_exponent,
        "TESSERA_RELAXATION_PERIMETER_EXPONENT",
        parse
    );
    env_override!(
        config,
        relaxation.edge_weight_scale,
        "TESSERA_RELAXATION_EDGE_WEIGHT_SCALE",
        parse
    );

    config
}
