//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used
//! by the optimizer binary and its search phases.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`TESSERA_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! Command-line flags of the binary sit above all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! TESSERA_<SECTION>_<KEY>=value
//!
//! Examples:
//!     TESSERA_COMMON_SIZE=12
//!     TESSERA_COMMON_RESULTS_DIR=/data/results
//!     TESSERA_SEARCH_EXPLORATION=5.0
//!     TESSERA_PLACEMENT_ITERATIONS=100000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
