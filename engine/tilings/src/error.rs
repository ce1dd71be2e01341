//! Error types for the tiling searches.

use mcts::SearchError;
use sphere_geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TilingError {
    #[error("Size must be at least {min}, got {got}")]
    InvalidSize { min: usize, got: usize },

    #[error("No valid starting placement after {attempts} draws: {last}")]
    RootSampling { attempts: u32, last: GeometryError },

    #[error("Placement needs at least one run")]
    NoRuns,

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
