//! Sphere tiling searches built on the annealing tree search.
//!
//! Two [`mcts::Configuration`] implementations drive the two phases:
//!
//! - [`Placement`]: `N` free generator points scored by their Voronoi cells
//! - [`Relaxation`]: the Voronoi vertices of a placement moved freely while
//!   the region structure stays fixed
//!
//! Both share one cost shape, see [`CostWeights`], and read their static
//! parameters from a shared [`SearchContext`]. The [`pipeline`] module
//! chains the phases the way the optimizer binary runs them.

pub mod context;
pub mod error;
pub mod perturb;
pub mod pipeline;
pub mod placement;
pub mod relaxation;
pub mod weights;

pub use context::SearchContext;
pub use error::TilingError;
pub use pipeline::{
    placement_seed, relaxation_seed, run_placement, run_relaxation, PhaseSettings,
    PlacementOutcome, RelaxationOutcome,
};
pub use placement::{initial_radius, Placement, MIN_SIZE};
pub use relaxation::Relaxation;
pub use weights::CostWeights;

#[cfg(test)]
mod tests;
