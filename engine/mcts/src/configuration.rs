//! Configuration trait for searchable candidates.
//!
//! A configuration is one complete candidate solution: a point set, a
//! vertex layout, anything with a scalar cost. The search never looks
//! inside it. It only asks for a perturbed neighbour, a cost, and an
//! exact equality check.

use rand_chacha::ChaCha20Rng;

/// Outcome of drawing a neighbouring configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample<C> {
    /// The perturbed candidate could be built and scored.
    Valid(C),

    /// The perturbed candidate was rejected, e.g. because its geometry
    /// degenerated. The caller is expected to draw again.
    Invalid(String),
}

/// Trait for candidates explored by the annealing tree search.
///
/// Implementations could be:
/// - a free point placement on the sphere
/// - vertex positions over a fixed polygon topology
/// - toy one-dimensional wells (for testing)
pub trait Configuration: Sized {
    /// Draw a random neighbour within the current annealing radius.
    ///
    /// The returned configuration carries the decayed radius, so repeated
    /// sampling along a path takes ever smaller steps.
    fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self>;

    /// Cost of this configuration. Lower is better.
    fn cost(&self) -> f64;

    /// Exact coordinate-wise equality, used to reject duplicate siblings.
    fn equals(&self, other: &Self) -> bool;

    /// Short human-readable label used in progress logs.
    fn describe(&self) -> String {
        String::new()
    }
}

/// Zero-depth rollout: a configuration is already a full candidate, so its
/// value is simply its cost.
#[inline]
pub fn default_policy<C: Configuration>(config: &C) -> f64 {
    config.cost()
}
