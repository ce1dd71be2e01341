//! Free point placement on the sphere.
//!
//! A placement is `N` generator points given as `[lon, lat]` pairs. Its
//! cost is read off the Voronoi tessellation of those points, which is
//! built once when the placement is created.

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use mcts::{Configuration, Sample};
use once_cell::unsync::OnceCell;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::{GeometryError, Tessellation};
use tracing::trace;

use crate::context::SearchContext;
use crate::error::TilingError;
use crate::perturb::{perturb, ANCHOR};

/// Smallest number of regions the placement search accepts.
pub const MIN_SIZE: usize = 5;

/// Random starting placements drawn before giving up.
const ROOT_ATTEMPTS: u32 = 64;

/// Initial annealing radius for `size` points: `2π·sqrt(2N)`.
pub fn initial_radius(size: usize) -> f64 {
    TAU * (2.0 * size as f64).sqrt()
}

/// A candidate set of generator points.
#[derive(Debug, Clone)]
pub struct Placement {
    points: Vec<[f64; 2]>,
    radius: f64,
    tessellation: Tessellation,
    context: Arc<SearchContext>,
    cost: OnceCell<f64>,
}

impl Placement {
    /// Build a placement and its tessellation.
    pub fn new(
        points: Vec<[f64; 2]>,
        radius: f64,
        context: Arc<SearchContext>,
    ) -> Result<Self, GeometryError> {
        let tessellation = context.evaluator.build_tessellation(&points)?;
        Ok(Self {
            points,
            radius,
            tessellation,
            context,
            cost: OnceCell::new(),
        })
    }

    /// Draw a random starting placement with the anchor at `(0, 0)`.
    ///
    /// Every other coordinate is uniform in `[-π, π)`. Draws whose
    /// tessellation degenerates are retried a bounded number of times.
    pub fn random(
        size: usize,
        context: Arc<SearchContext>,
        rng: &mut ChaCha20Rng,
    ) -> Result<Self, TilingError> {
        if size < MIN_SIZE {
            return Err(TilingError::InvalidSize {
                min: MIN_SIZE,
                got: size,
            });
        }

        let mut last = None;
        for _ in 0..ROOT_ATTEMPTS {
            let points = (0..size)
                .map(|i| {
                    if i == ANCHOR {
                        [0.0, 0.0]
                    } else {
                        [rng.gen_range(-PI..PI), rng.gen_range(-PI..PI)]
                    }
                })
                .collect();
            match Self::new(points, initial_radius(size), Arc::clone(&context)) {
                Ok(placement) => return Ok(placement),
                Err(e) => last = Some(e),
            }
        }

        Err(TilingError::RootSampling {
            attempts: ROOT_ATTEMPTS,
            last: last.unwrap_or_else(|| GeometryError::DegenerateInput("no draws".into())),
        })
    }

    /// Generator points as `[lon, lat]`.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    /// Sorted region degrees of the tessellation.
    pub fn signature(&self) -> Vec<usize> {
        self.tessellation.signature()
    }

    pub fn into_tessellation(self) -> Tessellation {
        self.tessellation
    }
}

impl Configuration for Placement {
    fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self> {
        let points = perturb(&self.points, self.radius, rng);
        let radius = self.radius * self.context.decay;

        match Placement::new(points, radius, Arc::clone(&self.context)) {
            Ok(next) => Sample::Valid(next),
            Err(e) => {
                trace!(error = %e, "Rejected placement sample");
                Sample::Invalid(e.to_string())
            }
        }
    }

    fn cost(&self) -> f64 {
        *self
            .cost
            .get_or_init(|| self.context.weights.cost(&self.tessellation.metrics))
    }

    fn equals(&self, other: &Self) -> bool {
        self.points == other.points
    }

    fn describe(&self) -> String {
        format!("signature={:?}", self.signature())
    }
}
