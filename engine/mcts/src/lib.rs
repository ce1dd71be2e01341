//! Annealing Monte Carlo Tree Search over continuous configurations.
//!
//! This crate provides a configuration-agnostic search engine that works
//! with any candidate type implementing the [`Configuration`] trait. The
//! action space is continuous and effectively unbounded: every expansion
//! draws a fresh random neighbour, and each generation shrinks the
//! perturbation radius like a simulated-annealing schedule.
//!
//! # Overview
//!
//! Each iteration consists of three phases:
//!
//! 1. **Tree policy**: Walk from the root. A leaf is always grown; an inner
//!    node is either descended through via UCT or grown by one more child,
//!    decided by a coin flip
//! 2. **Default policy**: Score the reached configuration directly (rollout
//!    depth zero, a configuration already is a complete candidate)
//! 3. **Backup**: Update visit counts and the best-seen cost along the path
//!    from the new node to the root
//!
//! Costs are minimised, so the UCT score negates the exploitation term.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{run_mcts, MctsConfig};
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! let root = my_configuration();
//! let config = MctsConfig::placement().with_iterations(10_000);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(root, config, &mut rng).unwrap();
//!
//! println!("Best cost: {}", result.best_cost);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_iterations`: Iteration budget per run
//! - `exploration`: UCT exploration constant (default: 10)
//! - `branching_cap`: Children per node before it counts as fully expanded
//! - `descend_probability`: Coin bias of the tree policy (default: 0.5)
//! - `max_resample_attempts`: Optional bound on the expansion resample loop
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   MctsSearch                    │
//! ├─────────────────────────────────────────────────┤
//! │  ┌─────────────┐        ┌─────────────────────┐ │
//! │  │  MctsTree   │        │   Configuration     │ │
//! │  │  (arena)    │        │ (sample/cost/equal) │ │
//! │  └──────┬──────┘        └──────────┬──────────┘ │
//! │         ▼                          ▼            │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │   tree policy → default policy → backup   │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod configuration;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use configuration::{default_policy, Configuration, Sample};
pub use node::{MctsNode, NodeId};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{MctsTree, TreeStats};

/// Small configurations for exercising the engine (internal use only)
#[cfg(test)]
pub(crate) mod test_utils {
    use rand::Rng;
    use rand_chacha::ChaCha20Rng;

    use crate::configuration::{Configuration, Sample};

    /// One-dimensional quadratic well with cost x².
    #[derive(Debug, Clone, PartialEq)]
    pub struct Well {
        pub x: f64,
        pub radius: f64,
    }

    impl Well {
        pub fn new(x: f64, radius: f64) -> Self {
            Self { x, radius }
        }
    }

    impl Configuration for Well {
        fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self> {
            let step = rng.gen_range(-1.0..1.0) * self.radius;
            Sample::Valid(Well::new(self.x + step, self.radius * 0.9))
        }

        fn cost(&self) -> f64 {
            self.x * self.x
        }

        fn equals(&self, other: &Self) -> bool {
            self.x == other.x
        }

        fn describe(&self) -> String {
            format!("x={:.4}", self.x)
        }
    }

    /// Integer configuration with a finite neighbourhood `0..span`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Grid {
        pub value: u32,
        pub span: u32,
    }

    impl Grid {
        pub fn new(value: u32, span: u32) -> Self {
            Self { value, span }
        }
    }

    impl Configuration for Grid {
        fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self> {
            Sample::Valid(Grid::new(rng.gen_range(0..self.span), self.span))
        }

        fn cost(&self) -> f64 {
            f64::from(self.value)
        }

        fn equals(&self, other: &Self) -> bool {
            self.value == other.value
        }
    }

    /// Well whose samples fail half of the time.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Flaky {
        pub x: f64,
        pub valid: bool,
    }

    impl Flaky {
        pub fn new(x: f64) -> Self {
            Self { x, valid: true }
        }
    }

    impl Configuration for Flaky {
        fn sample_neighbor(&self, rng: &mut ChaCha20Rng) -> Sample<Self> {
            if rng.gen_bool(0.5) {
                return Sample::Invalid("coin came up degenerate".into());
            }
            Sample::Valid(Flaky::new(self.x + rng.gen_range(-1.0..1.0)))
        }

        fn cost(&self) -> f64 {
            self.x.abs()
        }

        fn equals(&self, other: &Self) -> bool {
            self.x == other.x
        }
    }
}
