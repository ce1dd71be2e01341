//! MCTS search implementation.
//!
//! Implements the annealing variant of the MCTS loop:
//! 1. Tree policy: walk from the root, either descending into the best
//!    child or growing the current node by one sampled neighbour
//! 2. Default policy: score the reached configuration directly
//! 3. Backup: fold the observed cost into every ancestor
//!
//! The driver also remembers the single best configuration seen during the
//! run, since the root only remembers the best cost.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::MctsConfig;
use crate::configuration::{default_policy, Configuration, Sample};
use crate::node::NodeId;
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No children to select from at node {0:?}")]
    NoChildren(NodeId),

    #[error("Gave up expanding node {node:?} after {attempts} samples (last rejection: {last_reason})")]
    ResampleLimit {
        node: NodeId,
        attempts: u32,
        last_reason: String,
    },
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed select/evaluate/backup iterations
    pub iterations: u64,

    /// Children created by expansion
    pub expansions: u64,

    /// Samples rejected because the configuration could not be built
    pub invalid_samples: u64,

    /// Samples rejected because they equalled an existing sibling
    pub duplicate_samples: u64,
}

/// Result of a complete search run.
#[derive(Debug, Clone)]
pub struct SearchResult<C> {
    /// Lowest-cost configuration seen anywhere in the run
    pub best: C,

    /// Cost of `best`
    pub best_cost: f64,

    /// Cost of the configuration the run started from
    pub root_cost: f64,

    pub stats: SearchStats,

    /// Shape of the tree at the end of the run
    pub tree: TreeStats,
}

/// MCTS search state.
pub struct MctsSearch<C: Configuration> {
    tree: MctsTree<C>,
    config: MctsConfig,
    root_cost: f64,
    best_id: NodeId,
    best_cost: f64,
    stats: SearchStats,
}

impl<C: Configuration> MctsSearch<C> {
    /// Create a new search rooted at the given configuration.
    ///
    /// The root is scored once here and becomes the initial best.
    pub fn new(root: C, config: MctsConfig) -> Self {
        let root_cost = default_policy(&root);
        let tree = MctsTree::new(root);
        let best_id = tree.root();

        Self {
            tree,
            config,
            root_cost,
            best_id,
            best_cost: root_cost,
            stats: SearchStats::default(),
        }
    }

    /// Run the search for the configured number of iterations.
    pub fn run(mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<C>, SearchError> {
        debug!(
            iterations = self.config.num_iterations,
            branching_cap = self.config.branching_cap,
            root_cost = self.root_cost,
            "Starting search"
        );

        for iteration in 1..=self.config.num_iterations {
            self.simulate(rng)?;

            if self.config.log_interval > 0 && iteration % self.config.log_interval == 0 {
                info!(
                    iteration,
                    best_cost = self.best_cost,
                    nodes = self.tree.len(),
                    best = %self.best_config().describe(),
                    "Search progress"
                );
            }
        }

        let tree_stats = self.tree.stats();
        debug!(
            best_cost = self.best_cost,
            root_cost = self.root_cost,
            nodes = tree_stats.total_nodes,
            max_depth = tree_stats.max_depth,
            invalid_samples = self.stats.invalid_samples,
            duplicate_samples = self.stats.duplicate_samples,
            "Search finished"
        );

        Ok(SearchResult {
            best_cost: self.best_cost,
            root_cost: self.root_cost,
            stats: self.stats,
            tree: tree_stats,
            best: self.tree.into_config(self.best_id),
        })
    }

    /// Run a single iteration (tree policy -> default policy -> backup).
    /// Returns the cost observed at the reached node.
    pub fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<f64, SearchError> {
        let leaf_id = self.tree_policy(rng)?;
        let reward = default_policy(&self.tree.get(leaf_id).config);

        self.tree.backpropagate(leaf_id, reward);
        self.stats.iterations += 1;

        if reward < self.best_cost {
            self.best_cost = reward;
            self.best_id = leaf_id;
        }

        trace!(leaf = leaf_id.0, reward, best = self.best_cost, "MCTS iteration complete");

        Ok(reward)
    }

    /// Walk from the root to the node that should be evaluated next.
    ///
    /// A childless node is always grown. Otherwise a fair coin decides
    /// between descending into the best child and growing the current node;
    /// a node at its branching cap can only be descended through.
    pub fn tree_policy(&mut self, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if !node.is_expanded() {
                return self.expand(current, rng);
            }

            if rng.gen::<f64>() < self.config.descend_probability {
                current = self.best_child(current, rng)?;
            } else if !node.is_fully_expanded(self.config.branching_cap) {
                return self.expand(current, rng);
            } else {
                current = self.best_child(current, rng)?;
            }
        }
    }

    /// Select the highest-scoring child, breaking ties at random.
    pub fn best_child(&self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        self.tree
            .select_child(node_id, self.config.exploration, rng)
            .ok_or(SearchError::NoChildren(node_id))
    }

    /// Expand a node by one sampled neighbour that is valid and differs
    /// from every existing sibling. Returns the new child's id.
    pub fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let last_reason = match self.tree.get(node_id).config.sample_neighbor(rng) {
                Sample::Valid(candidate) => {
                    let duplicate = self
                        .tree
                        .child_configs(node_id)
                        .any(|sibling| sibling.equals(&candidate));

                    if !duplicate {
                        self.stats.expansions += 1;
                        return Ok(self.tree.add_child(node_id, candidate));
                    }

                    self.stats.duplicate_samples += 1;
                    trace!(node = node_id.0, attempts, "Rejected duplicate sample");
                    String::from("duplicate of an existing sibling")
                }
                Sample::Invalid(reason) => {
                    self.stats.invalid_samples += 1;
                    trace!(node = node_id.0, attempts, %reason, "Rejected invalid sample");
                    reason
                }
            };

            if let Some(max_attempts) = self.config.max_resample_attempts {
                if attempts >= max_attempts {
                    return Err(SearchError::ResampleLimit {
                        node: node_id,
                        attempts,
                        last_reason,
                    });
                }
            }
        }
    }

    /// Best configuration seen so far.
    pub fn best_config(&self) -> &C {
        &self.tree.get(self.best_id).config
    }

    /// Cost of the best configuration seen so far.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Cost of the root configuration.
    pub fn root_cost(&self) -> f64 {
        self.root_cost
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<C> {
        &self.tree
    }
}

/// Convenience function to run a single search from a root configuration.
pub fn run_mcts<C: Configuration>(
    root: C,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<C>, SearchError> {
    MctsSearch::new(root, config).run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Flaky, Grid, Well};
    use rand::SeedableRng;

    #[test]
    fn test_search_never_regresses() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let config = MctsConfig::for_testing().with_iterations(200);

        let result = run_mcts(Well::new(4.0, 2.0), config, &mut rng).unwrap();

        assert!(result.best_cost <= result.root_cost);
        assert!((result.root_cost - 16.0).abs() < 1e-12);
        assert!((result.best.cost() - result.best_cost).abs() < 1e-12);
        assert_eq!(result.stats.iterations, 200);
        // One node per iteration plus the root
        assert_eq!(result.tree.total_nodes, 201);
        assert_eq!(result.stats.expansions, 200);
    }

    #[test]
    fn test_search_improves_on_quadratic_well() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let config = MctsConfig::for_testing().with_iterations(500);

        let result = run_mcts(Well::new(4.0, 4.0), config, &mut rng).unwrap();

        assert!(result.best_cost < result.root_cost);
    }

    #[test]
    fn test_root_reward_tracks_best_cost() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut search = MctsSearch::new(Well::new(2.0, 1.0), MctsConfig::for_testing());

        let mut observed = Vec::new();
        for _ in 0..50 {
            observed.push(search.simulate(&mut rng).unwrap());
        }

        let min_observed = observed.iter().copied().fold(f64::INFINITY, f64::min);
        let root = search.tree().get(search.tree().root());
        assert!((root.reward - min_observed).abs() < 1e-12);
        assert_eq!(root.visits, 51);
        assert!(search.best_cost() <= min_observed);
        assert!(search.best_cost() <= search.root_cost());
    }

    #[test]
    fn test_visits_count_backup_passes() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut search = MctsSearch::new(Well::new(1.0, 1.0), MctsConfig::for_testing());

        let mut passes = vec![0u32; 1];
        for _ in 0..80 {
            search.simulate(&mut rng).unwrap();
            passes.push(0);
        }

        // Every iteration adds exactly one leaf, and the backup from that
        // leaf touches it and all its ancestors once.
        let tree = search.tree();
        for (leaf, _) in tree.arena().iter().enumerate().skip(1) {
            let mut current = NodeId(leaf as u32);
            while current.is_some() {
                passes[current.0 as usize] += 1;
                current = tree.get(current).parent;
            }
        }
        for (i, node) in tree.arena().iter().enumerate() {
            assert_eq!(node.visits, 1 + passes[i], "node {i}");
        }
    }

    #[test]
    fn test_rewards_are_non_increasing() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut search = MctsSearch::new(Well::new(3.0, 2.0), MctsConfig::for_testing());

        let mut previous: Vec<f64> = Vec::new();
        for _ in 0..60 {
            search.simulate(&mut rng).unwrap();
            let current: Vec<f64> = search.tree().arena().iter().map(|n| n.reward).collect();
            for (before, after) in previous.iter().zip(current.iter()) {
                assert!(after <= before);
            }
            previous = current;
        }
    }

    #[test]
    fn test_branching_cap_is_respected() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let config = MctsConfig::for_testing()
            .with_iterations(300)
            .with_branching_cap(3);

        let mut search = MctsSearch::new(Well::new(2.0, 1.0), config);
        for _ in 0..300 {
            search.simulate(&mut rng).unwrap();
        }

        for node in search.tree().arena() {
            assert!(node.children.len() <= 3);
        }
        assert_eq!(search.tree().get(search.tree().root()).children.len(), 3);
    }

    #[test]
    fn test_siblings_are_distinct() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        // Cap well below the 40 distinct values so no node can saturate.
        let config = MctsConfig::for_testing().with_branching_cap(10);
        let mut search = MctsSearch::new(Grid::new(0, 40), config);
        for _ in 0..150 {
            search.simulate(&mut rng).unwrap();
        }

        let tree = search.tree();
        for node in tree.arena() {
            let values: Vec<u32> = node.children.iter().map(|id| tree.get(*id).config.value).collect();
            for (i, a) in values.iter().enumerate() {
                for b in &values[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
        assert!(search.stats().duplicate_samples > 0);
    }

    #[test]
    fn test_expand_near_saturated_node() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let mut search = MctsSearch::new(Grid::new(0, 10), MctsConfig::for_testing());
        let root = search.tree().root();

        // Nine of the ten possible neighbours already exist.
        for value in 0..9 {
            search.tree.add_child(root, Grid::new(value, 10));
        }

        let child = search.expand(root, &mut rng).unwrap();
        assert_eq!(search.tree().get(child).config.value, 9);
        assert_eq!(search.tree().get(root).children.len(), 10);
    }

    #[test]
    fn test_expand_saturated_node_hits_limit() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let config = MctsConfig::for_testing().with_max_resample_attempts(Some(25));
        let mut search = MctsSearch::new(Grid::new(0, 3), config);
        let root = search.tree().root();

        for value in 0..3 {
            search.tree.add_child(root, Grid::new(value, 3));
        }

        match search.expand(root, &mut rng) {
            Err(SearchError::ResampleLimit { attempts, .. }) => assert_eq!(attempts, 25),
            other => panic!("expected resample limit, got {other:?}"),
        }
        assert_eq!(search.stats().duplicate_samples, 25);
    }

    #[test]
    fn test_invalid_samples_are_resampled() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let mut search = MctsSearch::new(Flaky::new(5.0), MctsConfig::for_testing());

        for _ in 0..100 {
            search.simulate(&mut rng).unwrap();
        }

        assert!(search.stats().invalid_samples > 0);
        assert_eq!(search.stats().expansions, 100);
        for node in search.tree().arena() {
            assert!(node.config.valid);
        }
    }

    #[test]
    fn test_best_child_without_children_is_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let search = MctsSearch::new(Well::new(1.0, 1.0), MctsConfig::for_testing());

        let err = search.best_child(search.tree().root(), &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoChildren(id) if id == NodeId(0)));
    }

    #[test]
    fn test_search_is_reproducible() {
        let run = |seed: u64| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut search = MctsSearch::new(Well::new(3.0, 2.0), MctsConfig::for_testing());
            for _ in 0..120 {
                search.simulate(&mut rng).unwrap();
            }
            let shape: Vec<u32> = search.tree().arena().iter().map(|n| n.parent.0).collect();
            let xs: Vec<f64> = search.tree().arena().iter().map(|n| n.config.x).collect();
            (shape, xs, search.best_cost())
        };

        let (shape_a, xs_a, best_a) = run(99);
        let (shape_b, xs_b, best_b) = run(99);
        assert_eq!(shape_a, shape_b);
        assert_eq!(xs_a, xs_b);
        assert_eq!(best_a.to_bits(), best_b.to_bits());

        let (shape_c, _, _) = run(100);
        assert_ne!(shape_a, shape_c);
    }
}
