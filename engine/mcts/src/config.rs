//! MCTS configuration parameters.

/// Configuration for the annealing tree search.
///
/// Everything that shapes the tree walk lives here. Parameters that shape
/// a single configuration (decay factor, cost weights) travel with the
/// configuration type instead.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/expand/evaluate/backup iterations per run.
    pub num_iterations: u64,

    /// Exploration constant `C` in the UCT score.
    /// Both tiling searches use 10.
    pub exploration: f64,

    /// Maximum number of children a node may own before it counts as
    /// fully expanded.
    pub branching_cap: usize,

    /// Probability that the tree policy descends into the best child
    /// instead of trying to grow the current node.
    pub descend_probability: f64,

    /// Emit a progress event every N iterations (0 to disable).
    pub log_interval: u64,

    /// Upper bound on samples drawn during one expansion.
    /// `None` keeps resampling until a valid, distinct child appears.
    pub max_resample_attempts: Option<u32>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::placement()
    }
}

impl MctsConfig {
    /// Settings for the free point-placement search.
    pub fn placement() -> Self {
        Self {
            num_iterations: 300_000,
            exploration: 10.0,
            branching_cap: 20_000,
            descend_probability: 0.5,
            log_interval: 10_000,
            max_resample_attempts: None,
        }
    }

    /// Settings for the fixed-topology vertex relaxation search.
    pub fn relaxation() -> Self {
        Self {
            num_iterations: 50_000,
            exploration: 10.0,
            branching_cap: 2_000,
            descend_probability: 0.5,
            log_interval: 10_000,
            max_resample_attempts: None,
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_iterations: 100,
            exploration: 10.0,
            branching_cap: 20_000,
            descend_probability: 0.5,
            log_interval: 0,
            max_resample_attempts: Some(10_000),
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u64) -> Self {
        self.num_iterations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the tree policy's descend probability.
    pub fn with_descend_probability(mut self, p: f64) -> Self {
        self.descend_probability = p;
        self
    }

    /// Builder pattern: set the branching cap.
    pub fn with_branching_cap(mut self, cap: usize) -> Self {
        self.branching_cap = cap;
        self
    }

    /// Builder pattern: set the progress log interval.
    pub fn with_log_interval(mut self, every: u64) -> Self {
        self.log_interval = every;
        self
    }

    /// Builder pattern: bound (or unbound) the expansion resample loop.
    pub fn with_max_resample_attempts(mut self, attempts: Option<u32>) -> Self {
        self.max_resample_attempts = attempts;
        self
    }
}
