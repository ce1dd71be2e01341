//! MCTS tree node representation.
//!
//! Each node owns one configuration, reached by perturbing the parent's.
//! Nodes keep the best (lowest) cost observed anywhere below them together
//! with a visit counter used for UCT selection.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<C> {
    /// Parent node index (NONE for root). Never used for ownership.
    pub parent: NodeId,

    /// Configuration represented by this node
    pub config: C,

    /// Children in creation order. Empty until first expansion.
    pub children: Vec<NodeId>,

    /// Lowest cost seen in this subtree (+inf until something is backed up)
    pub reward: f64,

    /// Visit count. A fresh node already counts itself once.
    pub visits: u32,
}

impl<C> MctsNode<C> {
    /// Create a new root node.
    pub fn new_root(config: C) -> Self {
        Self::new_child(NodeId::NONE, config)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, config: C) -> Self {
        Self {
            parent,
            config,
            children: Vec::new(),
            reward: f64::INFINITY,
            visits: 1,
        }
    }

    /// Record one observed cost.
    #[inline]
    pub fn update(&mut self, reward: f64) {
        self.reward = self.reward.min(reward);
        self.visits += 1;
    }

    /// Calculate the UCT score for child selection.
    /// UCT(c) = -reward(c) + C * sqrt(2 * ln(N_parent) / N(c))
    ///
    /// Rewards are costs, so the exploitation term is negated: higher
    /// scores are better.
    ///
    /// Note: Takes pre-computed ln(parent_visits) to avoid redundant log
    /// calls when comparing many children.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration: f64) -> f64 {
        let explore = (2.0 * parent_visits_ln / f64::from(self.visits)).sqrt();
        -self.reward + exploration * explore
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node reached the branching cap.
    #[inline]
    pub fn is_fully_expanded(&self, branching_cap: usize) -> bool {
        self.children.len() == branching_cap
    }
}
