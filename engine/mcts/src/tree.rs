//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for node storage. Nodes are stored in a
//! contiguous Vec and referenced by NodeId indices. A parent always sits at
//! a lower index than its children, and the whole tree is released at once
//! when the arena drops.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<C> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<C>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<C> MctsTree<C> {
    /// Create a new tree holding only the root configuration.
    pub fn new(root_config: C) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_config)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<C> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<C> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<C>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<C>] {
        &self.nodes
    }

    /// Configurations of the existing children of a node.
    pub fn child_configs(&self, node_id: NodeId) -> impl Iterator<Item = &C> + '_ {
        self.get(node_id)
            .children
            .iter()
            .map(move |id| &self.get(*id).config)
    }

    /// Select the best child of a node using UCT.
    ///
    /// Exact score ties are broken uniformly at random. Returns None only
    /// when the node has no children.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = f64::from(node.visits).ln();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_children: Vec<NodeId> = Vec::new();
        for &child_id in &node.children {
            let score = self.get(child_id).uct_score(parent_visits_ln, exploration);
            if score > best_score {
                best_score = score;
                best_children.clear();
                best_children.push(child_id);
            } else if score == best_score {
                best_children.push(child_id);
            }
        }

        best_children.choose(rng).copied()
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, config: C) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, config));

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Backpropagate an observed cost from a node up to the root inclusive.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.update(reward);
            current_id = node.parent;
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_reward: root.reward,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Parents precede children in the arena, so one forward pass suffices.
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[i] = depths[node.parent.index()] + 1;
                max_depth = max_depth.max(depths[i]);
            }
        }
        max_depth
    }

    /// Consume the tree and take ownership of one node's configuration.
    pub fn into_config(mut self, node_id: NodeId) -> C {
        self.nodes.swap_remove(node_id.index()).config
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_reward: f64,
    pub max_depth: u32,
}
