//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by `NodeId`.
//! Ids are assigned in creation order, so a child always has a larger id
//! than its parent and the parent links can never form a cycle.

use crate::board::GameState;
use crate::movegen::{Action, ActionKind};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A hypothetical board reached by the actions on the path from the root.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Parent node (NONE for the root).
    pub parent: NodeId,
    /// Action on the edge from the parent (None for the root).
    pub action: Option<Action>,
    /// Board snapshot after `action`.
    pub state: GameState,
    /// Evaluation of `state`, cached at creation.
    pub score: f64,
    /// Children in creation order.
    pub children: Vec<NodeId>,
    /// Visit total. Selection adds one per pass; backpropagation adds the
    /// playout step count.
    pub visits: u64,
    /// Sum of backpropagated rewards.
    pub reward: f64,
    /// Distance from the root.
    pub depth: u32,
    /// True once legal actions have been generated for this node.
    pub expanded: bool,
}

impl TreeNode {
    pub fn kind(&self) -> Option<ActionKind> {
        self.action.as_ref().map(Action::kind)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Search tree for one turn.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
    deepest: u32,
}

impl SearchTree {
    /// Creates a tree holding only the root.
    pub fn new(root_state: GameState, root_score: f64) -> Self {
        SearchTree {
            nodes: vec![TreeNode {
                parent: NodeId::NONE,
                action: None,
                state: root_state,
                score: root_score,
                children: Vec::new(),
                visits: 0,
                reward: 0.0,
                depth: 0,
                expanded: false,
            }],
            deepest: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of layers including the root.
    pub fn layers(&self) -> u32 {
        self.deepest + 1
    }

    /// Attaches a new child under `parent` and returns its id.
    pub fn add_child(&mut self, parent: NodeId, action: Action, state: GameState, score: f64) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            parent,
            action: Some(action),
            state,
            score,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            depth,
            expanded: false,
        });
        self.get_mut(parent).children.push(id);
        self.deepest = self.deepest.max(depth);
        id
    }

    /// Adds `reward` and `steps` to `leaf` and every ancestor.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64, steps: u64) {
        let mut current = leaf;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visits += steps;
            node.reward += reward;
            current = node.parent;
        }
    }

    /// The most visited child of `id`. The earliest child wins ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &c in &self.get(id).children {
            match best {
                Some(b) if self.get(b).visits >= self.get(c).visits => {}
                _ => best = Some(c),
            }
        }
        best
    }

    /// Follows the most visited child from the root down to a leaf.
    /// The root itself is not included.
    pub fn best_path(&self) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.root();
        while let Some(next) = self.most_visited_child(current) {
            path.push(next);
            current = next;
        }
        path
    }
}
