//! Turn planning.
//!
//! Builds a tree of hypothetical boards for one turn and explores it with
//! UCB selection, random descents, and visit-count backpropagation.

pub mod legal;
pub mod mcts;
pub mod tree;

pub use legal::legal_actions;
pub use mcts::{search, select, simulate, ucb_score, SearchResult};
pub use tree::{NodeId, SearchTree, TreeNode};
