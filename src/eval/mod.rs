//! Position evaluation.
//!
//! Scores a board from one color's perspective. Used for UCB selection and
//! as the playout reward.

pub mod heuristic;

pub use heuristic::{continent_coverage, evaluate, troop_strength, EvalWeights};
