//! Action generation.
//!
//! Produces the candidate actions of a turn: reinforcement placements,
//! attacks with their simulated outcome, post-conquest transfers, and
//! fortification.

pub mod action;
pub mod attack;
pub mod fortify;
pub mod reinforce;
pub mod transfer;

pub use action::{Action, ActionKind, Transfer, ALL_ACTION_KINDS};
pub use attack::{
    apply_attack_outcome, AttackCandidate, AttackStrategy, ALL_ATTACK_STRATEGIES,
    MAX_ATTACK_BRANCHES,
};
pub use fortify::{fortify_weakest, DEFAULT_FORTIFY_SHARE};
pub use reinforce::{
    allocate_by_attack_history, allocate_even, apply_placements, base_placement,
    ReinforcementStrategy,
};
pub use transfer::{post_win_transfer, transfer_amount, TransferWeights};
