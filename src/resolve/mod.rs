//! Combat resolution.
//!
//! Dice rounds and battles, plus the Monte-Carlo estimator the search uses
//! to decide attack outcomes without branching on every roll.

pub mod dice;
pub mod probability;

pub use dice::{resolve_attack_round, resolve_battle, BattleOutcome, RoundOutcome};
pub use probability::{
    estimate_win_probability, ProbabilityTable, DEFAULT_TRIALS, MAX_BATTLE_ROUNDS,
};
