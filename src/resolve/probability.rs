//! Monte-Carlo win-probability estimation.
//!
//! The search never branches on individual dice outcomes. It asks for the
//! chance that an attack empties the defending territory and commits to the
//! more likely result.

use std::collections::HashMap;

use rand::Rng;

use super::dice::resolve_battle;

/// Default number of simulated battles per estimate.
pub const DEFAULT_TRIALS: u32 = 100_000;

/// Rounds fought per simulated battle.
pub const MAX_BATTLE_ROUNDS: u32 = 10;

/// Fraction of `trials` simulated battles in which the defender is wiped out.
///
/// An attacker with fewer than two troops cannot roll and never wins; an
/// empty defence always falls.
pub fn estimate_win_probability(attack: u32, defence: u32, trials: u32, rng: &mut impl Rng) -> f64 {
    if defence == 0 {
        return 1.0;
    }
    if attack < 2 || trials == 0 {
        return 0.0;
    }
    let mut wins = 0u32;
    for _ in 0..trials {
        if resolve_battle(attack, defence, MAX_BATTLE_ROUNDS, rng).conquered() {
            wins += 1;
        }
    }
    wins as f64 / trials as f64
}

/// Memo of estimates keyed by `(attack, defence)`, kept for one search.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    trials: u32,
    cache: HashMap<(u32, u32), f64>,
    hits: u64,
}

impl ProbabilityTable {
    pub fn new(trials: u32) -> Self {
        ProbabilityTable {
            trials,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    /// Returns the cached estimate or computes and stores a new one.
    pub fn get(&mut self, attack: u32, defence: u32, rng: &mut impl Rng) -> f64 {
        if let Some(&p) = self.cache.get(&(attack, defence)) {
            self.hits += 1;
            return p;
        }
        let p = estimate_win_probability(attack, defence, self.trials, rng);
        self.cache.insert((attack, defence), p);
        p
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}
