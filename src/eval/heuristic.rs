//! Heuristic position evaluation.
//!
//! Scores a board from one color's perspective with four handcrafted
//! features: partial continent coverage, territory count, troop strength
//! relative to every other color, and fully held continents. Scores are only
//! compared within one search, so there is no normalization.

use serde::{Deserialize, Serialize};

use crate::board::{Color, GameState, ALL_CONTINENTS};

/// Feature weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub coverage: f64,
    pub territories: f64,
    pub strength: f64,
    pub continents: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            coverage: 0.75,
            territories: 0.5,
            strength: 0.4,
            continents: 0.88,
        }
    }
}

/// Sum over continents of the owned fraction times the continent bonus.
pub fn continent_coverage(state: &GameState, color: Color) -> f64 {
    ALL_CONTINENTS
        .iter()
        .map(|c| state.owned_in(*c, color) as f64 / c.territory_count() as f64 * c.bonus() as f64)
        .sum()
}

/// Own troops over everyone else's, times 100, rounded to two decimals.
/// An empty opposition counts as one troop.
pub fn troop_strength(state: &GameState, color: Color) -> f64 {
    let totals = state.troops_by_color();
    let own = totals[color as usize];
    let others: u32 = totals.iter().sum::<u32>() - own;
    let ratio = own as f64 / others.max(1) as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// Evaluates `state` for `color`. Higher is better; always finite.
pub fn evaluate(state: &GameState, color: Color, w: &EvalWeights) -> f64 {
    let coverage = continent_coverage(state, color);
    let territories = state.territory_count(color) as f64;
    let strength = troop_strength(state, color);
    let continents = state.continent_bonus(color) as f64;

    w.coverage * coverage
        + w.territories * territories
        + w.strength * strength
        + w.continents * continents
}
