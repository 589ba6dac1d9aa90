//! Reinforcement allocation.
//!
//! Splits a placement budget across a color's territories. The allocators
//! are pure: they return `(territory, troops)` pairs and leave applying them
//! to the caller.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{Color, GameState, Territory};

/// Minimum troops granted by territory count alone.
pub const MIN_TERRITORY_TROOPS: u32 = 3;

/// Placement budget before cards: `max(3, owned / 3)` plus held continents.
pub fn base_placement(state: &GameState, color: Color) -> u32 {
    let by_count = (state.territory_count(color) as u32 / 3).max(MIN_TERRITORY_TROOPS);
    by_count + state.continent_bonus(color)
}

/// Splits `total` evenly across `territories`. The remainder goes one troop
/// at a time to the first territories in order. Empty input or a zero total
/// yields an empty allocation; otherwise the grants sum to `total`.
pub fn allocate_even(total: u32, territories: &[Territory]) -> Vec<(Territory, u32)> {
    if territories.is_empty() || total == 0 {
        return Vec::new();
    }
    let n = territories.len() as u32;
    let share = total / n;
    let remainder = (total % n) as usize;
    territories
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, share + u32::from(i < remainder)))
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// Splits `total` by attack history. Candidates are ranked by attack count
/// (descending, stable); territories with history get `count + 1` each
/// first, then untouched territories get one each, until the budget runs
/// out. Budget left after both passes is logged and dropped.
pub fn allocate_by_attack_history(
    total: u32,
    candidates: &[(Territory, u32)],
) -> Vec<(Territory, u32)> {
    let (out, remaining) = rank_by_attack_history(total, candidates);
    if remaining > 0 {
        warn!(remaining, total, "attack-history allocation left troops unplaced");
    }
    out
}

/// The two ranking passes of `allocate_by_attack_history`. Returns the
/// grants and the budget they leave over.
fn rank_by_attack_history(total: u32, candidates: &[(Territory, u32)]) -> (Vec<(Territory, u32)>, u32) {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut remaining = total;
    let mut out = Vec::new();
    let (attacked, quiet): (Vec<_>, Vec<_>) = ranked.into_iter().partition(|(_, c)| *c > 0);
    for (t, count) in attacked.into_iter().chain(quiet) {
        if remaining == 0 {
            break;
        }
        let grant = remaining.min(count + 1);
        remaining -= grant;
        out.push((t, grant));
    }
    (out, remaining)
}

/// Adds `extra` into `into`, merging grants for the same territory.
fn merge(into: &mut Vec<(Territory, u32)>, extra: Vec<(Territory, u32)>) {
    for (t, n) in extra {
        match into.iter_mut().find(|(u, _)| *u == t) {
            Some(entry) => entry.1 += n,
            None => into.push((t, n)),
        }
    }
}

/// How a placement budget is spread over the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReinforcementStrategy {
    /// Shore up territories with fewer than two troops, or the three weakest.
    WeakestFirst,
    /// Put `key_fraction` of the budget on owned key territories and the
    /// rest on thinly held ones.
    KeyTerritories { key_fraction: f64 },
    /// Follow the attack history of owned territories.
    AttackHistory,
}

impl Default for ReinforcementStrategy {
    fn default() -> Self {
        ReinforcementStrategy::KeyTerritories { key_fraction: 0.6 }
    }
}

impl ReinforcementStrategy {
    /// Allocates `budget` troops for `color` on `state`.
    pub fn allocate(&self, budget: u32, state: &GameState, color: Color) -> Vec<(Territory, u32)> {
        match *self {
            ReinforcementStrategy::WeakestFirst => weakest_first(budget, state, color),
            ReinforcementStrategy::KeyTerritories { key_fraction } => {
                key_territories(budget, key_fraction, state, color)
            }
            ReinforcementStrategy::AttackHistory => attack_history(budget, state, color),
        }
    }
}

fn weakest_first(budget: u32, state: &GameState, color: Color) -> Vec<(Territory, u32)> {
    let owned = state.owned_by(color);
    let mut targets: Vec<Territory> = owned
        .iter()
        .copied()
        .filter(|t| state.troops_on(*t) < 2)
        .collect();
    if targets.is_empty() {
        targets = owned;
        targets.sort_by_key(|t| state.troops_on(*t));
        targets.truncate(3);
    }
    allocate_even(budget, &targets)
}

fn key_territories(
    budget: u32,
    key_fraction: f64,
    state: &GameState,
    color: Color,
) -> Vec<(Territory, u32)> {
    let owned = state.owned_by(color);
    let keys: Vec<Territory> = owned.iter().copied().filter(|t| t.is_key()).collect();
    if keys.is_empty() {
        return weakest_first(budget, state, color);
    }

    let on_keys = ((key_fraction.clamp(0.0, 1.0) * budget as f64).floor() as u32).min(budget);
    let mut out = allocate_even(on_keys, &keys);

    let mut thin: Vec<Territory> = owned
        .iter()
        .copied()
        .filter(|t| state.troops_on(*t) < 3)
        .collect();
    if thin.is_empty() {
        thin = keys;
    }
    merge(&mut out, allocate_even(budget - on_keys, &thin));
    out
}

fn attack_history(budget: u32, state: &GameState, color: Color) -> Vec<(Territory, u32)> {
    let attacked: Vec<(Territory, u32)> = state
        .owned_by(color)
        .into_iter()
        .map(|t| (t, state.attack_counts[t as usize]))
        .filter(|(_, c)| *c > 0)
        .collect();
    if attacked.is_empty() {
        return weakest_first(budget, state, color);
    }
    let (mut out, remaining) = rank_by_attack_history(budget, &attacked);
    if remaining > 0 {
        let targets: Vec<Territory> = attacked.iter().map(|(t, _)| *t).collect();
        merge(&mut out, allocate_even(remaining, &targets));
    }
    out
}

/// Applies placements to `state`. Placements on territories `color` does
/// not own are skipped.
pub fn apply_placements(state: &mut GameState, color: Color, placements: &[(Territory, u32)]) {
    for &(t, n) in placements {
        if !state.place_troops(t, color, n) {
            warn!(territory = t.name(), "skipped placement on foreign territory");
        }
    }
}
