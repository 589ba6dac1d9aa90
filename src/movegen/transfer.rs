//! Post-conquest troop transfer.
//!
//! After a won attack the attacker may move troops forward into the
//! conquered territory. The amount is a weighted sum of how valuable the
//! territory is, how often it has been attacked, and how well it is
//! covered by the color's other territories.

use serde::{Deserialize, Serialize};

use crate::board::{neighbors, GameState, Territory};

/// Weights of the transfer heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferWeights {
    /// Fraction of the source garrison moved into a key territory.
    pub key: f64,
    /// Troops added per attack the territory has suffered.
    pub re_attack: f64,
    /// Fraction of the source garrison scaled by owned-neighbor share.
    pub isolation: f64,
}

impl Default for TransferWeights {
    fn default() -> Self {
        TransferWeights {
            key: 0.1,
            re_attack: 0.1,
            isolation: 0.1,
        }
    }
}

/// Troops to move from `from` into the conquered `to`, clamped to
/// `[1, garrison - 1]`. Weights asking for more than the whole garrison
/// move a single troop. Returns 0 when `from` cannot spare a troop.
pub fn transfer_amount(state: &GameState, from: Territory, to: Territory, w: &TransferWeights) -> u32 {
    let total = state.troops_on(from);
    if total < 2 {
        return 0;
    }
    let color = match state.owner_of(from) {
        Some(c) => c,
        None => return 0,
    };

    let all = neighbors(to);
    let owned = all.iter().filter(|n| state.is_owned_by(**n, color)).count();
    let isolation = owned as f64 / all.len().max(1) as f64;

    let mut raw = 0.0;
    if to.is_key() {
        raw += w.key * total as f64;
    }
    raw += state.attack_counts[to as usize] as f64 * w.re_attack;
    raw += w.isolation * total as f64 * isolation;

    if raw > total as f64 {
        return 1;
    }
    (raw.floor().max(0.0) as u32).clamp(1, total - 1)
}

/// Moves troops into a conquered territory. Returns `None` when the two
/// territories are not held by the same color or the source has nothing to
/// spare.
pub fn post_win_transfer(
    state: &GameState,
    from: Territory,
    to: Territory,
    w: &TransferWeights,
) -> Option<(GameState, u32)> {
    let color = state.owner_of(from)?;
    if !state.is_owned_by(to, color) {
        return None;
    }
    let amount = transfer_amount(state, from, to, w);
    if amount == 0 {
        return None;
    }
    let mut next = state.clone();
    next.troops[from as usize] -= amount;
    next.troops[to as usize] += amount;
    Some((next, amount))
}
