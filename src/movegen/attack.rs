//! Attack candidate generation and outcome model.
//!
//! Three strategies pick `(from, to)` pairs; a single outcome model turns
//! each pair plus a win probability into the resulting board. The model
//! commits to the more likely result instead of branching on every roll.

use serde::{Deserialize, Serialize};

use crate::board::{neighbors, Color, GameState, Territory, ALL_TERRITORIES, KEY_TERRITORIES};

/// Upper bound on attack branches a strategy produces for one node.
pub const MAX_ATTACK_BRANCHES: usize = 12;

/// Sources considered by the aggressive strategy.
const AGGRESSIVE_SOURCES: usize = 5;

/// Targets per source for the aggressive strategy.
const AGGRESSIVE_TARGETS: usize = 4;

/// A way of choosing which territories to attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStrategy {
    /// Strongest territories hit their weakest neighbors.
    Aggressive,
    /// Every weak enemy territory is hit from its strongest owned neighbor.
    Guerilla,
    /// Only key territories, and only with a decisive edge.
    Blitz,
}

pub const ALL_ATTACK_STRATEGIES: [AttackStrategy; 3] = [
    AttackStrategy::Aggressive,
    AttackStrategy::Guerilla,
    AttackStrategy::Blitz,
];

impl AttackStrategy {
    pub fn name(self) -> &'static str {
        match self {
            AttackStrategy::Aggressive => "aggressive",
            AttackStrategy::Guerilla => "guerilla",
            AttackStrategy::Blitz => "blitz",
        }
    }

    /// Produces at most `cap` attack candidates for `color`. Sources always
    /// hold at least two troops.
    pub fn candidates(self, color: Color, state: &GameState, cap: usize) -> Vec<AttackCandidate> {
        let mut out = match self {
            AttackStrategy::Aggressive => aggressive(color, state),
            AttackStrategy::Guerilla => guerilla(color, state),
            AttackStrategy::Blitz => blitz(color, state),
        };
        out.truncate(cap);
        out
    }
}

/// A proposed attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackCandidate {
    pub from: Territory,
    pub to: Territory,
    pub attacker: u32,
    pub defender: u32,
}

impl AttackCandidate {
    fn new(state: &GameState, from: Territory, to: Territory) -> Self {
        AttackCandidate {
            from,
            to,
            attacker: state.troops_on(from),
            defender: state.troops_on(to),
        }
    }
}

/// Neighbors of `t` held by a color other than `color`.
fn enemy_neighbors(t: Territory, color: Color, state: &GameState) -> Vec<Territory> {
    neighbors(t)
        .iter()
        .copied()
        .filter(|n| matches!(state.owner_of(*n), Some(c) if c != color))
        .collect()
}

/// The owned neighbor of `t` with the most troops; the first one wins ties.
fn strongest_owned_neighbor(t: Territory, color: Color, state: &GameState) -> Option<Territory> {
    let mut best: Option<Territory> = None;
    for &n in neighbors(t) {
        if !state.is_owned_by(n, color) {
            continue;
        }
        match best {
            Some(b) if state.troops_on(b) >= state.troops_on(n) => {}
            _ => best = Some(n),
        }
    }
    best
}

fn aggressive(color: Color, state: &GameState) -> Vec<AttackCandidate> {
    let mut sources: Vec<Territory> = state
        .owned_by(color)
        .into_iter()
        .filter(|t| state.troops_on(*t) >= 2)
        .collect();
    sources.sort_by(|a, b| state.troops_on(*b).cmp(&state.troops_on(*a)));
    sources.truncate(AGGRESSIVE_SOURCES);

    let mut out = Vec::new();
    for from in sources {
        let mut targets = enemy_neighbors(from, color, state);
        targets.sort_by_key(|t| state.troops_on(*t));
        for to in targets.into_iter().take(AGGRESSIVE_TARGETS) {
            out.push(AttackCandidate::new(state, from, to));
        }
    }
    out
}

fn guerilla(color: Color, state: &GameState) -> Vec<AttackCandidate> {
    let mut targets: Vec<Territory> = ALL_TERRITORIES
        .iter()
        .copied()
        .filter(|t| matches!(state.owner_of(*t), Some(c) if c != color))
        .collect();
    targets.sort_by_key(|t| state.troops_on(*t));

    let mut out = Vec::new();
    for to in targets {
        let from = match strongest_owned_neighbor(to, color, state) {
            Some(f) => f,
            None => continue,
        };
        if state.troops_on(from).saturating_sub(1) > state.troops_on(to) {
            out.push(AttackCandidate::new(state, from, to));
        }
    }
    out
}

fn blitz(color: Color, state: &GameState) -> Vec<AttackCandidate> {
    let mut keys = KEY_TERRITORIES.to_vec();
    keys.sort_by_key(|t| state.troops_on(*t));

    let mut out = Vec::new();
    for to in keys {
        if !matches!(state.owner_of(to), Some(c) if c != color) {
            continue;
        }
        let from = match strongest_owned_neighbor(to, color, state) {
            Some(f) => f,
            None => continue,
        };
        let attacker = state.troops_on(from);
        if attacker >= 2 && attacker - 1 > state.troops_on(to) {
            out.push(AttackCandidate::new(state, from, to));
        }
    }
    out
}

/// Applies the committed outcome of an attack with win probability `p`.
///
/// Above even odds the attack wins: the attacker loses
/// `round(attacker * (1 - p)) + 1` troops (never its last one) and the
/// target changes hands with one troop. Otherwise the attacker falls back
/// to one troop and the defender loses `round(defender * (1 - p))`; a
/// defender reduced to zero still falls. The target's attack count grows
/// either way. Returns the new state and whether the target was taken.
pub fn apply_attack_outcome(
    state: &GameState,
    from: Territory,
    to: Territory,
    p: f64,
) -> (GameState, bool) {
    let mut next = state.clone();
    let color = match state.owner_of(from) {
        Some(c) => c,
        None => return (next, false),
    };
    let attacker = state.troops_on(from);
    let defender = state.troops_on(to);
    next.attack_counts[to as usize] += 1;

    let won = if p > 0.5 {
        let losses = (attacker as f64 * (1.0 - p)).round() as u32 + 1;
        next.troops[from as usize] = attacker.saturating_sub(losses).max(1);
        true
    } else {
        let losses = (defender as f64 * (1.0 - p)).round() as u32;
        next.troops[from as usize] = 1;
        next.troops[to as usize] = defender.saturating_sub(losses);
        next.troops[to as usize] == 0
    };

    if won {
        next.claim(to, color, 1);
    }
    (next, won)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skirmish() -> GameState {
        let mut state = GameState::empty();
        state.claim(Territory::China, Color::Green, 10);
        state.claim(Territory::Siam, Color::Green, 1);
        state.claim(Territory::India, Color::Red, 2);
        state.claim(Territory::Mongolia, Color::Red, 5);
        state.claim(Territory::Indonesia, Color::Black, 3);
        state.claim(Territory::MiddleEast, Color::Black, 1);
        state.claim(Territory::Ural, Color::Green, 4);
        state
    }

    #[test]
    fn aggressive_targets_weakest_neighbors_first() {
        let state = skirmish();
        let c = AttackStrategy::Aggressive.candidates(Color::Green, &state, MAX_ATTACK_BRANCHES);
        assert!(!c.is_empty());
        assert_eq!(c[0].from, Territory::China);
        assert_eq!(c[0].to, Territory::India);
        assert!(c.iter().all(|a| a.attacker >= 2));
        assert!(c.iter().all(|a| a.from != Territory::Siam));
        assert!(c.iter().all(|a| !state.is_owned_by(a.to, Color::Green)));
    }

    #[test]
    fn aggressive_respects_cap() {
        let state = skirmish();
        let c = AttackStrategy::Aggressive.candidates(Color::Green, &state, 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn guerilla_requires_margin() {
        let state = skirmish();
        let c = AttackStrategy::Guerilla.candidates(Color::Green, &state, MAX_ATTACK_BRANCHES);
        // Indonesia (3) is only reachable from Siam (1): skipped.
        assert!(c.iter().all(|a| a.to != Territory::Indonesia));
        // India (2) from China (10).
        assert!(c.iter().any(|a| a.from == Territory::China && a.to == Territory::India));
        for a in &c {
            assert!(a.attacker - 1 > a.defender);
        }
    }

    #[test]
    fn blitz_only_hits_foreign_key_territories() {
        let state = skirmish();
        let c = AttackStrategy::Blitz.candidates(Color::Green, &state, MAX_ATTACK_BRANCHES);
        assert!(!c.is_empty());
        for a in &c {
            assert!(a.to.is_key());
            assert!(!state.is_owned_by(a.to, Color::Green));
        }
        // Middle East (1) has no owned neighbor, so India (2) comes first.
        assert_eq!(c[0].to, Territory::India);
    }

    #[test]
    fn single_troop_sources_never_attack() {
        let mut state = GameState::empty();
        state.claim(Territory::Siam, Color::Green, 1);
        state.claim(Territory::India, Color::Red, 1);
        for s in ALL_ATTACK_STRATEGIES {
            assert!(s.candidates(Color::Green, &state, MAX_ATTACK_BRANCHES).is_empty());
        }
    }

    #[test]
    fn likely_win_transfers_ownership() {
        let state = skirmish();
        let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::India, 0.9);
        assert!(won);
        assert_eq!(next.owner_of(Territory::India), Some(Color::Green));
        assert_eq!(next.troops_on(Territory::India), 1);
        // round(10 * 0.1) + 1 = 2
        assert_eq!(next.troops_on(Territory::China), 8);
        assert_eq!(next.attack_counts[Territory::India as usize], 1);
        assert_eq!(state.owner_of(Territory::India), Some(Color::Red));
    }

    #[test]
    fn win_never_strips_last_troop() {
        let mut state = skirmish();
        state.troops[Territory::China as usize] = 2;
        let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::India, 0.51);
        assert!(won);
        assert_eq!(next.troops_on(Territory::China), 1);
    }

    #[test]
    fn likely_loss_reduces_attacker_to_one() {
        let state = skirmish();
        let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::Mongolia, 0.35);
        assert!(!won);
        assert_eq!(next.troops_on(Territory::China), 1);
        // round(5 * 0.65) = 3
        assert_eq!(next.troops_on(Territory::Mongolia), 2);
        assert_eq!(next.owner_of(Territory::Mongolia), Some(Color::Red));
        assert_eq!(next.attack_counts[Territory::Mongolia as usize], 1);
    }

    #[test]
    fn loss_that_empties_defender_is_a_win() {
        let state = skirmish();
        let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::India, 0.4);
        // round(2 * 0.6) = 1, leaving one defender.
        assert!(!won);
        assert_eq!(next.troops_on(Territory::India), 1);

        let (next, won) = apply_attack_outcome(&state, Territory::China, Territory::India, 0.2);
        // round(2 * 0.8) = 2 wipes the garrison.
        assert!(won);
        assert_eq!(next.owner_of(Territory::India), Some(Color::Green));
        assert_eq!(next.troops_on(Territory::India), 1);
        assert_eq!(next.troops_on(Territory::China), 1);
    }
}
