//! End-of-turn fortification.
//!
//! Weak territories pull troops from their owned neighbors in proportion to
//! each neighbor's garrison. Every neighbor keeps at least one troop.

use crate::board::{neighbors, Color, GameState, Territory};

use super::action::Transfer;

/// Default fraction of the neighbors' combined garrison pulled into a weak
/// territory.
pub const DEFAULT_FORTIFY_SHARE: f64 = 0.5;

/// Fortifies `color`'s territories weakest first.
///
/// For each target, `need = round(neighbor_total * share)` and each owned
/// neighbor contributes `max(1, round(need * its_share))`, capped at what it
/// can spare. Counts are read live, so earlier transfers shape later ones.
/// Total troops are conserved.
pub fn fortify_weakest(state: &GameState, color: Color, share: f64) -> (GameState, Vec<Transfer>) {
    let mut next = state.clone();
    let mut transfers = Vec::new();

    let mut targets = state.owned_by(color);
    targets.sort_by_key(|t| state.troops_on(*t));

    for target in targets {
        let donors: Vec<(Territory, u32)> = neighbors(target)
            .iter()
            .filter(|n| next.is_owned_by(**n, color))
            .map(|n| (*n, next.troops_on(*n)))
            .collect();
        let pool: u32 = donors.iter().map(|(_, n)| n).sum();
        if pool == 0 {
            continue;
        }
        let need = (pool as f64 * share).round();

        for (donor, troops) in donors {
            let portion = troops as f64 / pool as f64;
            let wanted = ((need * portion).round() as u32).max(1);
            let give = wanted.min(next.troops_on(donor).saturating_sub(1));
            if give == 0 {
                continue;
            }
            if next.fortify(donor, target, give) {
                transfers.push(Transfer {
                    from: donor,
                    to: target,
                    troops: give,
                });
            }
        }
    }

    (next, transfers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front() -> GameState {
        let mut state = GameState::empty();
        state.claim(Territory::Siam, Color::Green, 1);
        state.claim(Territory::China, Color::Green, 9);
        state.claim(Territory::India, Color::Green, 3);
        state.claim(Territory::Indonesia, Color::Red, 6);
        state
    }

    #[test]
    fn conserves_troops_and_keeps_defenders() {
        let state = front();
        let (next, transfers) = fortify_weakest(&state, Color::Green, DEFAULT_FORTIFY_SHARE);
        assert!(!transfers.is_empty());
        assert_eq!(next.total_troops(Color::Green), state.total_troops(Color::Green));
        for t in next.owned_by(Color::Green) {
            assert!(next.troops_on(t) >= 1);
        }
        assert_eq!(next.troops_on(Territory::Indonesia), 6);
    }

    #[test]
    fn weakest_target_draws_proportionally() {
        let state = front();
        let (_, transfers) = fortify_weakest(&state, Color::Green, DEFAULT_FORTIFY_SHARE);
        // Siam: pool 12, need 6. China gives round(6 * 0.75) = 5, then
        // India gives round(6 * 0.25) = 2.
        let first = transfers[0];
        assert_eq!(first.to, Territory::Siam);
        assert_eq!(first.from, Territory::China);
        assert_eq!(first.troops, 5);
        let second = transfers[1];
        assert_eq!(second.from, Territory::India);
        assert_eq!(second.troops, 2);
    }

    #[test]
    fn isolated_territories_are_left_alone() {
        let mut state = GameState::empty();
        state.claim(Territory::Japan, Color::Black, 1);
        state.claim(Territory::Peru, Color::Black, 7);
        let (next, transfers) = fortify_weakest(&state, Color::Black, DEFAULT_FORTIFY_SHARE);
        assert!(transfers.is_empty());
        assert_eq!(next, state);
    }
}
