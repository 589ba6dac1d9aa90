//! Legal action kinds for a node.
//!
//! Which kinds may follow depends only on the kind of the incoming edge and
//! how many layers remain before the depth limit.

use crate::movegen::{ActionKind, ALL_ACTION_KINDS};

/// Returns the action kinds that may be expanded under a node reached by
/// `prev`, with `remaining` layers left below it.
///
/// - Fortification ends the turn, so nothing follows it.
/// - With one layer left only fortification is allowed.
/// - After an attack, placement is closed but attacks may repeat.
/// - After anything else, a post-conquest transfer is impossible and the
///   same kind may not repeat.
pub fn legal_actions(prev: Option<ActionKind>, remaining: u32) -> Vec<ActionKind> {
    if prev == Some(ActionKind::Fortify) || remaining == 0 {
        return Vec::new();
    }
    if remaining == 1 {
        return vec![ActionKind::Fortify];
    }

    let mut kinds = ALL_ACTION_KINDS.to_vec();
    match prev {
        Some(ActionKind::Attack) => kinds.retain(|k| *k != ActionKind::Place),
        _ => kinds.retain(|k| *k != ActionKind::AttackContinue && Some(*k) != prev),
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionKind::*;

    #[test]
    fn root_allows_everything_but_transfer() {
        assert_eq!(legal_actions(None, 3), vec![Place, Attack, Fortify]);
    }

    #[test]
    fn fortify_is_terminal() {
        assert!(legal_actions(Some(Fortify), 3).is_empty());
        assert!(legal_actions(Some(Fortify), 1).is_empty());
    }

    #[test]
    fn last_layer_forces_fortify() {
        for prev in [None, Some(Place), Some(Attack), Some(AttackContinue)] {
            assert_eq!(legal_actions(prev, 1), vec![Fortify]);
        }
    }

    #[test]
    fn no_expansion_past_the_limit() {
        assert!(legal_actions(Some(Place), 0).is_empty());
    }

    #[test]
    fn attack_closes_placement() {
        assert_eq!(legal_actions(Some(Attack), 2), vec![Attack, AttackContinue, Fortify]);
    }

    #[test]
    fn non_attack_kinds_do_not_repeat() {
        assert_eq!(legal_actions(Some(Place), 2), vec![Attack, Fortify]);
        assert_eq!(legal_actions(Some(AttackContinue), 2), vec![Place, Attack, Fortify]);
    }
}
