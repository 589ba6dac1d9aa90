//! Action types for a single turn.
//!
//! Each tree edge carries one action. The variants record exactly what a
//! presentation layer needs to replay the committed turn: placements,
//! attacks and their outcome, post-conquest transfers, and fortifications.

use serde::Serialize;

use super::attack::AttackStrategy;
use crate::board::Territory;

/// Discriminant of an action, used by the legal-action filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    Place,
    Attack,
    AttackContinue,
    Fortify,
}

/// Every action kind in expansion order.
pub const ALL_ACTION_KINDS: [ActionKind; 4] = [
    ActionKind::Place,
    ActionKind::Attack,
    ActionKind::AttackContinue,
    ActionKind::Fortify,
];

/// A troop movement between two territories of the same owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: Territory,
    pub to: Territory,
    pub troops: u32,
}

/// A turn action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Reinforcement: `troops` placed in total, of which `card_bonus` came
    /// from a card trade.
    Place {
        troops: u32,
        card_bonus: u32,
        placements: Vec<(Territory, u32)>,
    },

    /// Attack with the simulated outcome.
    Attack {
        from: Territory,
        to: Territory,
        won: bool,
        probability: f64,
        strategy: AttackStrategy,
    },

    /// Troops moved into a freshly conquered territory.
    AttackContinue {
        from: Territory,
        to: Territory,
        troops: u32,
    },

    /// End-of-turn fortification.
    Fortify { transfers: Vec<Transfer> },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Place { .. } => ActionKind::Place,
            Action::Attack { .. } => ActionKind::Attack,
            Action::AttackContinue { .. } => ActionKind::AttackContinue,
            Action::Fortify { .. } => ActionKind::Fortify,
        }
    }

    /// For a won attack, the `(from, to)` pair a transfer may follow.
    pub fn conquest(&self) -> Option<(Territory, Territory)> {
        match *self {
            Action::Attack {
                from, to, won: true, ..
            } => Some((from, to)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let place = Action::Place {
            troops: 3,
            card_bonus: 0,
            placements: vec![(Territory::Peru, 3)],
        };
        assert_eq!(place.kind(), ActionKind::Place);
        let fortify = Action::Fortify { transfers: vec![] };
        assert_eq!(fortify.kind(), ActionKind::Fortify);
    }

    #[test]
    fn only_won_attacks_are_conquests() {
        let won = Action::Attack {
            from: Territory::China,
            to: Territory::Siam,
            won: true,
            probability: 0.8,
            strategy: AttackStrategy::Aggressive,
        };
        let lost = Action::Attack {
            from: Territory::China,
            to: Territory::Siam,
            won: false,
            probability: 0.3,
            strategy: AttackStrategy::Blitz,
        };
        assert_eq!(won.conquest(), Some((Territory::China, Territory::Siam)));
        assert_eq!(lost.conquest(), None);
    }

    #[test]
    fn serializes_with_type_tag() {
        let action = Action::AttackContinue {
            from: Territory::Brazil,
            to: Territory::NorthAfrica,
            troops: 2,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"attack_continue\""), "{json}");
        assert!(json.contains("\"to\":\"NorthAfrica\""), "{json}");
    }
}
