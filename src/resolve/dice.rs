//! Dice combat.
//!
//! One round: the attacker rolls up to three dice (one fewer than its
//! troops), the defender up to two. Highest dice are compared pairwise and
//! ties go to the defender.

use rand::Rng;

/// Most dice the attacker may roll in one round.
pub const MAX_ATTACK_DICE: u32 = 3;

/// Most dice the defender may roll in one round.
pub const MAX_DEFENCE_DICE: u32 = 2;

/// Troops lost by each side in a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundOutcome {
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

/// Final troop counts after a multi-round battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub attacker: u32,
    pub defender: u32,
    pub rounds: u32,
}

impl BattleOutcome {
    /// True if the defending territory was emptied.
    pub fn conquered(&self) -> bool {
        self.defender == 0
    }
}

/// Number of dice each side rolls for the given troop counts.
#[inline]
pub fn dice_counts(attacker: u32, defender: u32) -> (usize, usize) {
    let a = attacker.saturating_sub(1).min(MAX_ATTACK_DICE);
    let d = defender.min(MAX_DEFENCE_DICE);
    (a as usize, d as usize)
}

/// Compares already-rolled dice. Both slices may be in any order.
pub fn compare_dice(attack: &[u8], defence: &[u8]) -> RoundOutcome {
    let mut a = attack.to_vec();
    let mut d = defence.to_vec();
    a.sort_unstable_by(|x, y| y.cmp(x));
    d.sort_unstable_by(|x, y| y.cmp(x));

    let mut outcome = RoundOutcome::default();
    for (ad, dd) in a.iter().zip(d.iter()) {
        if ad > dd {
            outcome.defender_losses += 1;
        } else {
            outcome.attacker_losses += 1;
        }
    }
    outcome
}

/// Rolls and resolves one round. Returns no losses when either side cannot
/// roll.
pub fn resolve_attack_round(attacker: u32, defender: u32, rng: &mut impl Rng) -> RoundOutcome {
    let (na, nd) = dice_counts(attacker, defender);
    if na == 0 || nd == 0 {
        return RoundOutcome::default();
    }
    let mut attack = [0u8; MAX_ATTACK_DICE as usize];
    let mut defence = [0u8; MAX_DEFENCE_DICE as usize];
    for die in attack[..na].iter_mut() {
        *die = rng.gen_range(1..=6);
    }
    for die in defence[..nd].iter_mut() {
        *die = rng.gen_range(1..=6);
    }
    compare_dice(&attack[..na], &defence[..nd])
}

/// Fights rounds until the attacker is down to one troop, the defender is
/// wiped out, or `max_rounds` have been played.
pub fn resolve_battle(
    attacker: u32,
    defender: u32,
    max_rounds: u32,
    rng: &mut impl Rng,
) -> BattleOutcome {
    let mut a = attacker;
    let mut d = defender;
    let mut rounds = 0;
    while rounds < max_rounds && a > 1 && d > 0 {
        let r = resolve_attack_round(a, d, rng);
        a -= r.attacker_losses;
        d -= r.defender_losses;
        rounds += 1;
    }
    BattleOutcome {
        attacker: a,
        defender: d,
        rounds,
    }
}
