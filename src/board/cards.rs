//! Reinforcement cards: template, draw pile, and trade matching.
//!
//! A trade needs three cards forming either one of each troop type or three
//! of the same type. A single Wild may stand in for any one card of a set.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::territory::Territory;

/// The troop symbol printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardKind {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

/// The three troop kinds a set can be formed from, in matching order.
const TROOP_KINDS: [CardKind; 3] = [CardKind::Infantry, CardKind::Cavalry, CardKind::Artillery];

/// A single card. Wilds carry no territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub territory: Option<Territory>,
    pub kind: CardKind,
}

impl Card {
    pub const fn new(territory: Territory, kind: CardKind) -> Self {
        Card {
            territory: Some(territory),
            kind,
        }
    }

    pub const fn wild() -> Self {
        Card {
            territory: None,
            kind: CardKind::Wild,
        }
    }

    pub fn is_wild(&self) -> bool {
        self.kind == CardKind::Wild
    }
}

/// One template row: the card face and how many copies go into the pile.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEntry {
    pub territory: Option<Territory>,
    pub kind: CardKind,
    pub copies: u32,
}

const fn card(territory: Territory, kind: CardKind) -> TemplateEntry {
    TemplateEntry {
        territory: Some(territory),
        kind,
        copies: 1,
    }
}

const fn wild(copies: u32) -> TemplateEntry {
    TemplateEntry {
        territory: None,
        kind: CardKind::Wild,
        copies,
    }
}

use CardKind::*;
use Territory::*;

pub const TEMPLATE_ROWS: usize = 43;

/// Card template used to build and rebuild the draw pile.
pub static CARD_TEMPLATE: [TemplateEntry; TEMPLATE_ROWS] = [
    card(Alaska, Infantry),
    card(NorthwestTerritory, Artillery),
    card(Greenland, Cavalry),
    card(Alberta, Cavalry),
    card(Ontario, Cavalry),
    card(Quebec, Cavalry),
    card(WesternUnitedStates, Artillery),
    card(EasternUnitedStates, Artillery),
    card(CentralAmerica, Artillery),
    card(Venezuela, Infantry),
    card(Peru, Infantry),
    card(Brazil, Artillery),
    card(Argentina, Infantry),
    card(Iceland, Infantry),
    card(Scandinavia, Cavalry),
    card(GreatBritain, Artillery),
    card(NorthernEurope, Artillery),
    card(WesternEurope, Artillery),
    card(SouthernEurope, Artillery),
    card(Ukraine, Cavalry),
    card(NorthAfrica, Cavalry),
    card(Egypt, Infantry),
    card(EastAfrica, Infantry),
    card(Congo, Infantry),
    card(SouthAfrica, Artillery),
    card(Madagascar, Cavalry),
    card(Ural, Cavalry),
    card(Siberia, Cavalry),
    card(Yakutsk, Cavalry),
    card(Kamchatka, Infantry),
    card(Irkutsk, Cavalry),
    card(Mongolia, Infantry),
    card(Japan, Artillery),
    card(Afghanistan, Cavalry),
    card(China, Infantry),
    card(MiddleEast, Infantry),
    card(India, Cavalry),
    card(Siam, Infantry),
    card(Indonesia, Artillery),
    card(NewGuinea, Infantry),
    card(WesternAustralia, Artillery),
    card(EasternAustralia, Artillery),
    wild(2),
];

/// Expands the template into a flat, unshuffled card list.
pub fn template_cards() -> Vec<Card> {
    let mut cards = Vec::new();
    for entry in CARD_TEMPLATE.iter() {
        for _ in 0..entry.copies {
            cards.push(Card {
                territory: entry.territory,
                kind: entry.kind,
            });
        }
    }
    cards
}

/// Draw pile. Cards are drawn from the front and traded cards return to the
/// back. An empty pile is rebuilt from the template and reshuffled.
#[derive(Debug, Clone)]
pub struct Deck {
    pile: VecDeque<Card>,
}

impl Deck {
    /// Builds a freshly shuffled pile from the template.
    pub fn new(rng: &mut SmallRng) -> Self {
        let mut deck = Deck {
            pile: VecDeque::new(),
        };
        deck.rebuild(rng);
        deck
    }

    /// Builds a pile holding exactly `cards` in draw order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck {
            pile: cards.into(),
        }
    }

    fn rebuild(&mut self, rng: &mut SmallRng) {
        let mut cards = template_cards();
        cards.shuffle(rng);
        self.pile = cards.into();
    }

    /// Draws the top card, rebuilding the pile first if it is empty.
    pub fn draw(&mut self, rng: &mut SmallRng) -> Card {
        if self.pile.is_empty() {
            tracing::debug!("draw pile exhausted, rebuilding from template");
            self.rebuild(rng);
        }
        match self.pile.pop_front() {
            Some(c) => c,
            None => unreachable!("rebuilt pile holds the full template"),
        }
    }

    /// Shuffles `cards` and appends them to the bottom of the pile.
    pub fn return_to_bottom(&mut self, mut cards: Vec<Card>, rng: &mut SmallRng) {
        cards.shuffle(rng);
        self.pile.extend(cards);
    }

    pub fn len(&self) -> usize {
        self.pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    /// Counts the cards in the pile equal to `card`.
    pub fn count_of(&self, card: &Card) -> usize {
        self.pile.iter().filter(|c| *c == card).count()
    }
}

/// A playable three-card set found in a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeMatch {
    /// Hand indices of the matched cards.
    pub indices: Vec<usize>,
    /// Bonus for matched cards showing owned territories (capped at 2).
    pub territory_bonus: u32,
    /// True for a one-of-each set, false for three of a kind.
    pub distinct: bool,
}

/// Base bonus for the next trade given how many trades were already made.
pub fn base_trade_bonus(matches_made: u32) -> u32 {
    match matches_made {
        0 => 4,
        1 => 6,
        2 => 8,
        3 => 10,
        _ => 12,
    }
}

fn territory_bonus<F>(hand: &[Card], indices: &[usize], owns: &F) -> u32
where
    F: Fn(Territory) -> bool,
{
    let owned = indices
        .iter()
        .filter(|&&i| hand[i].territory.is_some_and(owns))
        .count() as u32;
    (owned * 2).min(2)
}

/// Indices of cards of `kind`, owned territories first, hand order otherwise.
fn cards_of_kind<F>(hand: &[Card], kind: CardKind, owns: &F) -> Vec<usize>
where
    F: Fn(Territory) -> bool,
{
    let mut idx: Vec<usize> = (0..hand.len()).filter(|&i| hand[i].kind == kind).collect();
    idx.sort_by_key(|&i| !hand[i].territory.is_some_and(owns));
    idx
}

fn distinct_set<F>(hand: &[Card], owns: &F) -> Option<Vec<usize>>
where
    F: Fn(Territory) -> bool,
{
    let wild = hand.iter().position(Card::is_wild);
    let mut wild_used = false;
    let mut set = Vec::with_capacity(3);
    for kind in TROOP_KINDS {
        match cards_of_kind(hand, kind, owns).first() {
            Some(&i) => set.push(i),
            None => match wild {
                Some(w) if !wild_used => {
                    wild_used = true;
                    set.push(w);
                }
                _ => return None,
            },
        }
    }
    Some(set)
}

fn same_kind_set<F>(hand: &[Card], owns: &F) -> Option<Vec<usize>>
where
    F: Fn(Territory) -> bool,
{
    let wild = hand.iter().position(Card::is_wild);
    let mut best: Option<(u32, Vec<usize>)> = None;
    for kind in TROOP_KINDS {
        let mut set: Vec<usize> = cards_of_kind(hand, kind, owns).into_iter().take(3).collect();
        if set.len() == 2 {
            if let Some(w) = wild {
                set.push(w);
            }
        }
        if set.len() < 3 {
            continue;
        }
        let bonus = territory_bonus(hand, &set, owns);
        if best.as_ref().map_or(true, |(b, _)| bonus > *b) {
            best = Some((bonus, set));
        }
    }
    best.map(|(_, set)| set)
}

/// Finds the best playable set in `hand`. Prefers the set with the higher
/// territory bonus; on a tie the one-of-each set wins.
pub fn find_trade<F>(hand: &[Card], owns: F) -> Option<TradeMatch>
where
    F: Fn(Territory) -> bool,
{
    if hand.len() < 3 {
        return None;
    }
    let distinct = distinct_set(hand, &owns).map(|indices| TradeMatch {
        territory_bonus: territory_bonus(hand, &indices, &owns),
        indices,
        distinct: true,
    });
    let same = same_kind_set(hand, &owns).map(|indices| TradeMatch {
        territory_bonus: territory_bonus(hand, &indices, &owns),
        indices,
        distinct: false,
    });
    match (distinct, same) {
        (Some(d), Some(s)) => {
            if s.territory_bonus > d.territory_bonus {
                Some(s)
            } else {
                Some(d)
            }
        }
        (d, s) => d.or(s),
    }
}

/// Returns the bonus a trade would yield without touching the hand, pile,
/// or match counter. Zero when no set is playable.
pub fn peek_trade<F>(hand: &[Card], owns: F, matches_made: u32) -> u32
where
    F: Fn(Territory) -> bool,
{
    match find_trade(hand, owns) {
        Some(m) => (base_trade_bonus(matches_made) + m.territory_bonus).min(12),
        None => 0,
    }
}

/// Trades the best set in `hand`: the matched cards leave the hand, are
/// shuffled onto the bottom of the pile, and the match counter advances.
/// Returns the bonus, or zero (with nothing moved) when no set is playable.
pub fn trade_cards<F>(
    hand: &mut Vec<Card>,
    deck: &mut Deck,
    owns: F,
    matches_made: &mut u32,
    rng: &mut SmallRng,
) -> u32
where
    F: Fn(Territory) -> bool,
{
    let m = match find_trade(hand, owns) {
        Some(m) => m,
        None => return 0,
    };
    let bonus = (base_trade_bonus(*matches_made) + m.territory_bonus).min(12);
    *matches_made += 1;

    let mut indices = m.indices;
    indices.sort_unstable_by(|a, b| b.cmp(a));
    let traded: Vec<Card> = indices.into_iter().map(|i| hand.remove(i)).collect();
    tracing::debug!(bonus, distinct = m.distinct, "traded cards");
    deck.return_to_bottom(traded, rng);
    bonus
}
