//! Game context.
//!
//! Holds the authoritative board, the card pile, every color's hand, the
//! global trade counter, and whose turn it is. `find_best_move` runs the
//! turn search for a color and commits the winning path.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{
    peek_trade, trade_cards, Card, Color, Deck, GameState, StateError, Territory, COLOR_COUNT,
};
use crate::config::SearchConfig;
use crate::movegen::{Action, ActionKind};
use crate::search::search;

/// Errors that stop a turn.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid board: {0}")]
    InvalidState(#[from] StateError),

    #[error("search produced no actions for {0}")]
    EmptySearch(&'static str),
}

/// Summary of one committed turn, for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub color: Color,
    /// Committed actions, in play order.
    pub actions: Vec<Action>,
    /// Troops gained by trading cards this turn (0 if no trade happened).
    pub card_bonus: u32,
    pub card_drawn: Card,
    /// Evaluation of the board after the turn.
    pub score: f64,
    /// Search tree size.
    pub nodes: usize,
    pub territories: usize,
    pub troops: u32,
}

/// Holds the mutable state of a game between turns.
pub struct Game {
    pub state: GameState,
    pub deck: Deck,
    pub hands: [Vec<Card>; COLOR_COUNT],
    /// Trades made by any color so far; drives the trade bonus ladder.
    pub matches_made: u32,
    pub turn: Color,
    pub config: SearchConfig,
    rng: SmallRng,
}

impl Game {
    /// Creates a game with an empty board and a freshly shuffled pile.
    /// A seed of 0 draws from entropy.
    pub fn new(config: SearchConfig, seed: u64) -> Self {
        Self::with_state(GameState::empty(), config, seed)
    }

    /// Creates a game around an existing board.
    pub fn with_state(state: GameState, config: SearchConfig, seed: u64) -> Self {
        let mut rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        let deck = Deck::new(&mut rng);
        Game {
            state,
            deck,
            hands: Default::default(),
            matches_made: 0,
            turn: Color::Red,
            config,
            rng,
        }
    }

    /// Adds troops for `color` on `territory`, claiming it if unowned.
    /// Returns false if another color holds it.
    pub fn place_troops(&mut self, territory: Territory, color: Color, count: u32) -> bool {
        self.state.place_troops(territory, color, count)
    }

    /// Overwrites the garrison on a territory `color` holds.
    pub fn set_troops(&mut self, territory: Territory, color: Color, count: u32) -> bool {
        self.state.set_troops(territory, color, count)
    }

    pub fn hand(&self, color: Color) -> &[Card] {
        &self.hands[color as usize]
    }

    /// Bonus `color` would get from its best trade right now.
    pub fn card_bonus(&self, color: Color) -> u32 {
        let state = &self.state;
        peek_trade(
            &self.hands[color as usize],
            |t| state.is_owned_by(t, color),
            self.matches_made,
        )
    }

    /// The next color after `color` that still holds territory. Falls back
    /// to the plain turn order when nobody does.
    pub fn next_active(&self, color: Color) -> Color {
        let mut next = color.next();
        for _ in 0..COLOR_COUNT {
            if self.state.territory_count(next) > 0 {
                return next;
            }
            next = next.next();
        }
        color.next()
    }

    /// Plans and commits the turn of `color`.
    ///
    /// The board must satisfy the post-setup invariant. On success the board
    /// holds the final state of the committed path, any card trade the path
    /// relied on has been made, `color` has drawn a card, and the turn has
    /// passed to the next color still in the game.
    pub fn find_best_move<W: Write>(
        &mut self,
        color: Color,
        out: &mut W,
    ) -> Result<TurnReport, EngineError> {
        self.state.validate()?;

        let peeked = self.card_bonus(color);
        let result = search(color, &self.state, peeked, &self.config, &mut self.rng, out);
        if result.actions.is_empty() {
            return Err(EngineError::EmptySearch(color.name()));
        }

        let placed = result.actions.iter().any(|a| a.kind() == ActionKind::Place);
        let card_bonus = if placed {
            let state = &self.state;
            trade_cards(
                &mut self.hands[color as usize],
                &mut self.deck,
                |t| state.is_owned_by(t, color),
                &mut self.matches_made,
                &mut self.rng,
            )
        } else {
            0
        };
        debug_assert!(!placed || card_bonus == peeked);

        self.state = result.final_state;
        let card_drawn = self.deck.draw(&mut self.rng);
        self.hands[color as usize].push(card_drawn);
        self.turn = self.next_active(color);

        let report = TurnReport {
            color,
            actions: result.actions,
            card_bonus,
            card_drawn,
            score: result.score,
            nodes: result.nodes,
            territories: self.state.territory_count(color),
            troops: self.state.total_troops(color),
        };
        info!(
            color = color.name(),
            actions = report.actions.len(),
            card_bonus,
            territories = report.territories,
            troops = report.troops,
            "turn committed"
        );
        debug!(next = self.turn.name(), hand = self.hand(color).len(), "turn passed");
        Ok(report)
    }

    /// Plays the turn of whichever color is to move.
    pub fn play_turn<W: Write>(&mut self, out: &mut W) -> Result<TurnReport, EngineError> {
        let color = self.turn;
        self.find_best_move(color, out)
    }
}
