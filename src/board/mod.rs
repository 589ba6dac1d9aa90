//! Board representation and game-state types.
//!
//! Contains the world map (territories, continents, adjacency), the card
//! deck, and the per-node game state.

pub mod adjacency;
pub mod cards;
pub mod state;
pub mod territory;

pub use adjacency::{is_adjacent, neighbors, Border, BORDERS, BORDER_COUNT};
pub use cards::{
    base_trade_bonus, find_trade, peek_trade, trade_cards, Card, CardKind, Deck, TradeMatch,
    CARD_TEMPLATE,
};
pub use state::{GameState, StateError};
pub use territory::{
    Color, Continent, Territory, ALL_COLORS, ALL_CONTINENTS, ALL_TERRITORIES, COLOR_COUNT,
    CONTINENT_COUNT, KEY_TERRITORIES, TERRITORY_COUNT,
};
