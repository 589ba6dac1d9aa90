//! Game state representation.
//!
//! Holds the board snapshot a search node works on: territory ownership,
//! troop counts, and the per-territory attack history. Cards and turn order
//! live in the game context, not here.

use super::adjacency::is_adjacent;
use super::territory::{
    Color, Continent, Territory, ALL_CONTINENTS, ALL_TERRITORIES, COLOR_COUNT, TERRITORY_COUNT,
};

/// Invariant violations detected in a game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("territory '{0}' is not owned by any color")]
    Unowned(&'static str),

    #[error("territory '{0}' is owned but holds no troops")]
    EmptyGarrison(&'static str),
}

/// Complete board state at a point in the turn.
///
/// Uses fixed-size arrays indexed by `Territory as usize` for O(1) lookup.
/// Troops always belong to the territory's owner, so no territory can have
/// two colors with a positive count. Cloning is a full deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Owner of each territory, None before it is claimed.
    pub owner: [Option<Color>; TERRITORY_COUNT],
    /// Troops garrisoned on each territory.
    pub troops: [u32; TERRITORY_COUNT],
    /// Number of attacks each territory has suffered.
    pub attack_counts: [u32; TERRITORY_COUNT],
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

impl GameState {
    /// Creates a state with no owners, troops, or attack history.
    pub fn empty() -> Self {
        GameState {
            owner: [None; TERRITORY_COUNT],
            troops: [0; TERRITORY_COUNT],
            attack_counts: [0; TERRITORY_COUNT],
        }
    }

    /// Claims a territory for a color with the given garrison, replacing any
    /// previous owner.
    pub fn claim(&mut self, territory: Territory, color: Color, troops: u32) {
        let idx = territory as usize;
        self.owner[idx] = Some(color);
        self.troops[idx] = troops;
    }

    /// Returns the owner of a territory.
    #[inline]
    pub fn owner_of(&self, territory: Territory) -> Option<Color> {
        self.owner[territory as usize]
    }

    /// Returns true if `color` owns `territory`.
    #[inline]
    pub fn is_owned_by(&self, territory: Territory, color: Color) -> bool {
        self.owner[territory as usize] == Some(color)
    }

    /// Returns the garrison of a territory regardless of owner.
    #[inline]
    pub fn troops_on(&self, territory: Territory) -> u32 {
        self.troops[territory as usize]
    }

    /// Returns the troops `color` holds on `territory` (zero for non-owners).
    #[inline]
    pub fn troops_of(&self, territory: Territory, color: Color) -> u32 {
        if self.is_owned_by(territory, color) {
            self.troops[territory as usize]
        } else {
            0
        }
    }

    /// Adds troops for `color` on `territory`. Returns false without changing
    /// anything if the territory belongs to another color.
    pub fn place_troops(&mut self, territory: Territory, color: Color, count: u32) -> bool {
        let idx = territory as usize;
        match self.owner[idx] {
            Some(c) if c != color => false,
            _ => {
                self.owner[idx] = Some(color);
                self.troops[idx] += count;
                true
            }
        }
    }

    /// Overwrites the garrison of `color` on `territory`. Returns false if
    /// the territory belongs to another color.
    pub fn set_troops(&mut self, territory: Territory, color: Color, count: u32) -> bool {
        let idx = territory as usize;
        if self.owner[idx] != Some(color) {
            return false;
        }
        self.troops[idx] = count;
        true
    }

    /// Moves `count` troops between two adjacent territories of the same
    /// owner. Illegal moves (not adjacent, mixed owners, or leaving the source
    /// without a defender) change nothing and return false.
    pub fn fortify(&mut self, from: Territory, to: Territory, count: u32) -> bool {
        let owner = match self.owner_of(from) {
            Some(c) => c,
            None => return false,
        };
        if from == to || !self.is_owned_by(to, owner) || !is_adjacent(from, to) {
            return false;
        }
        if count == 0 || count > self.troops_on(from).saturating_sub(1) {
            return false;
        }
        self.troops[from as usize] -= count;
        self.troops[to as usize] += count;
        true
    }

    /// Returns the territories owned by `color` in index order.
    pub fn owned_by(&self, color: Color) -> Vec<Territory> {
        ALL_TERRITORIES
            .iter()
            .copied()
            .filter(|t| self.is_owned_by(*t, color))
            .collect()
    }

    /// Counts the territories owned by `color`.
    pub fn territory_count(&self, color: Color) -> usize {
        self.owner.iter().filter(|o| **o == Some(color)).count()
    }

    /// Sums the troops of `color` across the board.
    pub fn total_troops(&self, color: Color) -> u32 {
        self.owner
            .iter()
            .zip(self.troops.iter())
            .filter(|(o, _)| **o == Some(color))
            .map(|(_, n)| *n)
            .sum()
    }

    /// Sums the troops of every color on the board.
    pub fn troops_by_color(&self) -> [u32; COLOR_COUNT] {
        let mut totals = [0u32; COLOR_COUNT];
        for (o, n) in self.owner.iter().zip(self.troops.iter()) {
            if let Some(c) = o {
                totals[*c as usize] += n;
            }
        }
        totals
    }

    /// Counts the territories of `continent` owned by `color`.
    pub fn owned_in(&self, continent: Continent, color: Color) -> usize {
        continent
            .territories()
            .iter()
            .filter(|t| self.is_owned_by(**t, color))
            .count()
    }

    /// Returns true if `color` holds every territory of `continent`.
    pub fn holds_continent(&self, continent: Continent, color: Color) -> bool {
        self.owned_in(continent, color) == continent.territory_count()
    }

    /// Sum of the bonuses of every continent `color` holds completely.
    pub fn continent_bonus(&self, color: Color) -> u32 {
        ALL_CONTINENTS
            .iter()
            .filter(|c| self.holds_continent(**c, color))
            .map(|c| c.bonus())
            .sum()
    }

    /// Returns true if `color` owns every territory.
    pub fn is_won_by(&self, color: Color) -> bool {
        self.owner.iter().all(|o| *o == Some(color))
    }

    /// Returns true if any color owns every territory.
    pub fn is_terminal(&self) -> bool {
        match self.owner[0] {
            Some(c) => self.is_won_by(c),
            None => false,
        }
    }

    /// Checks the post-setup invariant: every territory has exactly one owner
    /// and at least one defender.
    pub fn validate(&self) -> Result<(), StateError> {
        for t in ALL_TERRITORIES {
            let idx = t as usize;
            if self.owner[idx].is_none() {
                return Err(StateError::Unowned(t.name()));
            }
            if self.troops[idx] == 0 {
                return Err(StateError::EmptyGarrison(t.name()));
            }
        }
        Ok(())
    }
}
