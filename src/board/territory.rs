//! Territory, continent, and color definitions for the standard world map.
//!
//! All 42 territories are enumerated grouped by continent. Territory metadata
//! (display name, continent) is stored in a compile-time lookup table indexed
//! by the `Territory` enum discriminant.

use serde::Serialize;

/// The number of territories on the world map.
pub const TERRITORY_COUNT: usize = 42;

/// The number of continents on the world map.
pub const CONTINENT_COUNT: usize = 6;

/// The number of player colors.
pub const COLOR_COUNT: usize = 4;

/// A territory on the world map.
///
/// Variants are grouped by continent in the order of `ALL_CONTINENTS`.
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum Territory {
    Alaska = 0,
    NorthwestTerritory = 1,
    Greenland = 2,
    Alberta = 3,
    Ontario = 4,
    Quebec = 5,
    WesternUnitedStates = 6,
    EasternUnitedStates = 7,
    CentralAmerica = 8,
    Venezuela = 9,
    Peru = 10,
    Brazil = 11,
    Argentina = 12,
    Iceland = 13,
    Scandinavia = 14,
    GreatBritain = 15,
    NorthernEurope = 16,
    WesternEurope = 17,
    SouthernEurope = 18,
    Ukraine = 19,
    NorthAfrica = 20,
    Egypt = 21,
    EastAfrica = 22,
    Congo = 23,
    SouthAfrica = 24,
    Madagascar = 25,
    Ural = 26,
    Siberia = 27,
    Yakutsk = 28,
    Kamchatka = 29,
    Irkutsk = 30,
    Mongolia = 31,
    Japan = 32,
    Afghanistan = 33,
    China = 34,
    MiddleEast = 35,
    India = 36,
    Siam = 37,
    Indonesia = 38,
    NewGuinea = 39,
    WesternAustralia = 40,
    EasternAustralia = 41,
}

/// All territory variants in index order.
pub const ALL_TERRITORIES: [Territory; TERRITORY_COUNT] = [
    Territory::Alaska, Territory::NorthwestTerritory, Territory::Greenland,
    Territory::Alberta, Territory::Ontario, Territory::Quebec,
    Territory::WesternUnitedStates, Territory::EasternUnitedStates, Territory::CentralAmerica,
    Territory::Venezuela, Territory::Peru, Territory::Brazil, Territory::Argentina,
    Territory::Iceland, Territory::Scandinavia, Territory::GreatBritain,
    Territory::NorthernEurope, Territory::WesternEurope, Territory::SouthernEurope,
    Territory::Ukraine,
    Territory::NorthAfrica, Territory::Egypt, Territory::EastAfrica,
    Territory::Congo, Territory::SouthAfrica, Territory::Madagascar,
    Territory::Ural, Territory::Siberia, Territory::Yakutsk, Territory::Kamchatka,
    Territory::Irkutsk, Territory::Mongolia, Territory::Japan, Territory::Afghanistan,
    Territory::China, Territory::MiddleEast, Territory::India, Territory::Siam,
    Territory::Indonesia, Territory::NewGuinea, Territory::WesternAustralia,
    Territory::EasternAustralia,
];

/// Territories weighted by the placement and blitz heuristics: choke points
/// and continent gateways.
pub const KEY_TERRITORIES: [Territory; 10] = [
    Territory::Indonesia,
    Territory::Venezuela,
    Territory::NorthAfrica,
    Territory::MiddleEast,
    Territory::Ukraine,
    Territory::China,
    Territory::India,
    Territory::WesternEurope,
    Territory::EasternUnitedStates,
    Territory::Brazil,
];

impl Territory {
    /// Returns the display name for this territory.
    pub const fn name(self) -> &'static str {
        TERRITORY_INFO[self as usize].name
    }

    /// Returns the continent this territory belongs to.
    pub const fn continent(self) -> Continent {
        TERRITORY_INFO[self as usize].continent
    }

    /// Returns true if this is one of the ten key territories.
    pub fn is_key(self) -> bool {
        KEY_TERRITORIES.contains(&self)
    }

    /// Looks up a territory by its display name.
    pub fn from_name(name: &str) -> Option<Territory> {
        ALL_TERRITORIES.iter().copied().find(|t| t.name() == name)
    }
}

/// A continent grouping. Holding every territory of a continent grants its bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Continent {
    NorthAmerica = 0,
    SouthAmerica = 1,
    Europe = 2,
    Africa = 3,
    Asia = 4,
    Australia = 5,
}

/// All continents in index order.
pub const ALL_CONTINENTS: [Continent; CONTINENT_COUNT] = [
    Continent::NorthAmerica,
    Continent::SouthAmerica,
    Continent::Europe,
    Continent::Africa,
    Continent::Asia,
    Continent::Australia,
];

impl Continent {
    /// Returns the short code used in reports.
    pub const fn abbr(self) -> &'static str {
        match self {
            Continent::NorthAmerica => "NA",
            Continent::SouthAmerica => "SA",
            Continent::Europe => "EU",
            Continent::Africa => "AF",
            Continent::Asia => "AS",
            Continent::Australia => "AU",
        }
    }

    /// Reinforcement bonus for holding the whole continent.
    pub const fn bonus(self) -> u32 {
        match self {
            Continent::NorthAmerica => 5,
            Continent::SouthAmerica => 2,
            Continent::Europe => 5,
            Continent::Africa => 3,
            Continent::Asia => 7,
            Continent::Australia => 2,
        }
    }

    /// Number of territories in this continent.
    pub const fn territory_count(self) -> usize {
        match self {
            Continent::NorthAmerica => 9,
            Continent::SouthAmerica => 4,
            Continent::Europe => 7,
            Continent::Africa => 6,
            Continent::Asia => 12,
            Continent::Australia => 4,
        }
    }

    /// Returns the territories of this continent. They are contiguous in
    /// `ALL_TERRITORIES`.
    pub fn territories(self) -> &'static [Territory] {
        let start: usize = ALL_CONTINENTS[..self as usize]
            .iter()
            .map(|c| c.territory_count())
            .sum();
        &ALL_TERRITORIES[start..start + self.territory_count()]
    }
}

/// A player color. The enum order is the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    LightBlue = 1,
    Green = 2,
    Black = 3,
}

/// All colors in turn order.
pub const ALL_COLORS: [Color; COLOR_COUNT] = [Color::Red, Color::LightBlue, Color::Green, Color::Black];

impl Color {
    /// Returns the display name of this color.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::LightBlue => "Light Blue",
            Color::Green => "Green",
            Color::Black => "Black",
        }
    }

    /// Parses a color from its display name.
    pub fn from_name(name: &str) -> Option<Color> {
        match name {
            "Red" => Some(Color::Red),
            "Light Blue" => Some(Color::LightBlue),
            "Green" => Some(Color::Green),
            "Black" => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns the color that plays after this one.
    pub const fn next(self) -> Color {
        ALL_COLORS[(self as usize + 1) % COLOR_COUNT]
    }
}

/// Static metadata for a territory.
pub struct TerritoryInfo {
    pub name: &'static str,
    pub continent: Continent,
}

const fn info(name: &'static str, continent: Continent) -> TerritoryInfo {
    TerritoryInfo { name, continent }
}

use Continent::*;

/// Compile-time lookup table: index by `Territory as usize`.
pub static TERRITORY_INFO: [TerritoryInfo; TERRITORY_COUNT] = [
    info("Alaska", NorthAmerica),
    info("Northwest Territory", NorthAmerica),
    info("Greenland", NorthAmerica),
    info("Alberta", NorthAmerica),
    info("Ontario", NorthAmerica),
    info("Quebec", NorthAmerica),
    info("Western United States", NorthAmerica),
    info("Eastern United States", NorthAmerica),
    info("Central America", NorthAmerica),
    info("Venezuela", SouthAmerica),
    info("Peru", SouthAmerica),
    info("Brazil", SouthAmerica),
    info("Argentina", SouthAmerica),
    info("Iceland", Europe),
    info("Scandinavia", Europe),
    info("Great Britain", Europe),
    info("Northern Europe", Europe),
    info("Western Europe", Europe),
    info("Southern Europe", Europe),
    info("Ukraine", Europe),
    info("North Africa", Africa),
    info("Egypt", Africa),
    info("East Africa", Africa),
    info("Congo", Africa),
    info("South Africa", Africa),
    info("Madagascar", Africa),
    info("Ural", Asia),
    info("Siberia", Asia),
    info("Yakutsk", Asia),
    info("Kamchatka", Asia),
    info("Irkutsk", Asia),
    info("Mongolia", Asia),
    info("Japan", Asia),
    info("Afghanistan", Asia),
    info("China", Asia),
    info("Middle East", Asia),
    info("India", Asia),
    info("Siam", Asia),
    info("Indonesia", Australia),
    info("New Guinea", Australia),
    info("Western Australia", Australia),
    info("Eastern Australia", Australia),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn territory_indices_match_table() {
        for (i, t) in ALL_TERRITORIES.iter().enumerate() {
            assert_eq!(*t as usize, i);
        }
    }

    #[test]
    fn continent_counts_sum_to_territory_count() {
        let total: usize = ALL_CONTINENTS.iter().map(|c| c.territory_count()).sum();
        assert_eq!(total, TERRITORY_COUNT);
    }

    #[test]
    fn continent_slices_agree_with_info_table() {
        for c in ALL_CONTINENTS {
            let members = c.territories();
            assert_eq!(members.len(), c.territory_count());
            for t in members {
                assert_eq!(t.continent(), c, "{} listed under {}", t.name(), c.abbr());
            }
        }
    }

    #[test]
    fn name_roundtrip() {
        for t in ALL_TERRITORIES {
            assert_eq!(Territory::from_name(t.name()), Some(t));
        }
        assert_eq!(Territory::from_name("Atlantis"), None);
        assert_eq!(Color::from_name("Light Blue"), Some(Color::LightBlue));
        assert_eq!(Color::from_name("Purple"), None);
    }

    #[test]
    fn key_territories_are_distinct() {
        for (i, a) in KEY_TERRITORIES.iter().enumerate() {
            for b in &KEY_TERRITORIES[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(Territory::China.is_key());
        assert!(!Territory::Japan.is_key());
    }

    #[test]
    fn color_turn_order_wraps() {
        assert_eq!(Color::Red.next(), Color::LightBlue);
        assert_eq!(Color::Black.next(), Color::Red);
    }
}
