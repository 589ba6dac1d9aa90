//! Adjacency graph for the world map.
//!
//! Each entry records an undirected border between two territories. Attacks
//! and fortifications may cross any border in either direction. All data is
//! compile-time `static`; per-territory neighbor lists are built once on
//! first use.

use std::sync::LazyLock;

use super::territory::{Territory, TERRITORY_COUNT};

/// A single undirected border between two territories.
#[derive(Debug, Clone, Copy)]
pub struct Border {
    pub a: Territory,
    pub b: Territory,
}

/// Shorthand constructor (used only in table construction).
const fn border(a: Territory, b: Territory) -> Border {
    Border { a, b }
}

use Territory::*;

/// Total number of undirected borders in the table.
///
/// Breakdown:
/// - North America internal: 16
/// - South America internal: 5
/// - Europe internal: 12
/// - Africa internal: 9
/// - Asia internal: 22
/// - Australia internal: 5
/// - Intercontinental: 14
/// Total: 83
pub const BORDER_COUNT: usize = 83;

/// Complete border table.
pub static BORDERS: [Border; BORDER_COUNT] = [
    // ====================================================================
    // North America - 16
    // ====================================================================
    border(Alaska, NorthwestTerritory),
    border(Alaska, Alberta),
    border(NorthwestTerritory, Alberta),
    border(NorthwestTerritory, Ontario),
    border(NorthwestTerritory, Greenland),
    border(Greenland, Ontario),
    border(Greenland, Quebec),
    border(Alberta, Ontario),
    border(Alberta, WesternUnitedStates),
    border(Ontario, WesternUnitedStates),
    border(Ontario, EasternUnitedStates),
    border(Ontario, Quebec),
    border(Quebec, EasternUnitedStates),
    border(WesternUnitedStates, EasternUnitedStates),
    border(WesternUnitedStates, CentralAmerica),
    border(EasternUnitedStates, CentralAmerica),
    // ====================================================================
    // South America - 5
    // ====================================================================
    border(Venezuela, Peru),
    border(Venezuela, Brazil),
    border(Peru, Brazil),
    border(Peru, Argentina),
    border(Brazil, Argentina),
    // ====================================================================
    // Europe - 12
    // ====================================================================
    border(Iceland, GreatBritain),
    border(Iceland, Scandinavia),
    border(Scandinavia, GreatBritain),
    border(Scandinavia, NorthernEurope),
    border(Scandinavia, Ukraine),
    border(GreatBritain, NorthernEurope),
    border(GreatBritain, WesternEurope),
    border(NorthernEurope, Ukraine),
    border(NorthernEurope, SouthernEurope),
    border(NorthernEurope, WesternEurope),
    border(WesternEurope, SouthernEurope),
    border(SouthernEurope, Ukraine),
    // ====================================================================
    // Africa - 9
    // ====================================================================
    border(NorthAfrica, Egypt),
    border(NorthAfrica, EastAfrica),
    border(NorthAfrica, Congo),
    border(Egypt, EastAfrica),
    border(EastAfrica, Congo),
    border(EastAfrica, SouthAfrica),
    border(EastAfrica, Madagascar),
    border(Congo, SouthAfrica),
    border(SouthAfrica, Madagascar),
    // ====================================================================
    // Asia - 22
    // ====================================================================
    border(Ural, Siberia),
    border(Ural, China),
    border(Ural, Afghanistan),
    border(Siberia, Yakutsk),
    border(Siberia, Irkutsk),
    border(Siberia, Mongolia),
    border(Siberia, China),
    border(Yakutsk, Kamchatka),
    border(Yakutsk, Irkutsk),
    border(Kamchatka, Irkutsk),
    border(Kamchatka, Mongolia),
    border(Kamchatka, Japan),
    border(Irkutsk, Mongolia),
    border(Mongolia, Japan),
    border(Mongolia, China),
    border(Afghanistan, China),
    border(Afghanistan, India),
    border(Afghanistan, MiddleEast),
    border(China, Siam),
    border(China, India),
    border(MiddleEast, India),
    border(India, Siam),
    // ====================================================================
    // Australia - 5
    // ====================================================================
    border(Indonesia, NewGuinea),
    border(Indonesia, WesternAustralia),
    border(NewGuinea, EasternAustralia),
    border(NewGuinea, WesternAustralia),
    border(WesternAustralia, EasternAustralia),
    // ====================================================================
    // Intercontinental - 14
    // ====================================================================
    border(Alaska, Kamchatka),
    border(Greenland, Iceland),
    border(CentralAmerica, Venezuela),
    border(Brazil, NorthAfrica),
    border(WesternEurope, NorthAfrica),
    border(SouthernEurope, NorthAfrica),
    border(SouthernEurope, Egypt),
    border(SouthernEurope, MiddleEast),
    border(Ukraine, MiddleEast),
    border(Ukraine, Afghanistan),
    border(Ukraine, Ural),
    border(Egypt, MiddleEast),
    border(EastAfrica, MiddleEast),
    border(Siam, Indonesia),
];

/// Neighbor lists indexed by `Territory as usize`, in table order.
static NEIGHBORS: LazyLock<Vec<Vec<Territory>>> = LazyLock::new(build_neighbors);

fn build_neighbors() -> Vec<Vec<Territory>> {
    let mut lists = vec![Vec::new(); TERRITORY_COUNT];
    for b in BORDERS.iter() {
        lists[b.a as usize].push(b.b);
        lists[b.b as usize].push(b.a);
    }
    lists
}

/// Returns every territory that shares a border with `territory`.
#[inline]
pub fn neighbors(territory: Territory) -> &'static [Territory] {
    &NEIGHBORS[territory as usize]
}

/// Returns true if the two territories share a border.
#[inline]
pub fn is_adjacent(a: Territory, b: Territory) -> bool {
    neighbors(a).contains(&b)
}
