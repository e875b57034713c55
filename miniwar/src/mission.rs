//! Secret missions that decide who wins.
use std::fmt;

#[cfg(feature = "rng_gen")]
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::map::{Color, TerritoryMap};

/// Name of the territory that must be fortified for [`Mission::FortifyBrasil`].
const FORTIFY_TARGET: &str = "Brasil";

/// Troops needed in [`FORTIFY_TARGET`] to complete [`Mission::FortifyBrasil`].
const FORTIFY_TROOPS: u32 = 5;

/// Territories that must both be held for [`Mission::ConquerAlaskaAndArgentina`].
const CONQUEST_TARGETS: [&str; 2] = ["Alaska", "Argentina"];

/// Victory condition assigned to a player at the start of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mission {
    /// Hold the first three territories on the map.
    ConquerFirstThree,
    /// Leave the red army with no troops.
    EliminateRed,
    /// Leave the blue army with no troops.
    EliminateBlue,
    /// Hold Brasil with at least 5 troops.
    FortifyBrasil,
    /// Hold both Alaska and Argentina.
    ConquerAlaskaAndArgentina,
}

impl Mission {
    /// Every mission in the catalog, in canonical order.
    pub const ALL: &'static [Mission] = &[
        Mission::ConquerFirstThree,
        Mission::EliminateRed,
        Mission::EliminateBlue,
        Mission::FortifyBrasil,
        Mission::ConquerAlaskaAndArgentina,
    ];

    /// Text shown to the player for this mission.
    pub fn description(self) -> &'static str {
        match self {
            Mission::ConquerFirstThree => "Conquer 3 territories (the first 3 on the map)",
            Mission::EliminateRed => "Eliminate every troop of the red army (Vermelho)",
            Mission::EliminateBlue => "Eliminate every troop of the blue army (Azul)",
            Mission::FortifyBrasil => "Hold 5 troops in the territory 'Brasil'",
            Mission::ConquerAlaskaAndArgentina => {
                "Conquer the territories 'Alaska' and 'Argentina'"
            }
        }
    }

    /// Check whether this mission is complete for the player of the given color.
    pub fn is_complete(self, color: Color, map: &TerritoryMap) -> bool {
        match self {
            Mission::ConquerFirstThree => map.iter().take(3).all(|t| t.is_owned_by(color)),
            Mission::EliminateRed => map.troops_of(Color::Red) == 0,
            Mission::EliminateBlue => map.troops_of(Color::Blue) == 0,
            Mission::FortifyBrasil => match map.find(FORTIFY_TARGET) {
                Some(t) => t.is_owned_by(color) && t.troops() >= FORTIFY_TROOPS,
                None => false,
            },
            Mission::ConquerAlaskaAndArgentina => CONQUEST_TARGETS
                .iter()
                .all(|name| map.find(name).map_or(false, |t| t.is_owned_by(color))),
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.description())
    }
}

#[cfg(feature = "rng_gen")]
impl Distribution<Mission> for Standard {
    /// Draws uniformly from [`Mission::ALL`].
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Mission {
        Mission::ALL[rng.gen_range(0, Mission::ALL.len())]
    }
}

/// Check whether `mission` is complete for the player of color `color` on `map`.
pub fn is_mission_complete(mission: Mission, color: Color, map: &TerritoryMap) -> bool {
    let complete = mission.is_complete(color, map);
    if complete {
        log::debug!("mission {:?} complete for {}", mission, color);
    }
    complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Territory;

    fn map_of(layout: [(&str, Color, u32); 5]) -> TerritoryMap {
        let [a, b, c, d, e] = layout;
        TerritoryMap::new([
            Territory::new(a.0, a.1, a.2),
            Territory::new(b.0, b.1, b.2),
            Territory::new(c.0, c.1, c.2),
            Territory::new(d.0, d.1, d.2),
            Territory::new(e.0, e.1, e.2),
        ])
    }

    #[test]
    fn catalog_is_complete_and_distinct() {
        assert_eq!(Mission::ALL.len(), 5);
        for (i, a) in Mission::ALL.iter().enumerate() {
            for b in &Mission::ALL[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.description(), b.description());
            }
        }
    }

    #[test]
    fn no_mission_complete_on_standard_map() {
        let map = TerritoryMap::standard();
        for &mission in Mission::ALL {
            assert!(!mission.is_complete(Color::Blue, &map), "{:?}", mission);
            assert!(!mission.is_complete(Color::Red, &map), "{:?}", mission);
        }
    }

    #[test]
    fn first_three_requires_all_three() {
        let mut map = TerritoryMap::standard();
        map.mutate(2, |t| t.set_owner(Color::Blue)).unwrap();
        assert!(Mission::ConquerFirstThree.is_complete(Color::Blue, &map));
        assert!(!Mission::ConquerFirstThree.is_complete(Color::Red, &map));
        map.mutate(0, |t| t.set_owner(Color::Red)).unwrap();
        assert!(!Mission::ConquerFirstThree.is_complete(Color::Blue, &map));
    }

    #[test]
    fn eliminate_red_when_red_holds_nothing() {
        let map = map_of([
            ("Alaska", Color::Blue, 1),
            ("Canada", Color::Blue, 1),
            ("Brasil", Color::Blue, 1),
            ("Argentina", Color::Blue, 1),
            ("Groenlandia", Color::Blue, 1),
        ]);
        assert!(Mission::EliminateRed.is_complete(Color::Blue, &map));
        // The color named by the mission is fixed, not relative to the player.
        assert!(Mission::EliminateRed.is_complete(Color::Red, &map));
        assert!(!Mission::EliminateBlue.is_complete(Color::Red, &map));
    }

    #[test]
    fn eliminate_counts_troops_not_territories() {
        let map = map_of([
            ("Alaska", Color::Blue, 3),
            ("Canada", Color::Blue, 2),
            ("Brasil", Color::Red, 0),
            ("Argentina", Color::Red, 0),
            ("Groenlandia", Color::Blue, 1),
        ]);
        assert!(Mission::EliminateRed.is_complete(Color::Blue, &map));
        assert!(!Mission::EliminateBlue.is_complete(Color::Red, &map));
    }

    #[test]
    fn eliminate_with_huge_armies() {
        let map = map_of([
            ("Alaska", Color::Blue, 3),
            ("Canada", Color::Blue, 2),
            ("Brasil", Color::Red, 1 << 31),
            ("Argentina", Color::Red, 1 << 31),
            ("Groenlandia", Color::Blue, 1),
        ]);
        assert!(!Mission::EliminateRed.is_complete(Color::Blue, &map));
        assert!(!is_mission_complete(Mission::EliminateRed, Color::Blue, &map));
    }

    #[test]
    fn fortify_brasil_needs_owner_and_troops() {
        let mut map = TerritoryMap::standard();
        map.mutate(2, |t| t.set_troops(5)).unwrap();
        assert!(Mission::FortifyBrasil.is_complete(Color::Red, &map));
        // Enough troops, but held by the other color.
        assert!(!Mission::FortifyBrasil.is_complete(Color::Blue, &map));
        map.mutate(2, |t| t.set_troops(4)).unwrap();
        assert!(!Mission::FortifyBrasil.is_complete(Color::Red, &map));
    }

    #[test]
    fn fortify_brasil_missing_territory() {
        let map = map_of([
            ("Alaska", Color::Blue, 9),
            ("Canada", Color::Blue, 9),
            ("Peru", Color::Blue, 9),
            ("Argentina", Color::Red, 9),
            ("Groenlandia", Color::Blue, 9),
        ]);
        assert!(!Mission::FortifyBrasil.is_complete(Color::Blue, &map));
        assert!(!Mission::FortifyBrasil.is_complete(Color::Red, &map));
    }

    #[test]
    fn alaska_and_argentina() {
        let mut map = TerritoryMap::standard();
        assert!(!Mission::ConquerAlaskaAndArgentina.is_complete(Color::Blue, &map));
        map.mutate(3, |t| t.set_owner(Color::Blue)).unwrap();
        assert!(Mission::ConquerAlaskaAndArgentina.is_complete(Color::Blue, &map));
        map.mutate(0, |t| t.set_owner(Color::Red)).unwrap();
        assert!(!Mission::ConquerAlaskaAndArgentina.is_complete(Color::Blue, &map));
        assert!(!Mission::ConquerAlaskaAndArgentina.is_complete(Color::Red, &map));
    }

    #[test]
    fn alaska_and_argentina_found_by_name() {
        let map = map_of([
            ("Argentina", Color::Red, 1),
            ("Canada", Color::Blue, 1),
            ("Brasil", Color::Blue, 1),
            ("Alaska", Color::Red, 1),
            ("Groenlandia", Color::Blue, 1),
        ]);
        assert!(Mission::ConquerAlaskaAndArgentina.is_complete(Color::Red, &map));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let mut map = TerritoryMap::standard();
        map.mutate(2, |t| t.set_owner(Color::Blue)).unwrap();
        for &mission in Mission::ALL {
            let first = is_mission_complete(mission, Color::Blue, &map);
            let second = is_mission_complete(mission, Color::Blue, &map);
            assert_eq!(first, second);
        }
    }
}
