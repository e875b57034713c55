//! The territories that make up the game map.

use std::{fmt, slice};

pub use self::errors::IndexError;

mod errors;

/// Number of territories on the map.
pub const TERRITORY_COUNT: usize = 5;

/// Color of the army that controls a territory. Each player plays one color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    /// Blue army, displayed as "Azul".
    Blue,
    /// Red army, displayed as "Vermelho".
    Red,
}

impl Color {
    /// Get the other color.
    pub fn rival(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Get the display name of this color.
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "Azul",
            Color::Red => "Vermelho",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A single territory on the map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Territory {
    /// Name of the territory. Never changes once the map is built.
    name: String,

    /// Color of the army holding this territory.
    owner: Color,

    /// Number of troops stationed here.
    troops: u32,
}

impl Territory {
    /// Create a territory with the given name, owner, and troop count.
    pub fn new<N: Into<String>>(name: N, owner: Color, troops: u32) -> Self {
        Self {
            name: name.into(),
            owner,
            troops,
        }
    }

    /// Get the name of this territory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the color that controls this territory.
    pub fn owner(&self) -> Color {
        self.owner
    }

    /// Get the number of troops in this territory.
    pub fn troops(&self) -> u32 {
        self.troops
    }

    /// Check if this territory is held by the given color.
    pub fn is_owned_by(&self, color: Color) -> bool {
        self.owner == color
    }

    /// Hand this territory to another color.
    pub fn set_owner(&mut self, owner: Color) {
        self.owner = owner;
    }

    /// Replace the troop count of this territory.
    pub fn set_troops(&mut self, troops: u32) {
        self.troops = troops;
    }
}

/// Fixed, ordered set of territories. Territories are addressed by their position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TerritoryMap {
    territories: [Territory; TERRITORY_COUNT],
}

impl TerritoryMap {
    /// Build a map from the given territories, in map order.
    pub fn new(territories: [Territory; TERRITORY_COUNT]) -> Self {
        Self { territories }
    }

    /// Build the standard starting map.
    pub fn standard() -> Self {
        Self::new([
            Territory::new("Alaska", Color::Blue, 3),
            Territory::new("Canada", Color::Blue, 2),
            Territory::new("Brasil", Color::Red, 4),
            Territory::new("Argentina", Color::Red, 2),
            Territory::new("Groenlandia", Color::Blue, 1),
        ])
    }

    /// Number of territories in the map.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    /// Always false; the map has a fixed, nonzero number of territories.
    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Get the territory at the given index.
    pub fn get(&self, index: usize) -> Result<&Territory, IndexError> {
        self.territories
            .get(index)
            .ok_or_else(|| IndexError::new(index, self.len()))
    }

    /// Apply an update to the territory at the given index, returning whatever the
    /// update returns.
    pub fn mutate<F, T>(&mut self, index: usize, update: F) -> Result<T, IndexError>
    where
        F: FnOnce(&mut Territory) -> T,
    {
        let len = self.len();
        self.territories
            .get_mut(index)
            .map(update)
            .ok_or_else(|| IndexError::new(index, len))
    }

    /// Get mutable references to two different territories at once. Returns `None` if
    /// the indexes are equal or either is out of bounds.
    pub fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Option<(&mut Territory, &mut Territory)> {
        let len = self.len();
        if first == second || first >= len || second >= len {
            return None;
        }
        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            Some((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            Some((&mut tail[0], &mut head[second]))
        }
    }

    /// Iterate the territories in map order.
    pub fn iter(&self) -> slice::Iter<Territory> {
        self.territories.iter()
    }

    /// Find the first territory with the given name.
    pub fn find(&self, name: &str) -> Option<&Territory> {
        self.iter().find(|territory| territory.name() == name)
    }

    /// Total troops across all territories held by the given color. Zero if the color
    /// holds nothing. Summed as `u64` so that no troop counts can overflow it.
    pub fn troops_of(&self, color: Color) -> u64 {
        self.iter()
            .filter(|territory| territory.is_owned_by(color))
            .map(|territory| u64::from(territory.troops()))
            .sum()
    }

    /// Number of territories held by the given color.
    pub fn territories_of(&self, color: Color) -> usize {
        self.iter()
            .filter(|territory| territory.is_owned_by(color))
            .count()
    }
}

impl Default for TerritoryMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a TerritoryMap {
    type Item = &'a Territory;
    type IntoIter = slice::Iter<'a, Territory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
