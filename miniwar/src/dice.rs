//! Sources of randomness for the game.
//!
//! The engine never reaches for a global RNG. Anything that draws dice or missions takes
//! a [`RandomSource`], which is implemented for every [`rand::Rng`] when the `rng_gen`
//! feature is enabled, and by [`FixedSequence`] for scripted play.

#[cfg(feature = "rng_gen")]
use once_cell::sync::Lazy;
#[cfg(feature = "rng_gen")]
use rand::{distributions::Uniform, Rng};

use crate::mission::Mission;

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Supplies the random values the game needs.
pub trait RandomSource {
    /// Roll one die, giving a value in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// Draw a mission uniformly from [`Mission::ALL`].
    fn draw_mission(&mut self) -> Mission;
}

/// Range of valid die faces.
#[cfg(feature = "rng_gen")]
static DIE: Lazy<Uniform<u8>> = Lazy::new(|| Uniform::new_inclusive(1, DIE_FACES));

#[cfg(feature = "rng_gen")]
impl<R: Rng + ?Sized> RandomSource for R {
    fn roll_die(&mut self) -> u8 {
        self.sample(&*DIE)
    }

    fn draw_mission(&mut self) -> Mission {
        self.gen()
    }
}

/// Replays fixed sequences of die rolls and missions, wrapping around when a sequence
/// runs out. An empty roll sequence always rolls 1 and an empty mission sequence always
/// draws the first mission in the catalog. Scripted rolls are clamped to `1..=6`.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    rolls: Vec<u8>,
    next_roll: usize,
    missions: Vec<Mission>,
    next_mission: usize,
}

impl FixedSequence {
    /// Create a sequence with the given rolls and missions. Rolls below 1 become 1 and
    /// rolls above 6 become 6.
    pub fn new<R, M>(rolls: R, missions: M) -> Self
    where
        R: IntoIterator<Item = u8>,
        M: IntoIterator<Item = Mission>,
    {
        Self {
            rolls: rolls
                .into_iter()
                .map(|roll| roll.max(1).min(DIE_FACES))
                .collect(),
            next_roll: 0,
            missions: missions.into_iter().collect(),
            next_mission: 0,
        }
    }

    /// Create a sequence that only scripts die rolls.
    pub fn rolls<R: IntoIterator<Item = u8>>(rolls: R) -> Self {
        Self::new(rolls, Vec::new())
    }

    /// Number of dice rolled so far.
    pub fn rolls_used(&self) -> usize {
        self.next_roll
    }

    /// Number of missions drawn so far.
    pub fn missions_used(&self) -> usize {
        self.next_mission
    }
}

impl RandomSource for FixedSequence {
    fn roll_die(&mut self) -> u8 {
        let roll = match self.rolls.len() {
            0 => 1,
            len => self.rolls[self.next_roll % len],
        };
        self.next_roll += 1;
        roll
    }

    fn draw_mission(&mut self) -> Mission {
        let mission = match self.missions.len() {
            0 => Mission::ALL[0],
            len => self.missions[self.next_mission % len],
        };
        self.next_mission += 1;
        mission
    }
}
