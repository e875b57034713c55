//! Engine for a small two-player game of territory conquest.
//!
//! Each player owns some of the territories on a fixed [`map::TerritoryMap`] and is
//! secretly assigned a [`mission::Mission`]. Players alternate attacking enemy
//! territories with a single die roll per side ([`combat`]) until one of them completes
//! their mission or the round limit runs out ([`game`]).
//!
//! Randomness is supplied through [`dice::RandomSource`] so games can be replayed with a
//! fixed sequence of rolls. With the `rng_gen` feature, any [`rand::Rng`] can be used
//! directly.

pub mod combat;
pub mod dice;
pub mod game;
pub mod map;
pub mod mission;

pub use crate::{
    combat::{AttackError, AttackOutcome, Rolls},
    dice::{FixedSequence, RandomSource},
    game::{CannotPlayReason, FinishReason, Game, GameStatus, Player, Rules, TurnReport},
    map::{Color, IndexError, Territory, TerritoryMap},
    mission::Mission,
};
