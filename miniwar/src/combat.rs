//! Resolution of a single attack between two territories.
//!
//! Each side rolls one die. The attacker needs a strictly higher roll to win; ties go to
//! the defender. A winning attacker takes the territory and moves half of its troops
//! (at least one) into it. A losing attacker loses one troop.
use thiserror::Error;

use crate::{
    dice::RandomSource,
    map::{IndexError, Territory, TerritoryMap},
};

/// Reason an attack was refused. Refused attacks never change the map or roll dice.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AttackError {
    /// One of the territory indexes was not on the map.
    #[error("invalid territory indices")]
    InvalidIndex(#[source] IndexError),

    /// The attacker and defender belong to the same color.
    #[error("cannot attack a territory of your own color")]
    SameOwner,

    /// The attacking territory has 1 troop or fewer.
    #[error("more than 1 troop is needed to attack")]
    InsufficientTroops,
}

impl From<IndexError> for AttackError {
    fn from(err: IndexError) -> Self {
        AttackError::InvalidIndex(err)
    }
}

/// Die values rolled for one attack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rolls {
    /// Value rolled by the attacker.
    pub attack: u8,
    /// Value rolled by the defender.
    pub defense: u8,
}

impl Rolls {
    /// True if the attacker beat the defender. Ties favor the defender.
    pub fn attacker_wins(&self) -> bool {
        self.attack > self.defense
    }
}

/// Outcome of an attack that went ahead.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttackOutcome {
    /// The attacker won and took the defending territory, moving `moved` troops into it.
    Conquered { rolls: Rolls, moved: u32 },
    /// The defender held and the attacker lost one troop.
    Repelled { rolls: Rolls },
}

impl AttackOutcome {
    /// Get the dice rolled in this attack.
    pub fn rolls(&self) -> Rolls {
        match *self {
            AttackOutcome::Conquered { rolls, .. } | AttackOutcome::Repelled { rolls } => rolls,
        }
    }

    /// True if the attacker took the territory.
    pub fn conquered(&self) -> bool {
        match self {
            AttackOutcome::Conquered { .. } => true,
            AttackOutcome::Repelled { .. } => false,
        }
    }
}

/// Check that `attacker` is allowed to attack `defender`.
pub fn check_attack(attacker: &Territory, defender: &Territory) -> Result<(), AttackError> {
    if attacker.owner() == defender.owner() {
        Err(AttackError::SameOwner)
    } else if attacker.troops() <= 1 {
        Err(AttackError::InsufficientTroops)
    } else {
        Ok(())
    }
}

/// Have `attacker` attack `defender`, rolling dice from `source`.
pub fn resolve_attack<R: RandomSource + ?Sized>(
    attacker: &mut Territory,
    defender: &mut Territory,
    source: &mut R,
) -> Result<AttackOutcome, AttackError> {
    if let Err(err) = check_attack(attacker, defender) {
        log::debug!(
            "attack from {} on {} refused: {}",
            attacker.name(),
            defender.name(),
            err
        );
        return Err(err);
    }
    let rolls = Rolls {
        attack: source.roll_die(),
        defense: source.roll_die(),
    };
    log::debug!(
        "{} rolled {} against {} rolling {}",
        attacker.name(),
        rolls.attack,
        defender.name(),
        rolls.defense
    );

    if rolls.attacker_wins() {
        // Troops > 1 here, so at least 1 troop stays behind.
        let moved = (attacker.troops() / 2).max(1);
        defender.set_owner(attacker.owner());
        defender.set_troops(moved);
        attacker.set_troops(attacker.troops() - moved);
        log::info!(
            "{} conquered {} for {}, moving {} troops",
            attacker.name(),
            defender.name(),
            attacker.owner(),
            moved
        );
        Ok(AttackOutcome::Conquered { rolls, moved })
    } else {
        attacker.set_troops(attacker.troops() - 1);
        Ok(AttackOutcome::Repelled { rolls })
    }
}

/// Have the territory at index `attacker` attack the territory at index `defender`.
pub fn attack<R: RandomSource + ?Sized>(
    map: &mut TerritoryMap,
    attacker: usize,
    defender: usize,
    source: &mut R,
) -> Result<AttackOutcome, AttackError> {
    map.get(attacker)?;
    map.get(defender)?;
    // Both indexes are on the map, so the only way to miss a pair is a territory
    // attacking itself.
    let (attacker, defender) = map
        .pair_mut(attacker, defender)
        .ok_or(AttackError::SameOwner)?;
    resolve_attack(attacker, defender, source)
}
