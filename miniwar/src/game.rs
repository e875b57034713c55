//! Turn handling for a two-player game.
//!
//! Player 1 always moves first in a round. Each turn is a single attack followed by a
//! check of the acting player's mission. Player 1 can win before player 2 acts in the
//! same round; the round limit is only checked once player 2 has moved.
use thiserror::Error;

use crate::{
    combat::{self, AttackError, AttackOutcome},
    dice::RandomSource,
    map::{Color, TerritoryMap},
    mission::{self, Mission},
};

/// Default number of full rounds before the game is declared a draw.
pub const DEFAULT_TURN_LIMIT: u32 = 20;

/// Player ID. Either `P1` or `P2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Get the army color this player commands.
    pub fn color(self) -> Color {
        match self {
            Player::P1 => Color::Blue,
            Player::P2 => Color::Red,
        }
    }

    /// Position of this player in the turn order.
    fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

/// Tunable rules for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rules {
    /// Number of full rounds played before the game ends in a draw. A value of 0 is
    /// treated as 1.
    pub turn_limit: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            turn_limit: DEFAULT_TURN_LIMIT,
        }
    }
}

/// Why the game ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FinishReason {
    /// The given player completed their mission.
    Won(Player),
    /// The round limit was reached without a winner.
    TurnLimitReached,
}

/// Current state of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the given player to take their turn.
    Awaiting(Player),
    /// The game is over.
    Finished(FinishReason),
}

/// Reason a turn could not be played at all.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlayReason {
    /// The game is already over.
    #[error("the game is already over")]
    AlreadyOver,

    /// It is the other player's turn.
    #[error("player attempted to play out of turn")]
    OutOfTurn,
}

/// Result of a turn that was played.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TurnReport {
    /// Player who took the turn.
    pub player: Player,

    /// Round in which the turn was played.
    pub round: u32,

    /// What happened to the attack. A refused attack still uses up the turn.
    pub attack: Result<AttackOutcome, AttackError>,

    /// Status of the game after the turn.
    pub status: GameStatus,
}

/// A game in progress. Owns the map for the whole game.
#[derive(Debug, Clone)]
pub struct Game {
    /// Shared map of territories.
    map: TerritoryMap,

    /// Missions for each player, indexed by turn order.
    missions: [Mission; 2],

    /// Rules this game is played with.
    rules: Rules,

    /// Current round, starting from 1.
    round: u32,

    /// Whose turn it is, or why the game ended.
    status: GameStatus,
}

impl Game {
    /// Start a game on the standard map, drawing a mission for each player from
    /// `source`, player 1 first.
    pub fn new<R: RandomSource + ?Sized>(rules: Rules, source: &mut R) -> Self {
        let missions = [source.draw_mission(), source.draw_mission()];
        Self::with_setup(TerritoryMap::standard(), missions, rules)
    }

    /// Start a game with the given map and missions. `missions` is in turn order.
    pub fn with_setup(map: TerritoryMap, missions: [Mission; 2], rules: Rules) -> Self {
        log::info!(
            "starting game: P1 mission {:?}, P2 mission {:?}, turn limit {}",
            missions[0],
            missions[1],
            rules.turn_limit
        );
        Self {
            map,
            missions,
            rules,
            round: 1,
            status: GameStatus::Awaiting(Player::P1),
        }
    }

    /// Get the map.
    pub fn map(&self) -> &TerritoryMap {
        &self.map
    }

    /// Get the mission assigned to the given player.
    pub fn mission(&self, player: Player) -> Mission {
        self.missions[player.index()]
    }

    /// Get the rules for this game.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get the current round, starting from 1. Once the game is over, this is the round
    /// in which it ended.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Get the status of the game.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get the player whose turn it is. Returns `None` if the game is over.
    pub fn current(&self) -> Option<Player> {
        match self.status {
            GameStatus::Awaiting(player) => Some(player),
            GameStatus::Finished(_) => None,
        }
    }

    /// Get the winner, if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Finished(FinishReason::Won(player)) => Some(player),
            _ => None,
        }
    }

    /// Return true if the game has ended.
    pub fn is_over(&self) -> bool {
        match self.status {
            GameStatus::Finished(_) => true,
            GameStatus::Awaiting(_) => false,
        }
    }

    /// Check whether the given player's mission is currently complete.
    pub fn mission_complete(&self, player: Player) -> bool {
        mission::is_mission_complete(self.mission(player), player.color(), &self.map)
    }

    /// Play a turn for `player`: attack from territory index `attacker` into territory
    /// index `defender`, then check the player's mission.
    ///
    /// A refused attack is reported in the [`TurnReport`] and still ends the turn.
    /// Returns `Err` without changing anything if the game is over or it is not
    /// `player`'s turn.
    pub fn play_turn<R: RandomSource + ?Sized>(
        &mut self,
        player: Player,
        attacker: usize,
        defender: usize,
        source: &mut R,
    ) -> Result<TurnReport, CannotPlayReason> {
        match self.status {
            GameStatus::Finished(_) => return Err(CannotPlayReason::AlreadyOver),
            GameStatus::Awaiting(current) if current != player => {
                return Err(CannotPlayReason::OutOfTurn)
            }
            GameStatus::Awaiting(_) => {}
        }
        let round = self.round;

        let attack = combat::attack(&mut self.map, attacker, defender, source);
        if let Err(ref err) = attack {
            log::debug!("{:?} attack {} -> {} refused: {}", player, attacker, defender, err);
        }

        self.status = if self.mission_complete(player) {
            log::info!(
                "{:?} completed mission {:?} in round {}",
                player,
                self.mission(player),
                round
            );
            GameStatus::Finished(FinishReason::Won(player))
        } else {
            match player {
                Player::P1 => GameStatus::Awaiting(Player::P2),
                Player::P2 if self.round >= self.rules.turn_limit.max(1) => {
                    log::info!("turn limit of {} rounds reached", self.rules.turn_limit);
                    GameStatus::Finished(FinishReason::TurnLimitReached)
                }
                Player::P2 => {
                    self.round += 1;
                    GameStatus::Awaiting(Player::P1)
                }
            }
        };

        Ok(TurnReport {
            player,
            round,
            attack,
            status: self.status,
        })
    }
}
