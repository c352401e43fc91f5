use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("A match needs at least one leg")]
    NoLegs,
    #[error("A best-of match needs an odd number of legs, got {0}")]
    EvenLegCount(u32),
    #[error("Games seat one or two players, got {0}")]
    InvalidPlayerCount(usize),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    #[serde(rename = "301")]
    Score301,
    #[serde(rename = "501")]
    Score501,
    #[serde(rename = "701")]
    Score701,
    Endless,
}

impl GameMode {
    /// Starting score for the countdown modes. Endless counts up instead
    /// and has no ceiling.
    pub fn starting_score(self) -> Option<u32> {
        match self {
            GameMode::Score301 => Some(301),
            GameMode::Score501 => Some(501),
            GameMode::Score701 => Some(701),
            GameMode::Endless => None,
        }
    }

    pub fn is_endless(self) -> bool {
        matches!(self, GameMode::Endless)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Score301 => write!(f, "301"),
            GameMode::Score501 => write!(f, "501"),
            GameMode::Score701 => write!(f, "701"),
            GameMode::Endless => write!(f, "Endless"),
        }
    }
}

/// How a leg may be finished. Ignored in Endless mode, which has no finish.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutRule {
    #[serde(rename = "Double Out")]
    DoubleOut,
    #[serde(rename = "Straight Out")]
    StraightOut,
}

/// Parameters fixed at game start.
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    mode: GameMode,
    out_rule: OutRule,
    total_legs: u32,
    player_count: usize,
}

impl GameConfig {
    // Enforce the following constraints:
    // - total_legs is odd and at least 1, so a best-of majority exists
    // - player_count is 1 (solo practice) or 2
    pub fn new(
        mode: GameMode,
        out_rule: OutRule,
        total_legs: u32,
        player_count: usize,
    ) -> Result<Self, ConfigError> {
        if total_legs == 0 {
            return Err(ConfigError::NoLegs);
        }
        if total_legs % 2 == 0 {
            return Err(ConfigError::EvenLegCount(total_legs));
        }
        if player_count == 0 || player_count > 2 {
            return Err(ConfigError::InvalidPlayerCount(player_count));
        }
        Ok(GameConfig {
            mode,
            out_rule,
            total_legs,
            player_count,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn out_rule(&self) -> OutRule {
        self.out_rule
    }

    pub fn total_legs(&self) -> u32 {
        self.total_legs
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Legs needed to take the match: the majority of `total_legs`.
    pub fn legs_to_win(&self) -> u32 {
        self.total_legs / 2 + 1
    }
}
