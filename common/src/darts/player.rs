use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Store-issued player identifier.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerNum {
    P1,
    P2,
}

impl PlayerNum {
    pub fn other(self) -> PlayerNum {
        match self {
            PlayerNum::P1 => PlayerNum::P2,
            PlayerNum::P2 => PlayerNum::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerNum::P1 => 0,
            PlayerNum::P2 => 1,
        }
    }
}

/// One participant's live scoring state. `score` is the remaining score in
/// the countdown modes and the running total in Endless mode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    score: u32,
    legs_won: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: String, starting_score: u32) -> Self {
        Player {
            id,
            name,
            score: starting_score,
            legs_won: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn legs_won(&self) -> u32 {
        self.legs_won
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub(crate) fn win_leg(&mut self) {
        self.legs_won += 1;
    }
}

/// The seats at the board, in throwing order for leg 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Players(Vec<Player>);

impl Players {
    pub(crate) fn new(players: Vec<Player>) -> Self {
        Players(players)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.0.iter_mut()
    }

    /// Seat that throws after `num`, round-robin. Solo games stay on P1.
    pub fn next_after(&self, num: PlayerNum) -> PlayerNum {
        if self.0.len() < 2 {
            PlayerNum::P1
        } else {
            num.other()
        }
    }
}

impl Index<PlayerNum> for Players {
    type Output = Player;
    fn index(&self, index: PlayerNum) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<PlayerNum> for Players {
    fn index_mut(&mut self, index: PlayerNum) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
