use crate::darts::player::PlayerNum;
use crate::darts::throw::Throw;
use serde::{Deserialize, Serialize};

/// Maximum darts in one turn.
pub const TURN_DARTS: usize = 3;

/// The active player's in-progress turn. Holds at most three throws and
/// remembers the score the player had when the turn began, which is what a
/// bust or a reset restores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTurn {
    throws: Vec<Throw>,
    start_score: u32,
}

impl OpenTurn {
    pub fn new(start_score: u32) -> Self {
        OpenTurn {
            throws: Vec::with_capacity(TURN_DARTS),
            start_score,
        }
    }

    pub fn throws(&self) -> &[Throw] {
        &self.throws
    }

    pub fn len(&self) -> usize {
        self.throws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throws.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.throws.len() == TURN_DARTS
    }

    /// Score the player had before the first dart of this turn.
    pub fn start_score(&self) -> u32 {
        self.start_score
    }

    pub fn total(&self) -> u32 {
        self.throws.iter().map(Throw::score).sum()
    }

    // Callers check is_full first; the bound is a turn invariant.
    pub(crate) fn push(&mut self, throw: Throw) {
        debug_assert!(self.throws.len() < TURN_DARTS);
        self.throws.push(throw);
    }

    pub(crate) fn undo(&mut self) -> Option<Throw> {
        self.throws.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.throws.clear();
    }

    pub(crate) fn take_throws(&mut self) -> Vec<Throw> {
        std::mem::take(&mut self.throws)
    }
}

/// A closed turn, immutable once committed. A busted turn keeps its throws
/// for the record but contributes no score.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommittedTurn {
    player: PlayerNum,
    throws: Vec<Throw>,
    busted: bool,
}

impl CommittedTurn {
    pub(crate) fn new(player: PlayerNum, throws: Vec<Throw>, busted: bool) -> Self {
        CommittedTurn {
            player,
            throws,
            busted,
        }
    }

    pub fn player(&self) -> PlayerNum {
        self.player
    }

    pub fn throws(&self) -> &[Throw] {
        &self.throws
    }

    pub fn busted(&self) -> bool {
        self.busted
    }

    /// The turn's effect on the score: zero when busted.
    pub fn scored(&self) -> u32 {
        if self.busted {
            0
        } else {
            self.throws.iter().map(Throw::score).sum()
        }
    }
}
