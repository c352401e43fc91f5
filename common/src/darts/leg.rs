use crate::darts::player::PlayerNum;
use crate::darts::turn::CommittedTurn;

/// One race-to-zero contest within a game. Keeps the committed turn history
/// and an explicit per-player turn counter, bumped exactly once per commit,
/// so a turn's index never has to be inferred from history lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    number: u32,
    starting_player: PlayerNum,
    turns: Vec<CommittedTurn>,
    turn_counts: [u32; 2],
    winner: Option<PlayerNum>,
}

impl Leg {
    pub(crate) fn new(number: u32, starting_player: PlayerNum) -> Self {
        Leg {
            number,
            starting_player,
            turns: Vec::new(),
            turn_counts: [0; 2],
            winner: None,
        }
    }

    /// 1-based position in the match.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn starting_player(&self) -> PlayerNum {
        self.starting_player
    }

    pub fn turns(&self) -> &[CommittedTurn] {
        &self.turns
    }

    pub fn winner(&self) -> Option<PlayerNum> {
        self.winner
    }

    /// Committed turns the player has taken in this leg.
    pub fn turns_taken(&self, player: PlayerNum) -> u32 {
        self.turn_counts[player.index()]
    }

    /// 1-based index the player's next committed turn will carry.
    pub fn next_turn_index(&self, player: PlayerNum) -> u32 {
        self.turn_counts[player.index()] + 1
    }

    pub(crate) fn commit(&mut self, turn: CommittedTurn) {
        self.turn_counts[turn.player().index()] += 1;
        self.turns.push(turn);
    }

    pub(crate) fn set_winner(&mut self, winner: PlayerNum) {
        self.winner = Some(winner);
    }
}
