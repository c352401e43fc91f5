use crate::darts::{GameMode, OutRule, Player, PlayerNum, RawThrow, Throw};
use serde::{Deserialize, Serialize};

/// Game parameters as entered on the setup screen.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GameSetup {
    pub mode: GameMode,
    pub out_rule: OutRule,
    pub total_legs: u32,
    pub players: Vec<String>,
}

/// Commands a scoreboard client sends over the socket.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Command {
    NewGame(GameSetup),
    Throw(RawThrow),
    Undo,
    Reset,
    CompleteTurn,
}

/// Live scoreboard snapshot sent after every command.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StateResponse {
    pub players: Vec<Player>,
    pub active: PlayerNum,
    pub darts: Vec<Throw>,
    pub leg_number: u32,
    pub checkout: Option<String>,
    pub game_over: bool,
}

/// Server-to-client notifications.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Response {
    State(StateResponse),
    Bust { player: PlayerNum },
    LegWon { winner: PlayerNum, legs_won: u32 },
    GameWon { winner: PlayerNum },
    Error { message: String },
    SaveFailed { message: String },
}
