mod checkout;
mod config;
mod game;
mod leg;
mod player;
mod throw;
mod turn;

pub use checkout::checkout_suggestion;
pub use config::{ConfigError, GameConfig, GameMode, OutRule};
pub use game::{GameError, GameSession, LegAdvance, ThrowOutcome};
pub use leg::Leg;
pub use player::{Player, PlayerId, PlayerNum, Players};
pub use throw::{Multiplier, RawThrow, Throw, ThrowError, BULL, MAX_SEGMENT};
pub use turn::{CommittedTurn, OpenTurn, TURN_DARTS};
