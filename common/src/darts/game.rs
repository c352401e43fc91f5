use crate::darts::checkout;
use crate::darts::config::{GameConfig, OutRule};
use crate::darts::leg::Leg;
use crate::darts::player::{Player, PlayerId, PlayerNum, Players};
use crate::darts::throw::{RawThrow, Throw, ThrowError};
use crate::darts::turn::{CommittedTurn, OpenTurn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    InvalidThrow(#[from] ThrowError),
    #[error("Expected {expected} players, got {got}")]
    PlayerCountMismatch { expected: usize, got: usize },
    #[error("The current turn already has its three darts")]
    TurnFull,
    #[error("Cannot complete a turn before any dart is thrown")]
    EmptyTurn,
    #[error("The game is already over")]
    GameOver,
}

/// What follows a leg win.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LegAdvance {
    /// A fresh leg was racked: scores reset, the loser throws first.
    NextLeg { starting_player: PlayerNum },
    /// The win put its scorer over the majority line; the game is over.
    GameWon,
}

/// What a single applied dart did to the game.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThrowOutcome {
    /// The dart scored. `turn_complete` is set when it was the third dart
    /// and the turn auto-closed.
    Accepted { turn_complete: bool },
    /// The turn would have left an unfinishable score. All of its throws
    /// were voided and the next player is up.
    Bust,
    /// The dart finished the leg.
    LegWon { winner: PlayerNum, next: LegAdvance },
}

/// A full match: configuration, seats, leg history, and the single open
/// turn. Every operation takes and returns state through this value; there
/// is no ambient game state anywhere else.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    players: Players,
    past_legs: Vec<Leg>,
    leg: Leg,
    active: PlayerNum,
    open_turn: OpenTurn,
    winner: Option<PlayerNum>,
}

impl GameSession {
    pub fn new(config: GameConfig, seats: Vec<(PlayerId, String)>) -> Result<Self, GameError> {
        if seats.len() != config.player_count() {
            return Err(GameError::PlayerCountMismatch {
                expected: config.player_count(),
                got: seats.len(),
            });
        }
        let start = config.mode().starting_score().unwrap_or(0);
        let players = Players::new(
            seats
                .into_iter()
                .map(|(id, name)| Player::new(id, name, start))
                .collect(),
        );
        Ok(GameSession {
            config,
            players,
            past_legs: Vec::new(),
            leg: Leg::new(1, PlayerNum::P1),
            active: PlayerNum::P1,
            open_turn: OpenTurn::new(start),
            winner: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn player(&self, num: PlayerNum) -> &Player {
        &self.players[num]
    }

    pub fn active_player(&self) -> PlayerNum {
        self.active
    }

    pub fn open_turn(&self) -> &OpenTurn {
        &self.open_turn
    }

    pub fn current_leg(&self) -> &Leg {
        &self.leg
    }

    pub fn finished_legs(&self) -> &[Leg] {
        &self.past_legs
    }

    pub fn winner(&self) -> Option<PlayerNum> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The most recently committed turn, wherever it landed. After a leg
    /// win the turn lives in the just-finished leg.
    pub fn last_committed_turn(&self) -> Option<&CommittedTurn> {
        self.leg
            .turns()
            .last()
            .or_else(|| self.past_legs.last().and_then(|leg| leg.turns().last()))
    }

    /// Advisory finishing combination for the active player's remaining
    /// score. Endless mode has nothing to finish.
    pub fn checkout_suggestion(&self) -> Option<&'static str> {
        if self.config.mode().is_endless() {
            return None;
        }
        checkout::checkout_suggestion(self.players[self.active].score())
    }

    /// Score one dart for the active player.
    pub fn apply_throw(&mut self, raw: RawThrow) -> Result<ThrowOutcome, GameError> {
        self.ensure_in_play()?;
        let throw = Throw::new(raw)?;
        if self.open_turn.is_full() {
            return Err(GameError::TurnFull);
        }
        self.open_turn.push(throw);

        if self.config.mode().is_endless() {
            return Ok(self.score_endless(throw));
        }

        let remaining = self.players[self.active].score();
        let tentative = i64::from(remaining) - i64::from(throw.score());

        if tentative == 0 && self.finishes(throw) {
            return Ok(self.win_leg());
        }
        if self.is_bust(tentative, throw) {
            let start = self.open_turn.start_score();
            self.players[self.active].set_score(start);
            self.commit_turn(true);
            self.advance_turn();
            return Ok(ThrowOutcome::Bust);
        }

        self.players[self.active].set_score(tentative as u32);
        Ok(self.close_if_full())
    }

    /// Take back the most recent dart of the still-open turn. Committed
    /// turns are history; once a turn closes there is nothing to undo.
    pub fn undo_last_throw(&mut self) -> Result<Option<Throw>, GameError> {
        self.ensure_in_play()?;
        let Some(throw) = self.open_turn.undo() else {
            return Ok(None);
        };
        let score = self.players[self.active].score();
        let restored = if self.config.mode().is_endless() {
            score - throw.score()
        } else {
            score + throw.score()
        };
        self.players[self.active].set_score(restored);
        Ok(Some(throw))
    }

    /// Throw away every dart of the open turn and restore the score the
    /// player had when the turn began.
    pub fn reset_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_play()?;
        let start = self.open_turn.start_score();
        self.players[self.active].set_score(start);
        self.open_turn.clear();
        Ok(())
    }

    /// Close the open turn early, before the third dart.
    pub fn complete_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_play()?;
        if self.open_turn.is_empty() {
            return Err(GameError::EmptyTurn);
        }
        self.commit_turn(false);
        self.advance_turn();
        Ok(())
    }

    fn ensure_in_play(&self) -> Result<(), GameError> {
        if self.winner.is_some() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn finishes(&self, throw: Throw) -> bool {
        match self.config.out_rule() {
            OutRule::StraightOut => true,
            OutRule::DoubleOut => throw.is_double(),
        }
    }

    // A score of exactly 1 is unfinishable under Double Out and busts
    // uniformly under Straight Out as well. Landing on 0 without the
    // required double is equally unfinishable and busts too.
    fn is_bust(&self, tentative: i64, throw: Throw) -> bool {
        tentative < 0 || tentative == 1 || (tentative == 0 && !self.finishes(throw))
    }

    fn score_endless(&mut self, throw: Throw) -> ThrowOutcome {
        let total = self.players[self.active].score() + throw.score();
        self.players[self.active].set_score(total);
        self.close_if_full()
    }

    fn close_if_full(&mut self) -> ThrowOutcome {
        if self.open_turn.is_full() {
            self.commit_turn(false);
            self.advance_turn();
            ThrowOutcome::Accepted {
                turn_complete: true,
            }
        } else {
            ThrowOutcome::Accepted {
                turn_complete: false,
            }
        }
    }

    fn win_leg(&mut self) -> ThrowOutcome {
        let winner = self.active;
        self.players[winner].set_score(0);
        self.players[winner].win_leg();
        self.commit_turn(false);
        self.leg.set_winner(winner);

        if self.players[winner].legs_won() >= self.config.legs_to_win() {
            self.winner = Some(winner);
            return ThrowOutcome::LegWon {
                winner,
                next: LegAdvance::GameWon,
            };
        }

        let starting_player = self.players.next_after(winner);
        self.start_next_leg(starting_player);
        ThrowOutcome::LegWon {
            winner,
            next: LegAdvance::NextLeg { starting_player },
        }
    }

    fn start_next_leg(&mut self, starting_player: PlayerNum) {
        let start = self.config.mode().starting_score().unwrap_or(0);
        for player in self.players.iter_mut() {
            player.set_score(start);
        }
        let number = self.leg.number() + 1;
        let finished = std::mem::replace(&mut self.leg, Leg::new(number, starting_player));
        self.past_legs.push(finished);
        self.active = starting_player;
        self.open_turn = OpenTurn::new(start);
    }

    fn commit_turn(&mut self, busted: bool) {
        let throws = self.open_turn.take_throws();
        self.leg
            .commit(CommittedTurn::new(self.active, throws, busted));
    }

    fn advance_turn(&mut self) {
        self.active = self.players.next_after(self.active);
        self.open_turn = OpenTurn::new(self.players[self.active].score());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::darts::config::GameMode;

    fn raw(base_value: u8, multiplier: u8) -> RawThrow {
        RawThrow {
            base_value,
            multiplier,
        }
    }

    fn session(mode: GameMode, out_rule: OutRule, total_legs: u32, players: usize) -> GameSession {
        let config = GameConfig::new(mode, out_rule, total_legs, players).unwrap();
        let seats = (0..players)
            .map(|i| (PlayerId(i as u64 + 1), format!("Player {}", i + 1)))
            .collect();
        GameSession::new(config, seats).unwrap()
    }

    fn apply(session: &mut GameSession, darts: &[(u8, u8)]) -> ThrowOutcome {
        let mut outcome = ThrowOutcome::Accepted {
            turn_complete: false,
        };
        for &(base, multiplier) in darts {
            outcome = session.apply_throw(raw(base, multiplier)).unwrap();
        }
        outcome
    }

    #[test]
    fn test_seat_count_must_match_config() {
        let config = GameConfig::new(GameMode::Score501, OutRule::DoubleOut, 3, 2).unwrap();
        let result = GameSession::new(config, vec![(PlayerId(1), "Solo".to_string())]);
        assert_eq!(
            result.unwrap_err(),
            GameError::PlayerCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_three_triples_close_the_turn() {
        // 501, Double Out: T20 T20 T19 leaves 324 and auto-closes the turn
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 1);
        assert_eq!(
            apply(&mut game, &[(20, 3), (20, 3)]),
            ThrowOutcome::Accepted {
                turn_complete: false
            }
        );
        let outcome = game.apply_throw(raw(19, 3)).unwrap();
        assert_eq!(
            outcome,
            ThrowOutcome::Accepted {
                turn_complete: true
            }
        );
        assert_eq!(game.player(PlayerNum::P1).score(), 324);
        assert!(game.open_turn().is_empty());
        assert_eq!(game.current_leg().turns_taken(PlayerNum::P1), 1);
    }

    #[test]
    fn test_double_out_win_on_double_twenty() {
        // Bring a solo 301 down to 40, then finish with D20
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(20, 3), (19, 1), (1, 2)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 40);

        let outcome = game.apply_throw(raw(20, 2)).unwrap();
        assert_eq!(
            outcome,
            ThrowOutcome::LegWon {
                winner: PlayerNum::P1,
                next: LegAdvance::GameWon,
            }
        );
        assert_eq!(game.player(PlayerNum::P1).score(), 0);
        assert_eq!(game.player(PlayerNum::P1).legs_won(), 1);
        assert_eq!(game.winner(), Some(PlayerNum::P1));
    }

    #[test]
    fn test_bust_below_zero_restores_turn_start() {
        // Reach 2 remaining, then throw a single 3
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(20, 3), (19, 3), (2, 1)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 2);

        let outcome = game.apply_throw(raw(3, 1)).unwrap();
        assert_eq!(outcome, ThrowOutcome::Bust);
        assert_eq!(game.player(PlayerNum::P1).score(), 2);
        assert!(game.open_turn().is_empty());

        let busted = game.current_leg().turns().last().unwrap();
        assert!(busted.busted());
        assert_eq!(busted.scored(), 0);
    }

    #[test]
    fn test_bust_restores_turn_start_not_previous_dart() {
        // The whole turn is voided, including darts that landed before the
        // one that busted
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 121);

        apply(&mut game, &[(20, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 61);

        // 61 - 60 leaves the unfinishable 1: the bust restores 121, not 61
        let outcome = apply(&mut game, &[(20, 3)]);
        assert_eq!(outcome, ThrowOutcome::Bust);
        assert_eq!(game.player(PlayerNum::P1).score(), 121);
    }

    #[test]
    fn test_score_of_one_busts_under_both_out_rules() {
        for out_rule in [OutRule::DoubleOut, OutRule::StraightOut] {
            let mut game = session(GameMode::Score301, out_rule, 1, 1);
            apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
            let outcome = apply(&mut game, &[(20, 3), (20, 3)]);
            assert_eq!(outcome, ThrowOutcome::Bust, "{:?}", out_rule);
            assert_eq!(game.player(PlayerNum::P1).score(), 121);
            assert!(game.open_turn().is_empty());
        }
    }

    #[test]
    fn test_double_out_rejects_single_dart_finish() {
        // Landing on exactly 0 without a double busts under Double Out
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(20, 3), (19, 1), (1, 2)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 40);

        apply(&mut game, &[(20, 1)]);
        let outcome = apply(&mut game, &[(20, 1)]);
        assert_eq!(outcome, ThrowOutcome::Bust);
        assert_eq!(game.player(PlayerNum::P1).score(), 40);
    }

    #[test]
    fn test_straight_out_finishes_on_any_dart() {
        let mut game = session(GameMode::Score301, OutRule::StraightOut, 1, 1);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(20, 3), (19, 1), (1, 2)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 40);

        apply(&mut game, &[(20, 1)]);
        let outcome = apply(&mut game, &[(20, 1)]);
        assert_eq!(
            outcome,
            ThrowOutcome::LegWon {
                winner: PlayerNum::P1,
                next: LegAdvance::GameWon,
            }
        );
    }

    #[test]
    fn test_malformed_throw_is_rejected_without_mutation() {
        let mut game = session(GameMode::Score301, OutRule::StraightOut, 1, 1);
        let result = game.apply_throw(raw(32, 1));
        assert_eq!(
            result,
            Err(GameError::InvalidThrow(ThrowError::InvalidSegment(32)))
        );
        assert_eq!(game.player(PlayerNum::P1).score(), 301);
        assert!(game.open_turn().is_empty());
    }

    #[test]
    fn test_turn_order_alternates_between_players() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 2);
        assert_eq!(game.active_player(), PlayerNum::P1);
        apply(&mut game, &[(20, 1), (20, 1), (20, 1)]);
        assert_eq!(game.active_player(), PlayerNum::P2);
        apply(&mut game, &[(5, 1), (5, 1), (5, 1)]);
        assert_eq!(game.active_player(), PlayerNum::P1);

        assert_eq!(game.player(PlayerNum::P1).score(), 441);
        assert_eq!(game.player(PlayerNum::P2).score(), 486);
    }

    #[test]
    fn test_bust_ends_turn_and_advances() {
        let mut game = session(GameMode::Score301, OutRule::StraightOut, 1, 2);
        // P1 down to 2, P2 fills a turn, then P1 busts on the first dart
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        apply(&mut game, &[(20, 3), (19, 3), (2, 1)]);
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 2);

        let outcome = game.apply_throw(raw(5, 1)).unwrap();
        assert_eq!(outcome, ThrowOutcome::Bust);
        // One dart was enough to end the turn
        assert_eq!(game.active_player(), PlayerNum::P2);
    }

    #[test]
    fn test_leg_advance_resets_scores_and_loser_starts() {
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 3, 2);
        // P1 wins the first leg
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        let outcome = apply(&mut game, &[(20, 3), (19, 3), (2, 2)]);
        assert_eq!(
            outcome,
            ThrowOutcome::LegWon {
                winner: PlayerNum::P1,
                next: LegAdvance::NextLeg {
                    starting_player: PlayerNum::P2
                },
            }
        );

        assert_eq!(game.player(PlayerNum::P1).legs_won(), 1);
        assert_eq!(game.player(PlayerNum::P1).score(), 301);
        assert_eq!(game.player(PlayerNum::P2).score(), 301);
        assert_eq!(game.current_leg().number(), 2);
        assert_eq!(game.current_leg().starting_player(), PlayerNum::P2);
        assert_eq!(game.active_player(), PlayerNum::P2);
        assert_eq!(game.finished_legs().len(), 1);
        assert_eq!(game.finished_legs()[0].winner(), Some(PlayerNum::P1));
        assert!(!game.is_over());
    }

    #[test]
    fn test_game_won_at_leg_majority() {
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 3, 2);
        // P1 takes leg 1
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        apply(&mut game, &[(20, 3), (19, 3), (2, 2)]);
        // Leg 2 starts with P2
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        apply(&mut game, &[(1, 1), (1, 1), (1, 1)]);
        let outcome = apply(&mut game, &[(20, 3), (19, 3), (2, 2)]);

        assert_eq!(
            outcome,
            ThrowOutcome::LegWon {
                winner: PlayerNum::P1,
                next: LegAdvance::GameWon,
            }
        );
        assert_eq!(game.player(PlayerNum::P1).legs_won(), 2);
        assert_eq!(game.winner(), Some(PlayerNum::P1));

        // Terminal-state misuse is an invalid operation, not a bust
        assert_eq!(game.apply_throw(raw(1, 1)), Err(GameError::GameOver));
        assert_eq!(game.undo_last_throw(), Err(GameError::GameOver));
        assert_eq!(game.reset_turn(), Err(GameError::GameOver));
        assert_eq!(game.complete_turn(), Err(GameError::GameOver));
    }

    #[test]
    fn test_undo_roundtrip_reproduces_state() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 441);

        let undone = game.undo_last_throw().unwrap().unwrap();
        assert_eq!(undone.score(), 60);
        assert_eq!(game.player(PlayerNum::P1).score(), 501);
        assert!(game.open_turn().is_empty());

        // Re-applying the same dart lands back on the pre-undo state
        apply(&mut game, &[(20, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 441);
        assert_eq!(game.open_turn().len(), 1);
    }

    #[test]
    fn test_undo_on_empty_turn_is_a_noop() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 1);
        assert_eq!(game.undo_last_throw(), Ok(None));
        assert_eq!(game.player(PlayerNum::P1).score(), 501);
    }

    #[test]
    fn test_undo_does_not_cross_a_committed_turn() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 1), (20, 1), (20, 1)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 441);

        // The turn committed; there is nothing in the new open turn to undo
        assert_eq!(game.undo_last_throw(), Ok(None));
        assert_eq!(game.player(PlayerNum::P1).score(), 441);
    }

    #[test]
    fn test_reset_turn_restores_turn_start() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 1);
        apply(&mut game, &[(20, 3), (19, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 384);

        game.reset_turn().unwrap();
        assert_eq!(game.player(PlayerNum::P1).score(), 501);
        assert!(game.open_turn().is_empty());
    }

    #[test]
    fn test_complete_turn_early() {
        let mut game = session(GameMode::Score501, OutRule::DoubleOut, 1, 2);
        assert_eq!(game.complete_turn(), Err(GameError::EmptyTurn));

        apply(&mut game, &[(20, 1)]);
        game.complete_turn().unwrap();
        assert_eq!(game.active_player(), PlayerNum::P2);
        assert_eq!(game.player(PlayerNum::P1).score(), 481);

        let committed = game.current_leg().turns().last().unwrap();
        assert_eq!(committed.throws().len(), 1);
        assert!(!committed.busted());
    }

    #[test]
    fn test_endless_counts_up_and_never_ends() {
        let mut game = session(GameMode::Endless, OutRule::DoubleOut, 1, 1);
        assert_eq!(game.player(PlayerNum::P1).score(), 0);

        let outcome = apply(&mut game, &[(20, 3), (25, 2), (0, 1)]);
        assert_eq!(
            outcome,
            ThrowOutcome::Accepted {
                turn_complete: true
            }
        );
        assert_eq!(game.player(PlayerNum::P1).score(), 110);

        apply(&mut game, &[(20, 1)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 130);
        assert!(game.checkout_suggestion().is_none());
        assert!(!game.is_over());
    }

    #[test]
    fn test_endless_undo_and_alternation() {
        let mut game = session(GameMode::Endless, OutRule::DoubleOut, 1, 2);
        apply(&mut game, &[(20, 3)]);
        assert_eq!(game.player(PlayerNum::P1).score(), 60);

        game.undo_last_throw().unwrap();
        assert_eq!(game.player(PlayerNum::P1).score(), 0);

        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        assert_eq!(game.active_player(), PlayerNum::P2);
    }

    #[test]
    fn test_checkout_suggestion_follows_active_player() {
        let mut game = session(GameMode::Score301, OutRule::DoubleOut, 1, 1);
        // 301 is out of checkout range
        assert!(game.checkout_suggestion().is_none());

        apply(&mut game, &[(20, 3), (20, 3), (20, 3)]);
        // 121 left
        assert_eq!(game.checkout_suggestion(), Some("T20 T15 D8"));

        apply(&mut game, &[(20, 3), (19, 1), (1, 2)]);
        // 40 left
        assert_eq!(game.checkout_suggestion(), Some("D20"));
    }

    #[test]
    fn test_committed_turns_never_leave_negative_scores() {
        let mut game = session(GameMode::Score301, OutRule::StraightOut, 1, 1);
        for _ in 0..40 {
            if game.is_over() {
                break;
            }
            let _ = game.apply_throw(raw(20, 3)).unwrap();
            assert!(game.player(PlayerNum::P1).score() <= 301);
        }
    }
}
