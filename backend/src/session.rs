use crate::client::SendMsg;
use crate::store::{GameId, LegId, SharedStore, StoreError, ThrowRecord};
use crate::util;
use common::{
    messages::{Command, GameSetup, Response, StateResponse},
    CommittedTurn, ConfigError, GameConfig, GameError, GameSession, LegAdvance, PlayerId,
    RawThrow, ThrowOutcome,
};
use hashbrown::HashMap;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub type Sessions = Arc<RwLock<HashMap<String, Session>>>;

const SAVE_FAILED: &str = "Failed to save to the score store, please retry";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One live scoreboard. Owns the engine state and remembers which store
/// rows it writes against.
#[derive(Debug)]
pub struct Session {
    game: GameSession,
    game_id: GameId,
    leg_id: LegId,
}

impl Session {
    /// Resolve the seated players, create the game and first-leg rows, and
    /// rack the starting scores. These writes allocate the ids every later
    /// write needs, so they are awaited up front.
    pub async fn create(setup: GameSetup, store: &SharedStore) -> Result<Self, SessionError> {
        let config = GameConfig::new(
            setup.mode,
            setup.out_rule,
            setup.total_legs,
            setup.players.len(),
        )?;
        let mut seats = Vec::with_capacity(setup.players.len());
        for name in &setup.players {
            let record = store.find_or_create_player(name).await;
            seats.push((record.id, record.name));
        }
        let player_ids: Vec<PlayerId> = seats.iter().map(|(id, _)| *id).collect();
        let game = GameSession::new(config, seats)?;
        let record = store.create_game(config, player_ids).await?;
        let leg = store.create_leg(record.id, 1).await?;
        info!("started game {} with leg {}", record.id, leg.id);
        Ok(Session {
            game,
            game_id: record.id,
            leg_id: leg.id,
        })
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    pub fn send_state(&self, client: &impl SendMsg) {
        send_message(client, &self.state_response());
    }

    /// Handle one raw message from the scoreboard client. The engine state
    /// advances immediately; store writes run on background tasks and never
    /// hold up scoring.
    pub async fn handle_message<S>(&mut self, msg: &str, client: &S, store: &SharedStore)
    where
        S: SendMsg + Clone + Send + Sync + 'static,
    {
        let command: Command = match serde_json::from_str(msg) {
            Ok(command) => command,
            Err(err) => {
                warn!("Failed to deserialize scoreboard command: {}", err);
                return;
            }
        };
        match command {
            Command::NewGame(_) => {
                warn!("NewGame received while a game is already running");
            }
            Command::Throw(raw) => self.handle_throw(raw, client, store).await,
            Command::Undo => {
                if let Err(err) = self.game.undo_last_throw() {
                    send_message(
                        client,
                        &Response::Error {
                            message: err.to_string(),
                        },
                    );
                }
            }
            Command::Reset => {
                if let Err(err) = self.game.reset_turn() {
                    send_message(
                        client,
                        &Response::Error {
                            message: err.to_string(),
                        },
                    );
                }
            }
            Command::CompleteTurn => {
                let player = self.game.active_player();
                let player_id = self.game.player(player).id();
                let turn_index = self.game.current_leg().next_turn_index(player);
                match self.game.complete_turn() {
                    Ok(()) => self.persist_last_turn(player_id, turn_index, client, store),
                    Err(err) => send_message(
                        client,
                        &Response::Error {
                            message: err.to_string(),
                        },
                    ),
                }
            }
        }
        self.send_state(client);
    }

    async fn handle_throw<S>(&mut self, raw: RawThrow, client: &S, store: &SharedStore)
    where
        S: SendMsg + Clone + Send + Sync + 'static,
    {
        let player = self.game.active_player();
        let player_id = self.game.player(player).id();
        let turn_index = self.game.current_leg().next_turn_index(player);

        let outcome = match self.game.apply_throw(raw) {
            Ok(outcome) => outcome,
            Err(err) => {
                send_message(
                    client,
                    &Response::Error {
                        message: err.to_string(),
                    },
                );
                return;
            }
        };

        match outcome {
            ThrowOutcome::Accepted { turn_complete } => {
                if turn_complete {
                    self.persist_last_turn(player_id, turn_index, client, store);
                }
            }
            ThrowOutcome::Bust => {
                self.persist_last_turn(player_id, turn_index, client, store);
                send_message(client, &Response::Bust { player });
            }
            ThrowOutcome::LegWon { winner, next } => {
                self.persist_last_turn(player_id, turn_index, client, store);
                let winner_id = self.game.player(winner).id();
                let finished_leg = self.leg_id;
                dispatch_write(client, store, move |store| async move {
                    store.complete_leg(finished_leg, winner_id).await
                });
                send_message(
                    client,
                    &Response::LegWon {
                        winner,
                        legs_won: self.game.player(winner).legs_won(),
                    },
                );
                match next {
                    LegAdvance::NextLeg { .. } => {
                        // Later throws need the fresh leg's row id, so this
                        // one write is awaited instead of spawned
                        let game_id = self.game_id;
                        let number = self.game.current_leg().number();
                        match util::retry_async(1, || store.create_leg(game_id, number)).await {
                            Ok(leg) => self.leg_id = leg.id,
                            Err(_) => send_message(
                                client,
                                &Response::SaveFailed {
                                    message: SAVE_FAILED.to_string(),
                                },
                            ),
                        }
                    }
                    LegAdvance::GameWon => {
                        let game_id = self.game_id;
                        dispatch_write(client, store, move |store| async move {
                            store.complete_game(game_id, winner_id).await
                        });
                        send_message(client, &Response::GameWon { winner });
                    }
                }
            }
        }
    }

    /// Queue the most recently committed turn for the store, one row per
    /// dart, without waiting for the write.
    fn persist_last_turn<S>(
        &self,
        player_id: PlayerId,
        turn_index: u32,
        client: &S,
        store: &SharedStore,
    ) where
        S: SendMsg + Clone + Send + Sync + 'static,
    {
        let Some(turn) = self.game.last_committed_turn() else {
            return;
        };
        let records = turn_records(self.leg_id, player_id, turn_index, turn);
        let store = Arc::clone(store);
        let client = client.clone();
        tokio::spawn(async move {
            write_turn(&store, &client, records).await;
        });
    }

    fn state_response(&self) -> Response {
        Response::State(StateResponse {
            players: self.game.players().iter().cloned().collect(),
            active: self.game.active_player(),
            darts: self.game.open_turn().throws().to_vec(),
            leg_number: self.game.current_leg().number(),
            checkout: self.game.checkout_suggestion().map(str::to_string),
            game_over: self.game.is_over(),
        })
    }
}

fn turn_records(
    leg_id: LegId,
    player_id: PlayerId,
    turn_index: u32,
    turn: &CommittedTurn,
) -> Vec<ThrowRecord> {
    turn.throws()
        .iter()
        .enumerate()
        .map(|(i, throw)| ThrowRecord {
            leg_id,
            player_id,
            turn_index,
            dart_index: i as u32 + 1,
            score: throw.score(),
            multiplier: throw.multiplier().factor() as u8,
            is_miss: throw.is_miss(),
            busted: turn.busted(),
        })
        .collect()
}

async fn write_turn(store: &SharedStore, client: &impl SendMsg, records: Vec<ThrowRecord>) {
    for record in records {
        let result = util::retry_async(1, || store.record_throw(record.clone())).await;
        if result.is_err() {
            send_message(
                client,
                &Response::SaveFailed {
                    message: SAVE_FAILED.to_string(),
                },
            );
            return;
        }
    }
}

fn dispatch_write<S, F, Fut>(client: &S, store: &SharedStore, op: F)
where
    S: SendMsg + Clone + Send + Sync + 'static,
    F: Fn(SharedStore) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<(), StoreError>> + Send + 'static,
{
    let store = Arc::clone(store);
    let client = client.clone();
    tokio::spawn(async move {
        let result = util::retry_async(1, || op(Arc::clone(&store))).await;
        if result.is_err() {
            send_message(
                &client,
                &Response::SaveFailed {
                    message: SAVE_FAILED.to_string(),
                },
            );
        }
    });
}

pub(crate) fn send_message<M: Serialize>(client: &impl SendMsg, message: &M) {
    // If we cannot serialize our own response, that's a bug
    let json = serde_json::to_string(message).unwrap();
    // If the message fails to send even after retries, there's not much we can do but proceed
    let _ = util::retry(1, || client.send(&json));
}
