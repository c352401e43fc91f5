use crate::stats::{self, PlayerTotals, StatSummary};
use async_trait::async_trait;
use common::{GameConfig, PlayerId};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LegId(pub u64);

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("No player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("No game with id {0}")]
    UnknownGame(GameId),
    #[error("No leg with id {0}")]
    UnknownLeg(LegId),
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct GameRecord {
    pub id: GameId,
    pub config: GameConfig,
    pub player_ids: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
    pub completed: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct LegRecord {
    pub id: LegId,
    pub game_id: GameId,
    pub number: u32,
    pub winner: Option<PlayerId>,
    pub completed: bool,
}

/// One recorded dart. `busted` marks every dart of a voided turn so the
/// statistics pass can skip them.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ThrowRecord {
    pub leg_id: LegId,
    pub player_id: PlayerId,
    pub turn_index: u32,
    pub dart_index: u32,
    pub score: u32,
    pub multiplier: u8,
    pub is_miss: bool,
    pub busted: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct GameSummary {
    pub game: GameRecord,
    pub player_names: Vec<String>,
    pub legs: Vec<LegRecord>,
}

/// The external score store the engine's results are persisted to. The
/// engine never waits on it: writes are dispatched after the in-memory
/// state has already advanced.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn find_or_create_player(&self, name: &str) -> PlayerRecord;
    async fn player(&self, id: PlayerId) -> Result<PlayerRecord, StoreError>;
    async fn players(&self) -> Vec<PlayerRecord>;

    async fn create_game(
        &self,
        config: GameConfig,
        player_ids: Vec<PlayerId>,
    ) -> Result<GameRecord, StoreError>;
    async fn games(&self) -> Vec<GameRecord>;
    async fn game(&self, id: GameId) -> Result<GameRecord, StoreError>;
    async fn delete_game(&self, id: GameId) -> Result<(), StoreError>;
    async fn complete_game(&self, id: GameId, winner: PlayerId) -> Result<(), StoreError>;

    async fn create_leg(&self, game_id: GameId, number: u32) -> Result<LegRecord, StoreError>;
    async fn legs_for_game(&self, game_id: GameId) -> Result<Vec<LegRecord>, StoreError>;
    async fn complete_leg(&self, id: LegId, winner: PlayerId) -> Result<(), StoreError>;

    async fn record_throw(&self, record: ThrowRecord) -> Result<(), StoreError>;
    async fn throws_for_leg(&self, leg_id: LegId) -> Result<Vec<ThrowRecord>, StoreError>;

    async fn games_for_player(&self, player_id: PlayerId)
        -> Result<Vec<GameSummary>, StoreError>;
    async fn delete_games_for_player(&self, player_id: PlayerId) -> Result<(), StoreError>;

    async fn leg_statistics(
        &self,
        leg_id: LegId,
        player_id: PlayerId,
    ) -> Result<StatSummary, StoreError>;
    async fn player_statistics(&self, player_id: PlayerId) -> Result<PlayerTotals, StoreError>;
}

pub type SharedStore = Arc<dyn ScoreStore>;

#[derive(Default)]
struct Tables {
    players: HashMap<PlayerId, PlayerRecord>,
    games: HashMap<GameId, GameRecord>,
    legs: HashMap<LegId, LegRecord>,
    throws: Vec<ThrowRecord>,
    next_player_id: u64,
    next_game_id: u64,
    next_leg_id: u64,
}

impl Tables {
    fn remove_game(&mut self, id: GameId) {
        self.games.remove(&id);
        let leg_ids: Vec<LegId> = self
            .legs
            .values()
            .filter(|leg| leg.game_id == id)
            .map(|leg| leg.id)
            .collect();
        for leg_id in &leg_ids {
            self.legs.remove(leg_id);
        }
        self.throws.retain(|t| !leg_ids.contains(&t.leg_id));
    }

    fn player_throws(&self, player_id: PlayerId) -> Vec<ThrowRecord> {
        self.throws
            .iter()
            .filter(|t| t.player_id == player_id)
            .cloned()
            .collect()
    }
}

/// In-memory score store. Stands in for the external store the system
/// persists against; rows get monotonically allocated integer ids so
/// newest-first listings are an id sort.
#[derive(Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }
}

#[async_trait]
impl ScoreStore for MemStore {
    async fn find_or_create_player(&self, name: &str) -> PlayerRecord {
        let mut tables = self.tables.write().await;
        let existing = tables
            .players
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned();
        if let Some(player) = existing {
            return player;
        }
        tables.next_player_id += 1;
        let player = PlayerRecord {
            id: PlayerId(tables.next_player_id),
            name: name.to_string(),
        };
        tables.players.insert(player.id, player.clone());
        player
    }

    async fn player(&self, id: PlayerId) -> Result<PlayerRecord, StoreError> {
        self.tables
            .read()
            .await
            .players
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownPlayer(id))
    }

    async fn players(&self) -> Vec<PlayerRecord> {
        let tables = self.tables.read().await;
        let mut players: Vec<PlayerRecord> = tables.players.values().cloned().collect();
        players.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        players
    }

    async fn create_game(
        &self,
        config: GameConfig,
        player_ids: Vec<PlayerId>,
    ) -> Result<GameRecord, StoreError> {
        let mut tables = self.tables.write().await;
        for id in &player_ids {
            if !tables.players.contains_key(id) {
                return Err(StoreError::UnknownPlayer(*id));
            }
        }
        tables.next_game_id += 1;
        let game = GameRecord {
            id: GameId(tables.next_game_id),
            config,
            player_ids,
            winner: None,
            completed: false,
        };
        tables.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn games(&self) -> Vec<GameRecord> {
        let tables = self.tables.read().await;
        let mut games: Vec<GameRecord> = tables.games.values().cloned().collect();
        games.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        games
    }

    async fn game(&self, id: GameId) -> Result<GameRecord, StoreError> {
        self.tables
            .read()
            .await
            .games
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownGame(id))
    }

    async fn delete_game(&self, id: GameId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.games.contains_key(&id) {
            return Err(StoreError::UnknownGame(id));
        }
        tables.remove_game(id);
        Ok(())
    }

    async fn complete_game(&self, id: GameId, winner: PlayerId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let game = tables.games.get_mut(&id).ok_or(StoreError::UnknownGame(id))?;
        game.winner = Some(winner);
        game.completed = true;
        Ok(())
    }

    async fn create_leg(&self, game_id: GameId, number: u32) -> Result<LegRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.games.contains_key(&game_id) {
            return Err(StoreError::UnknownGame(game_id));
        }
        tables.next_leg_id += 1;
        let leg = LegRecord {
            id: LegId(tables.next_leg_id),
            game_id,
            number,
            winner: None,
            completed: false,
        };
        tables.legs.insert(leg.id, leg.clone());
        Ok(leg)
    }

    async fn legs_for_game(&self, game_id: GameId) -> Result<Vec<LegRecord>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.games.contains_key(&game_id) {
            return Err(StoreError::UnknownGame(game_id));
        }
        let mut legs: Vec<LegRecord> = tables
            .legs
            .values()
            .filter(|leg| leg.game_id == game_id)
            .cloned()
            .collect();
        legs.sort_by_key(|leg| leg.number);
        Ok(legs)
    }

    async fn complete_leg(&self, id: LegId, winner: PlayerId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let leg = tables.legs.get_mut(&id).ok_or(StoreError::UnknownLeg(id))?;
        leg.winner = Some(winner);
        leg.completed = true;
        Ok(())
    }

    async fn record_throw(&self, record: ThrowRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.legs.contains_key(&record.leg_id) {
            return Err(StoreError::UnknownLeg(record.leg_id));
        }
        if !tables.players.contains_key(&record.player_id) {
            return Err(StoreError::UnknownPlayer(record.player_id));
        }
        tables.throws.push(record);
        Ok(())
    }

    async fn throws_for_leg(&self, leg_id: LegId) -> Result<Vec<ThrowRecord>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.legs.contains_key(&leg_id) {
            return Err(StoreError::UnknownLeg(leg_id));
        }
        Ok(tables
            .throws
            .iter()
            .filter(|t| t.leg_id == leg_id)
            .cloned()
            .collect())
    }

    async fn games_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSummary>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.players.contains_key(&player_id) {
            return Err(StoreError::UnknownPlayer(player_id));
        }
        let mut games: Vec<GameRecord> = tables
            .games
            .values()
            .filter(|game| game.player_ids.contains(&player_id))
            .cloned()
            .collect();
        games.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        Ok(games
            .into_iter()
            .map(|game| {
                let player_names = game
                    .player_ids
                    .iter()
                    .filter_map(|id| tables.players.get(id))
                    .map(|p| p.name.clone())
                    .collect();
                let mut legs: Vec<LegRecord> = tables
                    .legs
                    .values()
                    .filter(|leg| leg.game_id == game.id)
                    .cloned()
                    .collect();
                legs.sort_by_key(|leg| leg.number);
                GameSummary {
                    game,
                    player_names,
                    legs,
                }
            })
            .collect())
    }

    async fn delete_games_for_player(&self, player_id: PlayerId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.players.contains_key(&player_id) {
            return Err(StoreError::UnknownPlayer(player_id));
        }
        let game_ids: Vec<GameId> = tables
            .games
            .values()
            .filter(|game| game.player_ids.contains(&player_id))
            .map(|game| game.id)
            .collect();
        for id in game_ids {
            tables.remove_game(id);
        }
        Ok(())
    }

    async fn leg_statistics(
        &self,
        leg_id: LegId,
        player_id: PlayerId,
    ) -> Result<StatSummary, StoreError> {
        let tables = self.tables.read().await;
        if !tables.legs.contains_key(&leg_id) {
            return Err(StoreError::UnknownLeg(leg_id));
        }
        if !tables.players.contains_key(&player_id) {
            return Err(StoreError::UnknownPlayer(player_id));
        }
        let throws: Vec<ThrowRecord> = tables
            .throws
            .iter()
            .filter(|t| t.leg_id == leg_id && t.player_id == player_id)
            .cloned()
            .collect();
        Ok(stats::summarize(&throws))
    }

    async fn player_statistics(&self, player_id: PlayerId) -> Result<PlayerTotals, StoreError> {
        let tables = self.tables.read().await;
        if !tables.players.contains_key(&player_id) {
            return Err(StoreError::UnknownPlayer(player_id));
        }
        let games_played = tables
            .games
            .values()
            .filter(|game| game.player_ids.contains(&player_id))
            .count() as u32;
        let throws = tables.player_throws(player_id);
        let legs_played = tables
            .legs
            .values()
            .filter(|leg| throws.iter().any(|t| t.leg_id == leg.id))
            .count() as u32;
        let legs_won = tables
            .legs
            .values()
            .filter(|leg| leg.winner == Some(player_id))
            .count() as u32;
        Ok(PlayerTotals {
            games_played,
            legs_played,
            legs_won,
            stats: stats::summarize(&throws),
        })
    }
}
