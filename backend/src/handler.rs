use crate::{
    client::{Client, Clients, Status},
    session::Sessions,
    store::{GameId, GameRecord, LegId, LegRecord, PlayerRecord, SharedStore, StoreError},
    ws,
};
use common::{GameConfig, GameMode, OutRule, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::{
    http::StatusCode,
    reply::{json, with_status, Json, Reply, WithStatus},
    Rejection,
};

type Result<T> = std::result::Result<T, Rejection>;

#[derive(Serialize, Debug)]
pub struct RegisterResponse {
    url: String,
}

#[derive(Serialize, Debug)]
struct ErrorMessage {
    error: String,
}

#[derive(Deserialize, Debug)]
pub struct CreatePlayerRequest {
    name: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateGameRequest {
    mode: GameMode,
    out_rule: OutRule,
    #[serde(default = "default_total_legs")]
    total_legs: u32,
    player_ids: Vec<PlayerId>,
}

fn default_total_legs() -> u32 {
    1
}

#[derive(Serialize, Debug)]
pub struct GameDetail {
    game: GameRecord,
    players: Vec<PlayerRecord>,
    legs: Vec<LegRecord>,
}

fn reply_error(status: StatusCode, message: &str) -> WithStatus<Json> {
    with_status(
        json(&ErrorMessage {
            error: message.to_string(),
        }),
        status,
    )
}

fn store_error(err: StoreError) -> WithStatus<Json> {
    reply_error(StatusCode::NOT_FOUND, &err.to_string())
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

pub async fn register_handler(clients: Clients) -> Result<impl Reply> {
    let uuid = Uuid::new_v4().as_simple().to_string();
    clients.write().await.insert(
        uuid.clone(),
        Client {
            status: Status::Idle,
            sender: None,
        },
    );
    Ok(json(&RegisterResponse {
        url: format!("ws://127.0.0.1:8000/ws/{}", uuid),
    }))
}

pub async fn unregister_handler(id: String, clients: Clients) -> Result<impl Reply> {
    clients.write().await.remove(&id);
    Ok(StatusCode::OK)
}

pub async fn ws_handler(
    ws: warp::ws::Ws,
    id: String,
    clients: Clients,
    sessions: Sessions,
    store: SharedStore,
) -> Result<impl Reply> {
    let client = clients.read().await.get(&id).cloned();
    match client {
        Some(c) => Ok(ws.on_upgrade(move |socket| {
            ws::client_connection(socket, id, clients, c, sessions, store)
        })),
        None => Err(warp::reject::not_found()),
    }
}

pub async fn list_players_handler(store: SharedStore) -> Result<impl Reply> {
    Ok(json(&store.players().await))
}

pub async fn create_player_handler(
    body: CreatePlayerRequest,
    store: SharedStore,
) -> Result<impl Reply> {
    let name = body.name.trim();
    if name.is_empty() {
        return Ok(reply_error(
            StatusCode::BAD_REQUEST,
            "Player name is required",
        ));
    }
    let player = store.find_or_create_player(name).await;
    Ok(with_status(json(&player), StatusCode::CREATED))
}

pub async fn player_statistics_handler(id: u64, store: SharedStore) -> Result<impl Reply> {
    match store.player_statistics(PlayerId(id)).await {
        Ok(totals) => Ok(with_status(json(&totals), StatusCode::OK)),
        Err(err) => Ok(store_error(err)),
    }
}

pub async fn player_games_handler(id: u64, store: SharedStore) -> Result<impl Reply> {
    match store.games_for_player(PlayerId(id)).await {
        Ok(summaries) => Ok(with_status(json(&summaries), StatusCode::OK)),
        Err(err) => Ok(store_error(err)),
    }
}

pub async fn delete_player_games_handler(id: u64, store: SharedStore) -> Result<impl Reply> {
    match store.delete_games_for_player(PlayerId(id)).await {
        Ok(()) => Ok(with_status(json(&()), StatusCode::OK)),
        Err(err) => Ok(store_error(err)),
    }
}

pub async fn list_games_handler(store: SharedStore) -> Result<impl Reply> {
    Ok(json(&store.games().await))
}

pub async fn create_game_handler(
    body: CreateGameRequest,
    store: SharedStore,
) -> Result<impl Reply> {
    let config = match GameConfig::new(
        body.mode,
        body.out_rule,
        body.total_legs,
        body.player_ids.len(),
    ) {
        Ok(config) => config,
        Err(err) => return Ok(reply_error(StatusCode::BAD_REQUEST, &err.to_string())),
    };
    match store.create_game(config, body.player_ids).await {
        Ok(game) => Ok(with_status(json(&game), StatusCode::CREATED)),
        Err(err) => Ok(store_error(err)),
    }
}

pub async fn get_game_handler(id: u64, store: SharedStore) -> Result<impl Reply> {
    let game = match store.game(GameId(id)).await {
        Ok(game) => game,
        Err(err) => return Ok(store_error(err)),
    };
    let mut players = Vec::with_capacity(game.player_ids.len());
    for player_id in &game.player_ids {
        if let Ok(player) = store.player(*player_id).await {
            players.push(player);
        }
    }
    let legs = store.legs_for_game(game.id).await.unwrap_or_default();
    Ok(with_status(
        json(&GameDetail {
            game,
            players,
            legs,
        }),
        StatusCode::OK,
    ))
}

pub async fn delete_game_handler(id: u64, store: SharedStore) -> Result<impl Reply> {
    match store.delete_game(GameId(id)).await {
        Ok(()) => Ok(with_status(json(&()), StatusCode::OK)),
        Err(err) => Ok(store_error(err)),
    }
}

pub async fn leg_statistics_handler(
    leg_id: u64,
    player_id: u64,
    store: SharedStore,
) -> Result<impl Reply> {
    match store.leg_statistics(LegId(leg_id), PlayerId(player_id)).await {
        Ok(summary) => Ok(with_status(json(&summary), StatusCode::OK)),
        Err(err) => Ok(store_error(err)),
    }
}
