use crate::client::Clients;
use crate::session::Sessions;
use crate::store::{MemStore, SharedStore};
use hashbrown::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use warp::{
    http::{header, Method},
    Filter,
};

mod client;
mod handler;
mod session;
mod stats;
mod store;
mod util;
mod ws;

#[tracing::instrument]
#[tokio::main]
async fn main() {
    let file_appender = tracing_appender::rolling::daily("./logs", "server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let clients: Clients = Arc::new(RwLock::new(HashMap::new()));
    let sessions: Sessions = Arc::new(RwLock::new(HashMap::new()));
    let store: SharedStore = Arc::new(MemStore::new());
    info!("created clients, sessions, and score store");

    let health_route = warp::path!("health").and_then(handler::health_handler);

    let register = warp::path("register");
    let register_routes = register
        .and(warp::post())
        .and(with_clients(clients.clone()))
        .and_then(handler::register_handler)
        .or(register
            .and(warp::delete())
            .and(warp::path::param())
            .and(with_clients(clients.clone()))
            .and_then(handler::unregister_handler));

    let player_routes = warp::path!("players")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handler::list_players_handler)
        .or(warp::path!("players")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_store(store.clone()))
            .and_then(handler::create_player_handler))
        .or(warp::path!("players" / u64 / "statistics")
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(handler::player_statistics_handler))
        .or(warp::path!("players" / u64 / "games")
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(handler::player_games_handler))
        .or(warp::path!("players" / u64 / "games")
            .and(warp::delete())
            .and(with_store(store.clone()))
            .and_then(handler::delete_player_games_handler));

    let game_routes = warp::path!("games")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handler::list_games_handler)
        .or(warp::path!("games")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_store(store.clone()))
            .and_then(handler::create_game_handler))
        .or(warp::path!("games" / u64)
            .and(warp::get())
            .and(with_store(store.clone()))
            .and_then(handler::get_game_handler))
        .or(warp::path!("games" / u64)
            .and(warp::delete())
            .and(with_store(store.clone()))
            .and_then(handler::delete_game_handler));

    let leg_routes = warp::path!("legs" / u64 / "players" / u64 / "statistics")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handler::leg_statistics_handler);

    let ws_route = warp::path("ws")
        .and(warp::ws())
        .and(warp::path::param())
        .and(with_clients(clients.clone()))
        .and(with_sessions(sessions.clone()))
        .and(with_store(store.clone()))
        .and_then(handler::ws_handler);

    let routes = health_route
        .or(register_routes)
        .or(player_routes)
        .or(game_routes)
        .or(leg_routes)
        .or(ws_route)
        .with(
            warp::cors()
                .allow_credentials(true)
                .allow_methods(&[
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::DELETE,
                    Method::PUT,
                ])
                .allow_headers(vec![
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                ])
                .expose_headers(vec![header::LINK])
                .max_age(300)
                .allow_any_origin(),
        );

    warp::serve(routes).run(([127, 0, 0, 1], 8000)).await;
}

fn with_clients(clients: Clients) -> impl Filter<Extract = (Clients,), Error = Infallible> + Clone {
    warp::any().map(move || clients.clone())
}

fn with_sessions(
    sessions: Sessions,
) -> impl Filter<Extract = (Sessions,), Error = Infallible> + Clone {
    warp::any().map(move || sessions.clone())
}

fn with_store(store: SharedStore) -> impl Filter<Extract = (SharedStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}
