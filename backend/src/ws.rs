use crate::client::{Client, Clients, Sender, Status};
use crate::session::{self, Session, Sessions};
use crate::store::SharedStore;
use common::messages::{Command, Response};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{error, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

pub async fn client_connection(
    ws: WebSocket,
    id: String,
    clients: Clients,
    mut client: Client,
    sessions: Sessions,
    store: SharedStore,
) {
    let (client_ws_sender, mut client_ws_rcv) = ws.split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();

    let client_rcv = UnboundedReceiverStream::new(client_rcv);
    tokio::task::spawn(client_rcv.forward(client_ws_sender).map(|result| {
        if let Err(e) = result {
            error!("error sending websocket msg: {}", e);
        }
    }));

    client.sender = Some(Sender(client_sender));
    clients.write().await.insert(id.clone(), client);

    info!("{} connected", id);

    while let Some(result) = client_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                error!("error receiving ws message for id: {}): {}", id.clone(), e);
                break;
            }
        };
        client_msg(&id, msg, &clients, &sessions, &store).await;
    }

    // A dropped connection abandons whatever session it was scoring
    let removed = clients.write().await.remove(&id);
    if let Some(Client {
        status: Status::Scoring { session_id },
        ..
    }) = removed
    {
        sessions.write().await.remove(&session_id);
    }
    info!("{} disconnected", id);
}

#[tracing::instrument(skip(clients, sessions, store))]
async fn client_msg(
    id: &str,
    msg: Message,
    clients: &Clients,
    sessions: &Sessions,
    store: &SharedStore,
) {
    info!("received message from {}: {:?}", id, msg);
    let message = match msg.to_str() {
        Ok(v) => v.trim(),
        Err(_) => return,
    };

    if message == "ping" {
        return;
    }

    let mut clients_map = clients.write().await;
    let client = match clients_map.get_mut(id) {
        Some(v) => v,
        None => {
            error!(
                "Message from client {} did not match any connected clients",
                id
            );
            return;
        }
    };
    let sender = match client.sender.clone() {
        Some(sender) => sender,
        None => return,
    };
    match &client.status {
        Status::Scoring { session_id } => {
            let session_id = session_id.clone();
            let mut sessions_map = sessions.write().await;
            let session = match sessions_map.get_mut(&session_id) {
                Some(v) => v,
                None => {
                    error!(
                        "Session with ID {} did not match any live sessions",
                        session_id
                    );
                    return;
                }
            };
            session.handle_message(message, &sender, store).await;
            if session.is_over() {
                client.status = Status::Idle;
                sessions_map.remove(&session_id);
            }
        }
        Status::Idle => {
            let command: Command = match serde_json::from_str(message) {
                Ok(command) => command,
                Err(err) => {
                    warn!("Failed to deserialize command from idle client: {}", err);
                    return;
                }
            };
            let Command::NewGame(setup) = command else {
                warn!("client {} sent a scoring command with no game running", id);
                return;
            };
            match Session::create(setup, store).await {
                Ok(new_session) => {
                    let session_id = Uuid::new_v4().as_simple().to_string();
                    info!("client {} started session {}", id, session_id);
                    new_session.send_state(&sender);
                    sessions.write().await.insert(session_id.clone(), new_session);
                    client.status = Status::Scoring { session_id };
                }
                Err(err) => {
                    warn!("Failed to start a game: {}", err);
                    session::send_message(
                        &sender,
                        &Response::Error {
                            message: err.to_string(),
                        },
                    );
                }
            }
        }
    }
}
