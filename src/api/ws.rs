use axum::{
    body::Bytes,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;
use std::sync::Arc;

use crate::api::events::{ClientMessage, ServerMessage};
use crate::api::server::AppState;
use crate::queue::{QueueRegistry, Subscription};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    // Subscribe before the upgrade so an unknown room is a plain 404
    match state.registry.subscribe(&room) {
        Ok(sub) => ws.on_upgrade(move |socket| handle_socket(socket, state, sub)),
        Err(e) => e.into_response(),
    }
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, sub: Subscription) {
    let room = sub.room().to_string();
    let mut updates = std::pin::pin!(sub.into_stream());
    tracing::debug!(room = %room, "Watcher connected");

    let mut keepalive = tokio::time::interval(state.keepalive_interval);
    keepalive.tick().await;

    loop {
        tokio::select! {
            update = updates.next() => {
                let Some(snapshot) = update else { break };
                if send(&mut socket, snapshot.into()).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_client_message(&state.registry, &room, text.as_str()).await;
                        if send(&mut socket, reply).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            _ = keepalive.tick() => {
                if socket.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!(room = %room, "Watcher disconnected");
}

async fn handle_client_message(registry: &QueueRegistry, room: &str, text: &str) -> ServerMessage {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(room, error = %e, "Malformed client message");
            return ServerMessage::Error {
                message: format!("Malformed message: {e}"),
            };
        }
    };

    let result = match msg {
        ClientMessage::Join { name } => registry.join(room, &name).await,
        ClientMessage::Leave { name } => registry.leave(room, &name).await,
    };

    match result {
        Ok(change) => ServerMessage::Ack {
            changed: change.changed,
        },
        Err(e) => ServerMessage::Error {
            message: e.to_string(),
        },
    }
}

async fn send(socket: &mut WebSocket, msg: ServerMessage) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(&msg) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode server message");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await
}
