/// Realtime API - WebSocket endpoint for playlist refresh notifications
use crate::state::AppState;
use adboard_core::DisplayId;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;

/// Message a client sends to subscribe to a display's room
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Join { display_id: i64 },
}

/// GET /api/realtime/ws - WebSocket upgrade handler
///
/// Player devices connect here and join the room of the display they
/// drive. No authentication: players only ever receive refresh pokes,
/// never data.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_websocket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let (conn_id, mut rx) = state.hub.register().await;

    // Forward hub messages to the socket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages: join requests, close, errors
    let hub = state.hub.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Join { display_id }) => {
                        hub.join(&conn_id, DisplayId::new(display_id)).await;
                    }
                    Err(e) => {
                        tracing::debug!(connection_id = %conn_id, error = %e, "Ignoring unrecognized message");
                    }
                },
                Ok(Message::Close(_)) => {
                    break;
                }
                Err(e) => {
                    tracing::warn!(connection_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
        conn_id
    });

    // Wait for either side to finish
    let conn_id = tokio::select! {
        _ = send_task => conn_id,
        result = recv_task => result.unwrap_or(conn_id),
    };

    state.hub.unregister(&conn_id).await;
}
