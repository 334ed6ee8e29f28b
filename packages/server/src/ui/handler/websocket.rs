//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use hiroba_shared::protocol::ClientEvent;
use tokio::sync::mpsc;

use crate::{domain::ConnectionId, ui::state::AppState, usecase::RelayHandle};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();
    state.relay.connect(connection_id, tx);
    // Disconnect is sent when this function returns or is cancelled
    let _guard = state.relay.guard(connection_id);
    tracing::info!("New client connected: {}", connection_id);

    let (sender, receiver) = socket.split();

    // Loops are not spawned: no frame of this connection may reach the relay
    // after the guard fires.
    tokio::select! {
        _ = receiver_loop(receiver, &state.relay, connection_id) => {},
        _ = pusher_loop(rx, sender) => {},
    };
}

/// Forwards broadcast frames from `rx` to the socket.
///
/// Ends when the relay drops this connection's sender or the socket write fails.
async fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) {
    while let Some(frame) = rx.recv().await {
        if let Err(e) = sender.send(Message::Text(frame.into())).await {
            tracing::debug!("WebSocket write failed: {}", e);
            break;
        }
    }
}

/// Decodes inbound frames and forwards them to the relay until the socket closes.
async fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    relay: &RelayHandle,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match ClientEvent::decode(text.as_str()) {
                Ok(ClientEvent::Join(payload)) => relay.join(connection_id, payload),
                Ok(ClientEvent::ChatMessage(payload)) => {
                    relay.chat_message(connection_id, payload)
                }
                Err(e) => {
                    tracing::debug!("Ignoring frame from '{}': {}", connection_id, e);
                }
            },
            Message::Close(_) => {
                tracing::debug!("Client '{}' requested close", connection_id);
                break;
            }
            Message::Binary(data) => {
                tracing::debug!(
                    "Ignoring {} bytes of binary data from '{}'",
                    data.len(),
                    connection_id
                );
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}
