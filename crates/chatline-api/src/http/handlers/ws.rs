//! WebSocket reply gateway.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Every text
//! frame the client sends is passed to the [`ReplyGenerator`] on [`AppState`]
//! and the reply goes back as one text frame on the same socket.
//!
//! Frames are independent: there is no conversation binding, nothing is
//! persisted, and nothing is broadcast to other clients. A close frame, the
//! end of the stream, or any send/receive error ends the connection without
//! retry.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use chatline_core::reply::ReplyGenerator;

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Per-connection loop: `Connected -> (receive -> reply)* -> Disconnected`.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::now_v7();
    let (mut ws_sender, mut ws_receiver) = socket.split();

    tracing::info!(%connection_id, "WebSocket client connected");

    while let Some(msg_result) = ws_receiver.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                let reply = reply_to_frame(state.reply_generator.as_ref(), text.as_str());
                if ws_sender.send(Message::Text(reply.into())).await.is_err() {
                    tracing::debug!(%connection_id, "Failed to send reply (client disconnecting)");
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Err(err) => {
                tracing::debug!(%connection_id, "WebSocket receive error: {err}");
                break;
            }
            // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
            Ok(_) => {}
        }
    }

    tracing::info!(%connection_id, "WebSocket client disconnected");
}

fn reply_to_frame(generator: &dyn ReplyGenerator, text: &str) -> String {
    tracing::debug!(len = text.len(), "WebSocket frame received");
    generator.reply(text)
}
