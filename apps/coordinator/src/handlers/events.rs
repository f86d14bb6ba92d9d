// [apps/coordinator/src/handlers/events.rs]
/*!
 * APARATO: EVENTS HANDLER
 * RESPONSABILIDAD: UPGRADE DE WEBSOCKET Y REENVIO DE EVENTOS DEL BUS
 * COMO MARCOS DE TEXTO JSON (C6, §4.6).
 */

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::warn;

use crate::state::AppState;

/// `GET /events` — el cliente hace el upgrade y recibe, en el orden de
/// publicacion, cada `RealTimeEvent` serializado como JSON (§4.6).
pub async fn subscribe(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_events(socket, state))
}

async fn stream_events(mut socket: WebSocket, state: AppState) {
    let mut subscription = state.events.subscribe();
    while let Some(event) = subscription.next().await {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to serialize real-time event");
                continue;
            }
        };
        if socket.send(Message::Text(payload)).await.is_err() {
            break;
        }
    }
}
