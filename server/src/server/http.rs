// HTTP mirror of the websocket commands, so simple clients and scripts can
// drive a room with plain request/response calls. Handlers reuse the
// centralized `ops::handle_client_msg` to keep behavior identical across
// transports.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use firedeck_shared::{ClientMsg, ServerMsg};

use crate::server::{ops, state::AppState};

/// Accept any `ClientMsg` and run it through the shared command handler.
///
/// Example payload:
///   { "type": "DrawCard", "data": { "code": "AB12", "player_id": 0 } }
pub async fn message_handler(
    State(state): State<AppState>,
    Json(cm): Json<ClientMsg>,
) -> impl IntoResponse {
    let resp = ops::handle_client_msg(&state, cm).await;
    match resp {
        ServerMsg::Error(e) => (StatusCode::BAD_REQUEST, Json(ServerMsg::Error(e))).into_response(),
        other => (StatusCode::OK, Json(other)).into_response(),
    }
}
