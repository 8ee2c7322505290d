// WebSocket transport: binds each connection to one room member, then
// relays commands in and room broadcasts out.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::StreamExt;
use tokio::sync::broadcast;

use firedeck_shared::{ClientMsg, PlayerId, ServerMsg};

use crate::rooms::Room;
use crate::server::{ops, state::AppState};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let Some((room, player_id)) = bind_to_room(&mut socket, &state).await else {
        return;
    };
    tracing::info!(room = %room.code, player = %player_id, "client bound to room");

    // Subscribe so this socket receives snapshots produced by any member.
    let mut rx = room.subscribe();

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(sm) => send_ws(&mut socket, &sm).await,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    // Missed messages; the next snapshot catches the client up.
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },

            incoming = socket.next() => match incoming {
                Some(Ok(Message::Text(txt))) => {
                    let Ok(cm) = serde_json::from_str::<ClientMsg>(&txt) else {
                        tracing::warn!(room = %room.code, "failed to parse incoming ClientMsg JSON");
                        tracing::debug!(raw_in = %txt);
                        send_ws(&mut socket, &ServerMsg::Error("malformed ClientMsg JSON".into())).await;
                        continue;
                    };
                    match cm {
                        ClientMsg::CreateRoom { .. } | ClientMsg::JoinRoom { .. } => {
                            send_ws(&mut socket, &ServerMsg::Error("already in a room".into())).await;
                        }
                        cm => {
                            let reply = ops::handle_client_msg(&state, cm).await;
                            send_ws(&mut socket, &reply).await;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                _ => {}
            },
        }
    }

    ops::handle_departure(&state, &room.code, player_id).await;
    tracing::info!(room = %room.code, player = %player_id, "client disconnected");
}

/// The first command on a fresh connection must create or join a room;
/// everything else is refused until the connection is bound.
async fn bind_to_room(socket: &mut WebSocket, state: &AppState) -> Option<(Arc<Room>, PlayerId)> {
    loop {
        let msg = match socket.next().await {
            Some(Ok(m)) => m,
            Some(Err(_)) | None => return None,
        };
        let txt = match msg {
            Message::Text(t) => t,
            Message::Close(_) => return None,
            _ => continue,
        };
        let Ok(cm) = serde_json::from_str::<ClientMsg>(&txt) else {
            send_ws(socket, &ServerMsg::Error("malformed ClientMsg JSON".into())).await;
            continue;
        };
        match cm {
            ClientMsg::CreateRoom { name } => {
                let (room, player_id, reply) = ops::create_room(state, name).await;
                send_ws(socket, &reply).await;
                return Some((room, player_id));
            }
            ClientMsg::JoinRoom { code, name } => match ops::join_room(state, &code, name).await {
                Ok((room, player_id, reply)) => {
                    send_ws(socket, &reply).await;
                    return Some((room, player_id));
                }
                Err(e) => send_ws(socket, &ServerMsg::Error(e.to_string())).await,
            },
            ClientMsg::Ping => send_ws(socket, &ServerMsg::Pong).await,
            _ => {
                send_ws(socket, &ServerMsg::Error("create or join a room first".into())).await;
            }
        }
    }
}

async fn send_ws(socket: &mut WebSocket, msg: &ServerMsg) {
    match serde_json::to_string(msg) {
        Ok(txt) => {
            let _ = socket.send(Message::Text(txt)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize ServerMsg for websocket send");
        }
    }
}
