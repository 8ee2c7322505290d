//! Command handlers shared by every transport.
//!
//! Each handler validates through the registry and engine under the room's
//! lock, broadcasts the resulting snapshot (and the per-draw event) to the
//! room channel, and returns the direct reply for the caller.

use std::io::IsTerminal;
use std::sync::Arc;

use firedeck_shared::{ClientMsg, GamePhase, PlayerId, ServerMsg};

use crate::game::GameError;
use crate::pretty;
use crate::rooms::{Room, RoomError};
use crate::server::state::AppState;

const HOST_AVATAR: &str = "1";
const GUEST_AVATAR: &str = "2";

/// Central dispatch used by the HTTP endpoint and the bound phase of the
/// websocket loop, so every transport behaves identically.
pub async fn handle_client_msg(state: &AppState, msg: ClientMsg) -> ServerMsg {
    match msg {
        ClientMsg::CreateRoom { name } => {
            let (_, _, reply) = create_room(state, name).await;
            reply
        }
        ClientMsg::JoinRoom { code, name } => match join_room(state, &code, name).await {
            Ok((_, _, reply)) => reply,
            Err(e) => ServerMsg::Error(e.to_string()),
        },
        ClientMsg::StartGame { code } => start_game(state, &code).await,
        ClientMsg::DrawCard { code, player_id } => draw_card(state, &code, player_id).await,
        ClientMsg::SelectTarget {
            code,
            player_id,
            target_id,
        } => select_target(state, &code, player_id, target_id).await,
        ClientMsg::UseShield {
            code,
            player_id,
            use_it,
        } => use_shield(state, &code, player_id, use_it).await,
        ClientMsg::LeaveRoom { code, player_id } => {
            handle_departure(state, &code, player_id).await;
            ServerMsg::Pong
        }
        ClientMsg::Ping => ServerMsg::Pong,
    }
}

/// Create a room with the caller as host. Also returns the room binding for
/// transports that tie the connection to it.
pub async fn create_room(state: &AppState, name: String) -> (Arc<Room>, PlayerId, ServerMsg) {
    let (room, player_id) = state.rooms.create_room(name, HOST_AVATAR).await;
    let gs = room.game.lock().await.public();
    let Some(player) = gs.players.iter().find(|p| p.id == player_id).cloned() else {
        return (room, player_id, internal_error());
    };
    let reply = ServerMsg::RoomCreated {
        code: room.code.clone(),
        player,
    };
    (room, player_id, reply)
}

/// Join a lobby. Existing members get a fresh snapshot; the joiner gets the
/// snapshot plus their own player record in the direct reply.
pub async fn join_room(
    state: &AppState,
    code: &str,
    name: String,
) -> Result<(Arc<Room>, PlayerId, ServerMsg), RoomError> {
    let (room, player_id) = state.rooms.join_room(code, name, GUEST_AVATAR).await?;
    let gs = room.game.lock().await.public();
    tracing::info!(room = %room.code, player = %player_id, "player joined");
    let Some(player) = gs.players.iter().find(|p| p.id == player_id).cloned() else {
        return Ok((room, player_id, internal_error()));
    };
    room.broadcast(ServerMsg::State(gs.clone()));
    let reply = ServerMsg::Joined { player, state: gs };
    Ok((room, player_id, reply))
}

pub async fn start_game(state: &AppState, code: &str) -> ServerMsg {
    let Some(room) = state.rooms.room(code).await else {
        return ServerMsg::Error(RoomError::RoomNotFound.to_string());
    };
    let mut game = room.game.lock().await;
    match game.start_game() {
        Ok(()) => {
            let gs = game.public();
            drop(game);
            let header = pretty::format_table_header(&gs, color_output());
            tracing::info!("{}", header);
            room.broadcast(ServerMsg::State(gs.clone()));
            ServerMsg::State(gs)
        }
        Err(e) => error_reply(code, e),
    }
}

pub async fn draw_card(state: &AppState, code: &str, player_id: PlayerId) -> ServerMsg {
    let Some(room) = state.rooms.room(code).await else {
        return ServerMsg::Error(RoomError::RoomNotFound.to_string());
    };
    let mut game = room.game.lock().await;
    match game.draw_card(player_id) {
        Ok(outcome) => {
            let gs = game.public();
            drop(game);
            let line = pretty::format_draw(
                gs.player_name(player_id),
                outcome.card,
                outcome.penalty.as_deref(),
                color_output(),
            );
            tracing::info!("{}", line);
            room.broadcast(ServerMsg::State(gs));
            let drawn = ServerMsg::CardDrawn {
                player_id,
                card: outcome.card,
                penalty: outcome.penalty,
            };
            room.broadcast(drawn.clone());
            drawn
        }
        Err(e) => error_reply(code, e),
    }
}

pub async fn select_target(
    state: &AppState,
    code: &str,
    player_id: PlayerId,
    target_id: PlayerId,
) -> ServerMsg {
    let Some(room) = state.rooms.room(code).await else {
        return ServerMsg::Error(RoomError::RoomNotFound.to_string());
    };
    let mut game = room.game.lock().await;
    let applied = game.select_target(player_id, target_id);
    let gs = game.public();
    drop(game);
    if !applied {
        tracing::debug!(room = %code, player = %player_id, "ignored out-of-turn target selection");
    }
    room.broadcast(ServerMsg::State(gs.clone()));
    ServerMsg::State(gs)
}

pub async fn use_shield(
    state: &AppState,
    code: &str,
    player_id: PlayerId,
    use_it: bool,
) -> ServerMsg {
    let Some(room) = state.rooms.room(code).await else {
        return ServerMsg::Error(RoomError::RoomNotFound.to_string());
    };
    let mut game = room.game.lock().await;
    let applied = game.use_shield(player_id, use_it);
    let gs = game.public();
    drop(game);
    if !applied {
        tracing::debug!(room = %code, player = %player_id, "ignored out-of-turn shield decision");
    }
    room.broadcast(ServerMsg::State(gs.clone()));
    ServerMsg::State(gs)
}

/// Departure policy: lobby members are removed outright (dropping the room
/// once empty); mid-game the player is only marked disconnected so the turn
/// order stays intact.
pub async fn handle_departure(state: &AppState, code: &str, player_id: PlayerId) {
    let Some(room) = state.rooms.room(code).await else {
        return;
    };
    let phase = room.game.lock().await.phase();
    if phase == GamePhase::Lobby {
        if let Some(room) = state.rooms.remove_player(code, player_id).await {
            let gs = room.game.lock().await.public();
            room.broadcast(ServerMsg::State(gs));
        }
    } else {
        let mut game = room.game.lock().await;
        game.mark_disconnected(player_id);
        let gs = game.public();
        drop(game);
        room.broadcast(ServerMsg::State(gs));
    }
}

fn error_reply(code: &str, e: GameError) -> ServerMsg {
    match e {
        GameError::InvariantViolation(_) => {
            tracing::error!(room = %code, error = %e, "internal invariant violation");
            internal_error()
        }
        other => ServerMsg::Error(other.to_string()),
    }
}

fn internal_error() -> ServerMsg {
    ServerMsg::Error("internal server error".to_owned())
}

fn color_output() -> bool {
    std::io::stdout().is_terminal()
}
