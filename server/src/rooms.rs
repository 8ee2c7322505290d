//! Room registry: creates and looks up game engines by short room code.
//!
//! Each room couples its engine with a broadcast channel so transports can
//! fan out snapshots to every member. Commands targeting one room serialize
//! on the room's mutex; different rooms never share state.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex, RwLock};

use firedeck_shared::{GamePhase, PlayerId, ServerMsg};

use crate::game::Game;

/// Length of a room code.
pub const CODE_LEN: usize = 4;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const CHANNEL_BUFFER_SIZE: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("room not found")]
    RoomNotFound,
    #[error("the game has already started")]
    GameAlreadyStarted,
}

/// One live room: the engine plus its outbound event channel.
pub struct Room {
    pub code: String,
    pub game: Mutex<Game>,
    events: broadcast::Sender<ServerMsg>,
}

impl Room {
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMsg> {
        self.events.subscribe()
    }

    /// Send to every subscribed member. A room with no listeners simply
    /// drops the message.
    pub fn broadcast(&self, msg: ServerMsg) {
        let _ = self.events.send(msg);
    }
}

/// Registry of all live rooms, shared across transports.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<RwLock<HashMap<String, Arc<Room>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with the host as its sole player. Codes are retried
    /// until one is free, so short codes stay collision-safe.
    pub async fn create_room(
        &self,
        host_name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> (Arc<Room>, PlayerId) {
        let mut rooms = self.rooms.write().await;
        let code = loop {
            let candidate = generate_code();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        let mut game = Game::new(code.clone());
        let host = game.add_player(host_name, avatar);
        let (events, _) = broadcast::channel(CHANNEL_BUFFER_SIZE);
        let room = Arc::new(Room {
            code: code.clone(),
            game: Mutex::new(game),
            events,
        });
        rooms.insert(code, Arc::clone(&room));
        tracing::info!(room = %room.code, "room created");
        (room, host)
    }

    pub async fn room(&self, code: &str) -> Option<Arc<Room>> {
        self.rooms.read().await.get(code).cloned()
    }

    /// Join an existing lobby. Late joins are refused once play has begun.
    pub async fn join_room(
        &self,
        code: &str,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<(Arc<Room>, PlayerId), RoomError> {
        let room = self.room(code).await.ok_or(RoomError::RoomNotFound)?;
        let mut game = room.game.lock().await;
        if game.phase() != GamePhase::Lobby {
            return Err(RoomError::GameAlreadyStarted);
        }
        let player = game.add_player(name, avatar);
        drop(game);
        Ok((room, player))
    }

    /// Remove a player via the engine, dropping the room once it empties.
    /// Returns the room if it survived, for follow-up broadcasts.
    pub async fn remove_player(&self, code: &str, player: PlayerId) -> Option<Arc<Room>> {
        let room = self.room(code).await?;
        let mut game = room.game.lock().await;
        game.remove_player(player);
        let empty = game.is_empty();
        drop(game);
        if empty {
            self.rooms.write().await.remove(code);
            tracing::info!(room = %code, "room dropped, no players left");
            return None;
        }
        Some(room)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }
}

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
