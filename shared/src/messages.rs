//! Client-server messaging protocol for Firedeck.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Direction, GamePhase, PendingAction};
use crate::player::{PlayerId, PlayerPublic};

/// Complete public snapshot of a room, broadcast after every mutating command.
///
/// The draw pile is exposed as a count only; its order and contents are the
/// secret state the engine protects and are never serialized. The discard
/// pile is public history, top card last.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomStatePublic {
    pub code: String,
    pub phase: GamePhase,
    pub players: Vec<PlayerPublic>,
    pub current_turn: PlayerId,
    pub direction: Direction,
    pub draw_count: usize,
    pub discard: Vec<Card>,
    pub aces_drawn: u8,
    pub pending: PendingAction,
    pub target: Option<PlayerId>,
    pub last_action: String,
}

impl RoomStatePublic {
    /// The visible card on top of the discard pile, if any.
    pub fn top_discard(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    /// Display name for a player id, for log and UI lines.
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("unknown")
    }
}

/// Messages that clients can send to the server.
///
/// The first message on a fresh connection must be `CreateRoom` or
/// `JoinRoom`; every later command names the room it targets.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMsg {
    CreateRoom {
        name: String,
    },
    JoinRoom {
        code: String,
        name: String,
    },
    StartGame {
        code: String,
    },
    DrawCard {
        code: String,
        player_id: PlayerId,
    },
    SelectTarget {
        code: String,
        player_id: PlayerId,
        target_id: PlayerId,
    },
    UseShield {
        code: String,
        player_id: PlayerId,
        use_it: bool,
    },
    /// Explicitly leave a room. Acknowledged with `Pong`; remaining members
    /// receive an updated `State`.
    LeaveRoom {
        code: String,
        player_id: PlayerId,
    },
    Ping,
}

/// Messages that the server can send to clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMsg {
    /// Direct reply to `CreateRoom`.
    RoomCreated {
        code: String,
        player: PlayerPublic,
    },
    /// Direct reply to `JoinRoom`.
    Joined {
        player: PlayerPublic,
        state: RoomStatePublic,
    },
    State(RoomStatePublic),
    /// Per-draw event for client-side animation, broadcast alongside the
    /// snapshot that reflects the draw.
    CardDrawn {
        player_id: PlayerId,
        card: Card,
        penalty: Option<String>,
    },
    Error(String),
    Pong,
}
