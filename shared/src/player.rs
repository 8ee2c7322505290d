//! Player identifiers and the public player view.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a room.
///
/// Allocated from a per-room monotonic counter, so ids stay stable for the
/// lifetime of the room even as players come and go in the lobby.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

impl From<u64> for PlayerId {
    fn from(v: u64) -> Self {
        PlayerId(v)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public view of a player's state (what every room member can see).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub is_host: bool,
    pub is_connected: bool,
    /// Shield tokens held (each one is a retained queen).
    pub shields: u32,
    /// Cumulative sips consumed. Telemetry only, never rule-affecting.
    pub sips: u32,
}
