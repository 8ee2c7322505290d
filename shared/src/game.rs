//! Session phase and turn-flow types.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a room. `GameOver` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Lobby,
    Playing,
    GameOver,
}

/// A decision that blocks normal turn progression until resolved.
///
/// Only one pending action can be outstanding at a time: target selection
/// after a king, or the shield-use decision before a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PendingAction {
    None,
    TargetSelection,
    ShieldDecision,
}

/// Direction of play. Serialized as the signed turn step (+1 or -1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed step applied to the turn index on each advance.
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction, applied when a jack is drawn.
    pub fn flip(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> i8 {
        d.step() as i8
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(step: i8) -> Result<Self, Self::Error> {
        match step {
            1 => Ok(Direction::Clockwise),
            -1 => Ok(Direction::CounterClockwise),
            other => Err(format!("invalid direction step: {}", other)),
        }
    }
}
