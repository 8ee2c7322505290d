//! Wire-visible types shared between the Firedeck server and its clients.

pub mod cards;
pub mod game;
pub mod messages;
pub mod player;

pub use cards::{Card, Rank, Suit, DECK_SIZE};
pub use game::{Direction, GamePhase, PendingAction};
pub use messages::{ClientMsg, RoomStatePublic, ServerMsg};
pub use player::{PlayerId, PlayerPublic};
