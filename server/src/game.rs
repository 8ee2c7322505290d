//! Room game engine. Pure state-transition logic driven by discrete
//! commands; knows nothing about sockets or rendering.
//!
//! Implementation split across sibling files: `engine` holds the state and
//! lifecycle commands, `deck` the pile management, `effects` the draw command
//! and rank rules, `turns` the turn-order and pending-action handling.

mod deck;
mod effects;
mod engine;
mod turns;

pub use engine::{DrawOutcome, Game, GameError};
