pub mod cli;
pub mod config;
pub mod game;
pub mod pretty;
pub mod rooms;
pub mod server;
