use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::rooms::RoomRegistry;

/// Shared application state exposed to handlers.
#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomRegistry,
    /// Authoritative configuration of the running server.
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            config: Arc::new(RwLock::new(config)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
