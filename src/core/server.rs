//! Server service that owns the player registry and opens sessions

use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use warp::ws::Message as WsMessage;

use crate::core::connection::Connection;
use crate::core::registry::{create_registry, lock_registry, Registry};
use crate::core::session::Session;
use crate::error::Result;

/// Owns the shared registry and hands out per-connection sessions
pub struct GameServer {
    registry: Registry,
}

impl GameServer {
    /// Create a server with an empty registry
    pub fn new() -> Self {
        Self {
            registry: create_registry(),
        }
    }

    pub fn registry(&self) -> Registry {
        self.registry.clone()
    }

    /// Start a session for a newly accepted connection
    pub fn open_session(&self, sender: mpsc::UnboundedSender<WsMessage>) -> Session {
        Session::new(Connection::new(sender), self.registry.clone())
    }

    /// Number of currently joined players
    pub fn player_count(&self) -> Result<usize> {
        Ok(lock_registry(&self.registry)?.len())
    }

    /// Ask every joined client to close. Best effort; returns how many were notified.
    pub fn disconnect_all(&self) -> Result<usize> {
        let registry = lock_registry(&self.registry)?;
        let mut notified = 0;

        for connection in registry.connections() {
            if connection.is_open() && connection.close() {
                notified += 1;
            } else {
                warn!("Could not notify connection {} of shutdown", connection.id);
            }
        }

        info!("Sent close to {} of {} players", notified, registry.len());
        Ok(notified)
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe server handle
pub type SharedGameServer = Arc<GameServer>;

pub fn create_game_server() -> SharedGameServer {
    Arc::new(GameServer::new())
}
