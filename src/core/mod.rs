//! Core functionality for the realm server

pub mod broadcast;
pub mod connection;
pub mod id;
pub mod message_types;
pub mod player;
pub mod registry;
pub mod server;
pub mod session;

// Re-export main components for convenience
pub use broadcast::{broadcast, send_to, BroadcastStats};
pub use connection::Connection;
pub use message_types::{ClientMessage, ServerMessage};
pub use player::{Player, PlayerView, Vec3};
pub use registry::{create_registry, lock_registry, PlayerRegistry, Registry};
pub use server::{create_game_server, GameServer, SharedGameServer};
pub use session::{Session, SessionState};
