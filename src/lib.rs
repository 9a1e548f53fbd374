//! Rusty Realm - A real-time multiplayer session server implemented in Rust
//!
//! This library provides the player registry, per-connection session
//! handling and event fan-out for a WebSocket game server.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;

// Re-export main components
pub use config::*;
pub use constants::*;
