//! Per-connection session state machine
//!
//! A session starts `Unjoined`, becomes `Joined` after its first valid
//! `join`, and ends `Closed` once the transport reports the connection gone.
//! Each inbound message takes the registry lock for its whole
//! read-modify-write, so handlers never interleave on shared player state.

use log::{debug, error, info, warn};
use std::fmt;
use warp::ws::Message;

use crate::core::broadcast::{broadcast, send_to};
use crate::core::connection::Connection;
use crate::core::id::generate_player_id;
use crate::core::message_types::{ClientMessage, ServerMessage};
use crate::core::player::{Player, Vec3};
use crate::core::registry::{lock_registry, PlayerRegistry, Registry};
use crate::error::{RealmError, Result};

/// Join state of one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unjoined,
    Joined(String),
    Closed,
}

/// Interprets inbound messages for a single connection
pub struct Session {
    connection: Connection,
    registry: Registry,
    state: SessionState,
}

impl Session {
    pub fn new(connection: Connection, registry: Registry) -> Self {
        Self {
            connection,
            registry,
            state: SessionState::Unjoined,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Id of the player owned by this session, once joined
    pub fn player_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Joined(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Feed one raw WebSocket frame into the session
    pub fn handle_frame(&mut self, frame: &Message) {
        if frame.is_close() {
            self.close();
        } else if frame.is_text() || frame.is_binary() {
            match std::str::from_utf8(frame.as_bytes()) {
                Ok(text) => self.handle_text(text),
                Err(e) => warn!(
                    "Ignoring non UTF-8 frame from connection {}: {}",
                    self.connection.id, e
                ),
            }
        }
    }

    /// Parse and dispatch one textual message. Never fails: bad input is logged and dropped.
    pub fn handle_text(&mut self, text: &str) {
        if self.is_closed() {
            debug!(
                "Dropping message on closed connection {}",
                self.connection.id
            );
            return;
        }

        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    "Ignoring malformed message from connection {}: {}",
                    self.connection.id, e
                );
                return;
            }
        };

        let kind = message.kind();
        match self.handle_message(message) {
            Ok(()) => {}
            Err(e @ (RealmError::InvalidState(_) | RealmError::PlayerNotFound(_))) => {
                debug!(
                    "Ignored {} from connection {}: {}",
                    kind, self.connection.id, e
                );
            }
            Err(e) => {
                warn!(
                    "Failed to process {} from connection {}: {}",
                    kind, self.connection.id, e
                );
            }
        }
    }

    /// Dispatch a decoded client message against the current state
    pub fn handle_message(&mut self, message: ClientMessage) -> Result<()> {
        match message {
            ClientMessage::Join { username, position } => {
                self.handle_join(username, position.unwrap_or_default())
            }
            ClientMessage::Move { position, rotation } => self.handle_move(position, rotation),
            ClientMessage::Gather { resource, amount } => {
                let player_id = self.joined_id()?;
                let registry = lock_registry(&self.registry)?;
                if !registry.contains(&player_id) {
                    return Err(RealmError::PlayerNotFound(player_id));
                }

                self.reply(&ServerMessage::ResourceGathered {
                    player_id: player_id.clone(),
                    resource: resource.clone(),
                    amount: amount.clone(),
                });
                info!("Player {} gathered {} {}", player_id, amount, resource);
                Ok(())
            }
            ClientMessage::Attack { target_id } => {
                let target_id = target_id.ok_or_else(|| {
                    RealmError::MessageParseError("attack without targetId".to_string())
                })?;
                self.handle_attack(target_id)
            }
        }
    }

    fn handle_join(&mut self, username: String, position: Vec3) -> Result<()> {
        match &self.state {
            SessionState::Unjoined => {}
            SessionState::Joined(id) => {
                warn!(
                    "Rejecting second join on connection {} (already player {})",
                    self.connection.id, id
                );
                return Err(RealmError::InvalidState(format!(
                    "connection already joined as {}",
                    id
                )));
            }
            SessionState::Closed => {
                return Err(RealmError::InvalidState("connection closed".to_string()));
            }
        }

        let mut registry = lock_registry(&self.registry)?;

        let player_id = loop {
            let candidate = generate_player_id();
            if !registry.contains(&candidate) {
                break candidate;
            }
        };

        let player = Player::new(
            player_id.clone(),
            username,
            position,
            self.connection.clone(),
        );
        let view = player.view();
        registry.insert(player)?;
        self.state = SessionState::Joined(player_id.clone());

        self.reply(&ServerMessage::Welcome {
            player_id: player_id.clone(),
        });
        self.reply(&ServerMessage::Players {
            players: registry.snapshot_excluding(&player_id),
        });

        let username = view.username.clone();
        Self::broadcast_logged(
            &registry,
            &ServerMessage::PlayerJoined {
                player_id: player_id.clone(),
                player: view,
            },
            Some(&player_id),
        );

        info!("Player {} joined (ID: {})", username, player_id);
        info!("Players online: {}", registry.len());
        Ok(())
    }

    fn handle_move(&mut self, position: Vec3, rotation: Vec3) -> Result<()> {
        let player_id = self.joined_id()?;
        let mut registry = lock_registry(&self.registry)?;

        registry
            .get_mut(&player_id)
            .ok_or_else(|| RealmError::PlayerNotFound(player_id.clone()))?
            .apply_move(position, rotation);

        Self::broadcast_logged(
            &registry,
            &ServerMessage::PlayerMove {
                player_id: player_id.clone(),
                position,
                rotation,
            },
            Some(&player_id),
        );
        Ok(())
    }

    fn handle_attack(&mut self, target_id: String) -> Result<()> {
        let attacker_id = self.joined_id()?;
        let mut registry = lock_registry(&self.registry)?;

        if !registry.contains(&attacker_id) {
            return Err(RealmError::PlayerNotFound(attacker_id));
        }

        let target = registry
            .get_mut(&target_id)
            .ok_or_else(|| RealmError::PlayerNotFound(target_id.clone()))?;
        let health = target.take_hit();
        let eliminated = target.is_eliminated();

        let hit = ServerMessage::PlayerHit {
            player_id: target_id.clone(),
            health,
            attacker_id: attacker_id.clone(),
        };
        if let Err(e) = send_to(&target.connection, &hit) {
            warn!("Failed to notify player {} of hit: {}", target_id, e);
        }

        Self::broadcast_logged(
            &registry,
            &ServerMessage::HealthUpdate {
                player_id: target_id.clone(),
                health,
            },
            None,
        );

        info!(
            "Player {} attacked {} (HP: {})",
            attacker_id, target_id, health
        );
        if eliminated {
            info!("Player {} was eliminated", target_id);
        }
        Ok(())
    }

    /// Handle the transport reporting the connection closed. Idempotent.
    pub fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Closed);
        let SessionState::Joined(player_id) = previous else {
            return;
        };

        let mut registry = match lock_registry(&self.registry) {
            Ok(registry) => registry,
            Err(e) => {
                error!(
                    "Failed to acquire registry lock to remove player {}: {}",
                    player_id, e
                );
                return;
            }
        };

        let Some(player) = registry.remove(&player_id) else {
            warn!("Player {} was already gone from the registry", player_id);
            return;
        };

        Self::broadcast_logged(
            &registry,
            &ServerMessage::PlayerLeft {
                player_id: player_id.clone(),
            },
            None,
        );

        info!(
            "Player {} left after {:?}",
            if player.username.is_empty() {
                &player_id
            } else {
                &player.username
            },
            self.connection.connection_duration()
        );
        info!("Players online: {}", registry.len());
    }

    /// Record a transport error. Removal only happens on close.
    pub fn transport_error(&self, err: &dyn fmt::Display) {
        error!(
            "WebSocket error on connection {} ({}): {}",
            self.connection.id,
            self.player_id().unwrap_or("unjoined"),
            err
        );
    }

    fn joined_id(&self) -> Result<String> {
        match &self.state {
            SessionState::Joined(id) => Ok(id.clone()),
            SessionState::Unjoined => {
                Err(RealmError::InvalidState("connection has not joined".to_string()))
            }
            SessionState::Closed => {
                Err(RealmError::InvalidState("connection closed".to_string()))
            }
        }
    }

    fn reply(&self, message: &ServerMessage) {
        if let Err(e) = send_to(&self.connection, message) {
            warn!("Failed to reply on connection {}: {}", self.connection.id, e);
        }
    }

    fn broadcast_logged(
        registry: &PlayerRegistry,
        message: &ServerMessage,
        exclude_id: Option<&str>,
    ) {
        match broadcast(registry, message, exclude_id) {
            Ok(stats) => debug!(
                "Broadcast to {} of {} players ({} skipped, {} failed, {:.0}% delivered)",
                stats.sent_count,
                stats.total_recipients,
                stats.skipped_count,
                stats.failed_count(),
                stats.success_rate() * 100.0
            ),
            Err(e) => error!("Failed to broadcast message: {}", e),
        }
    }
}
