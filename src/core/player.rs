//! Player state held by the registry

use serde::{Deserialize, Serialize};

use crate::constants::{ATTACK_DAMAGE, MAX_HEALTH};
use crate::core::connection::Connection;

/// A point or orientation on three axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Public fields of a player, as shared with other clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub username: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub health: u32,
}

/// Server-side record of one joined participant
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub username: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub health: u32,
    pub connection: Connection,
}

impl Player {
    /// Create a freshly joined player at full health facing the origin
    pub fn new(id: String, username: String, position: Vec3, connection: Connection) -> Self {
        Self {
            id,
            username,
            position,
            rotation: Vec3::ORIGIN,
            health: MAX_HEALTH,
            connection,
        }
    }

    /// Overwrite position and rotation; last write wins
    pub fn apply_move(&mut self, position: Vec3, rotation: Vec3) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Apply one attack and return the remaining health
    pub fn take_hit(&mut self) -> u32 {
        self.health = self.health.saturating_sub(ATTACK_DAMAGE);
        self.health
    }

    pub fn is_eliminated(&self) -> bool {
        self.health == 0
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            username: self.username.clone(),
            position: self.position,
            rotation: self.rotation,
            health: self.health,
        }
    }
}
