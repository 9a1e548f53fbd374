//! Message types for the realm wire protocol

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::core::player::{PlayerView, Vec3};

/// Client-to-server message types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Enter the world
    Join {
        #[serde(default, deserialize_with = "any_username")]
        username: String,
        #[serde(default)]
        position: Option<Vec3>,
    },

    /// Report a new position and orientation
    Move { position: Vec3, rotation: Vec3 },

    /// Report a gathered resource. Both fields are passed through as sent.
    Gather {
        #[serde(default)]
        resource: Value,
        #[serde(default)]
        amount: Value,
    },

    /// Hit another player
    #[serde(rename_all = "camelCase")]
    Attack {
        #[serde(default)]
        target_id: Option<String>,
    },
}

/// Server-to-client message types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Join accepted
    #[serde(rename_all = "camelCase")]
    Welcome { player_id: String },

    /// Everyone else already in the world
    Players { players: HashMap<String, PlayerView> },

    /// Another player entered the world
    #[serde(rename_all = "camelCase")]
    PlayerJoined { player_id: String, player: PlayerView },

    /// Another player moved
    #[serde(rename_all = "camelCase")]
    PlayerMove {
        player_id: String,
        position: Vec3,
        rotation: Vec3,
    },

    /// Confirmation of a gather
    #[serde(rename_all = "camelCase")]
    ResourceGathered {
        player_id: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        resource: Value,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        amount: Value,
    },

    /// Sent to the target of an attack
    #[serde(rename_all = "camelCase")]
    PlayerHit {
        player_id: String,
        health: u32,
        attacker_id: String,
    },

    /// Authoritative health after an attack
    #[serde(rename_all = "camelCase")]
    HealthUpdate { player_id: String, health: u32 },

    /// A player disconnected
    #[serde(rename_all = "camelCase")]
    PlayerLeft { player_id: String },
}

// Usernames are display-only: null becomes empty, other scalars their JSON text
fn any_username<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl ClientMessage {
    /// Wire name of the message kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Move { .. } => "move",
            Self::Gather { .. } => "gather",
            Self::Attack { .. } => "attack",
        }
    }
}
