//! Event fan-out to registered players
//!
//! Every event is serialized exactly once and the same text is delivered to
//! each eligible connection. Closed connections are skipped but left in the
//! registry; removal only happens when the owning session sees its close.

use log::trace;

use crate::core::connection::Connection;
use crate::core::message_types::ServerMessage;
use crate::core::registry::PlayerRegistry;
use crate::error::{RealmError, Result};

/// Statistics for broadcast operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastStats {
    /// Registry entries considered, after the exclusion
    pub total_recipients: usize,
    pub sent_count: usize,
    /// Entries whose connection was no longer open
    pub skipped_count: usize,
}

impl BroadcastStats {
    pub fn failed_count(&self) -> usize {
        self.total_recipients - self.sent_count - self.skipped_count
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_recipients == 0 {
            1.0
        } else {
            self.sent_count as f64 / self.total_recipients as f64
        }
    }
}

/// Serialize a server message to its wire text
pub fn encode(message: &ServerMessage) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

/// Deliver `message` to every open connection in the registry except `exclude_id`
pub fn broadcast(
    registry: &PlayerRegistry,
    message: &ServerMessage,
    exclude_id: Option<&str>,
) -> Result<BroadcastStats> {
    let payload = encode(message)?;
    let mut stats = BroadcastStats::default();

    registry.for_each(|id, player| {
        if exclude_id == Some(id) {
            return;
        }
        stats.total_recipients += 1;

        if !player.connection.is_open() {
            trace!("Skipping closed connection for player {}", id);
            stats.skipped_count += 1;
            return;
        }

        if player.connection.send_text(&payload) {
            stats.sent_count += 1;
        }
    });

    Ok(stats)
}

/// Send a single message directly to one connection
pub fn send_to(connection: &Connection, message: &ServerMessage) -> Result<()> {
    let payload = encode(message)?;
    if connection.send_text(&payload) {
        Ok(())
    } else {
        Err(RealmError::ConnectionError(format!(
            "Failed to deliver message to connection {}",
            connection.id
        )))
    }
}
