//! WebSocket connection management
//! Handles the sending side of a client connection

use log::warn;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;
use warp::ws::Message;

/// Sending handle for a single WebSocket connection.
///
/// Frames pushed here are drained into the socket by the connection's
/// forwarding task. Cloning yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: String,
    pub sender: mpsc::UnboundedSender<Message>,
    pub connected_at: Instant,
}

impl Connection {
    /// Create a new connection with a unique ID
    pub fn new(sender: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            connected_at: Instant::now(),
        }
    }

    /// Whether the forwarding side of this connection is still alive
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Send a text message through this connection
    pub fn send_text(&self, text: &str) -> bool {
        match self.sender.send(Message::text(text)) {
            Ok(_) => true,
            Err(_) => {
                warn!("Failed to send message to connection {}", self.id);
                false
            }
        }
    }

    /// Ask the client to close the connection
    pub fn close(&self) -> bool {
        self.sender.send(Message::close()).is_ok()
    }

    /// Calculate the connection duration
    pub fn connection_duration(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_text_reaches_receiver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection = Connection::new(tx);

        assert!(connection.is_open());
        assert!(connection.send_text("hello"));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.to_str().unwrap(), "hello");
    }

    #[test]
    fn test_dropped_receiver_marks_connection_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Connection::new(tx);
        drop(rx);

        assert!(!connection.is_open());
        assert!(!connection.send_text("lost"));
    }

    #[test]
    fn test_clones_share_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection = Connection::new(tx);
        let clone = connection.clone();

        assert_eq!(connection.id, clone.id);
        assert!(clone.close());
        assert!(rx.try_recv().unwrap().is_close());
    }
}
