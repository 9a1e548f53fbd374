use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::connection::Connection;
use crate::core::player::{Player, PlayerView};
use crate::error::{RealmError, Result};

/// Authoritative collection of joined players, keyed by player id
pub struct PlayerRegistry {
    players: HashMap<String, Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    // Add a freshly joined player; ids must be unique
    pub fn insert(&mut self, player: Player) -> Result<()> {
        if self.players.contains_key(&player.id) {
            return Err(RealmError::DuplicatePlayer(player.id));
        }
        self.players.insert(player.id.clone(), player);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    // Remove a player, handing back its record
    pub fn remove(&mut self, id: &str) -> Option<Player> {
        self.players.remove(id)
    }

    /// Public view of every player except `id`, for initial sync
    pub fn snapshot_excluding(&self, id: &str) -> HashMap<String, PlayerView> {
        self.players
            .iter()
            .filter(|(player_id, _)| player_id.as_str() != id)
            .map(|(player_id, player)| (player_id.clone(), player.view()))
            .collect()
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &Player),
    {
        for (id, player) in &self.players {
            visitor(id, player);
        }
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.players.values().map(|player| &player.connection)
    }

    // Get current player count
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Thread-safe registry wrapper
pub type Registry = Arc<Mutex<PlayerRegistry>>;

// Create a new thread-safe registry
pub fn create_registry() -> Registry {
    Arc::new(Mutex::new(PlayerRegistry::new()))
}

/// Lock the registry, turning a poisoned mutex into a `SessionLock` error
pub fn lock_registry(registry: &Registry) -> Result<MutexGuard<'_, PlayerRegistry>> {
    registry.lock().map_err(RealmError::from)
}
