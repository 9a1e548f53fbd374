// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const WS_PATH: &str = "ws";
pub const HEALTH_PATH: &str = "health";

// Transport limits
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 250;

// Gameplay constants
pub const MAX_HEALTH: u32 = 100;
pub const ATTACK_DAMAGE: u32 = 10;

// Player identifiers look like `player_<millis>_<suffix>`
pub const PLAYER_ID_PREFIX: &str = "player";
pub const PLAYER_ID_SUFFIX_LEN: usize = 9;
