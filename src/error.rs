use std::error::Error;
use std::fmt;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum RealmError {
    // Registry errors
    SessionLock(String),
    PlayerNotFound(String),
    DuplicatePlayer(String),

    // Connections errors
    ConnectionError(String),

    // Messages errors
    MessageParseError(String),

    // Session state errors
    InvalidState(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for RealmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionLock(msg) => write!(f, "Registry lock error: {}", msg),
            Self::PlayerNotFound(id) => write!(f, "Player not found: {}", id),
            Self::DuplicatePlayer(id) => write!(f, "Player already registered: {}", id),
            Self::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Self::MessageParseError(msg) => write!(f, "Message parse error: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid session state: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for RealmError {}

// Converting from PoisonError to facilitate poisoned mutex handling
impl<T> From<PoisonError<T>> for RealmError {
    fn from(err: PoisonError<T>) -> Self {
        RealmError::SessionLock(format!("Mutex poisoned: {}", err))
    }
}

impl From<serde_json::Error> for RealmError {
    fn from(err: serde_json::Error) -> Self {
        RealmError::MessageParseError(err.to_string())
    }
}

// Generic result type for the realm server
pub type Result<T> = std::result::Result<T, RealmError>;
