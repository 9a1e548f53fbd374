//! Server configuration module
//! Handles dynamic configuration parameters for the realm server

use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE_MS,
};
use crate::error::{RealmError, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest inbound WebSocket frame accepted, in bytes
    pub max_message_size: usize,
    /// Time given to close frames to flush before the process exits
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            shutdown_grace: Duration::from_millis(DEFAULT_SHUTDOWN_GRACE_MS),
        }
    }
}

impl ServerConfig {
    /// Create a test configuration bound to localhost
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_message_size: 1024,
            shutdown_grace: Duration::from_millis(10),
        }
    }

    /// Read and parse an optional environment variable
    fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
                RealmError::ConfigError(format!("{} has an invalid value: '{}'", name, raw))
            }),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(RealmError::ConfigError(format!("{}: {}", name, e))),
        }
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("RUSTY_REALM_HOST").unwrap_or(defaults.host);
        let port = Self::parse_var("RUSTY_REALM_PORT")?.unwrap_or(defaults.port);

        let max_message_size = Self::parse_var("RUSTY_REALM_MAX_MESSAGE_SIZE")?
            .unwrap_or(defaults.max_message_size);

        let shutdown_grace = Self::parse_var::<u64>("RUSTY_REALM_SHUTDOWN_GRACE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.shutdown_grace);

        let config = Self {
            host,
            port,
            max_message_size,
            shutdown_grace,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check that the configuration can actually be served
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RealmError::ConfigError("host must not be empty".to_string()));
        }

        if self.max_message_size == 0 {
            return Err(RealmError::ConfigError(
                "max message size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Address string suitable for parsing into a `SocketAddr`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
