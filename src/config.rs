//! Server configuration

use crate::protocol;
use std::time::Duration;
use tracing::warn;

/// Listener and polling configuration for one session.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the command channel (request/response).
    pub command_port: u16,
    /// Port for the exit channel (cancellation signal only).
    pub exit_port: u16,
    /// Sleep per iteration of every polling loop.
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command_port: protocol::COMMAND_PORT,
            exit_port: protocol::EXIT_PORT,
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment, falling back to defaults.
    /// Recognised variables: `EV3_BRIDGE_COMMAND_PORT`,
    /// `EV3_BRIDGE_EXIT_PORT`, `EV3_BRIDGE_POLL_INTERVAL_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = env_parse::<u16>("EV3_BRIDGE_COMMAND_PORT") {
            config.command_port = port;
        }
        if let Some(port) = env_parse::<u16>("EV3_BRIDGE_EXIT_PORT") {
            config.exit_port = port;
        }
        if let Some(ms) = env_parse::<u64>("EV3_BRIDGE_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(ms);
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(%name, %value, "ignoring unparseable environment override");
            None
        }
    }
}
