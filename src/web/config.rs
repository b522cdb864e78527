//! Web server configuration.

use crate::{DEFAULT_LISTEN_ADDR, LISTEN_ADDR_ENV};
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the metrics endpoint server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Address the server binds to, as `host:port`
    pub listen: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl WebConfig {
    /// Create a configuration with an explicit listen address.
    pub fn new(listen: impl Into<String>) -> Self {
        Self {
            listen: listen.into(),
        }
    }

    /// Build the configuration from `BME280_EXPORTER_ADDRESS`.
    ///
    /// An absent or empty variable falls back to the default address, it is
    /// never an error.
    pub fn from_env() -> Self {
        match env::var(LISTEN_ADDR_ENV) {
            Ok(addr) if !addr.is_empty() => Self::new(addr),
            _ => Self::default(),
        }
    }

    /// Set the listen address.
    pub fn with_listen(mut self, listen: impl Into<String>) -> Self {
        self.listen = listen.into();
        self
    }
}
