//! Transport configuration types.
//!
//! TOML-deserializable settings for the HTTP transport, with serde defaults
//! and explicit bounds validation.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// HTTP transport configuration.
///
/// # Examples
///
/// ```toml
/// [transport]
/// timeout_secs = 60
/// connect_timeout_secs = 10
/// pool_max_idle_per_host = 10
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(GatewayError::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(GatewayError::Config(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_pool_max_idle() -> usize {
    10
}

// The gateway is slow to answer under settlement load; give it a minute.
fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}
