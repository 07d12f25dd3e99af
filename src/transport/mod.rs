//! Transport adapter for delivering wire payloads to the gateway.
//!
//! The core treats delivery as an opaque blocking call: hand the adapter an
//! encoded payload, get the raw reply body back unmodified. TLS, timeouts and
//! connection reuse live behind the [`Transport`] trait; hosts and tests can
//! substitute their own implementation.

pub mod config;

pub use config::HttpConfig;

use std::fmt;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{GatewayError, Result};

/// Blocking delivery of one encoded request.
///
/// Implementations must POST the payload as the complete request body and
/// return the raw reply body without interpretation. No retries: a failed
/// exchange surfaces as an error exactly once.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends `wire_payload` to `endpoint` and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] for HTTP-client failures and
    /// [`GatewayError::Transport`] for non-success status codes.
    fn send(&self, endpoint: &Url, wire_payload: &str) -> Result<String>;
}

/// HTTP transport over a pooled blocking client.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if client construction fails.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] for out-of-bounds settings and
    /// [`GatewayError::Http`] if client construction fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, endpoint: &Url, wire_payload: &str) -> Result<String> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(wire_payload.to_owned())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!("gateway returned status {status}")));
        }

        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_with_default_config() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn test_transport_rejects_invalid_config() {
        let config =
            HttpConfig { pool_max_idle_per_host: 10, timeout_secs: 0, connect_timeout_secs: 10 };
        assert!(matches!(
            HttpTransport::with_config(&config).unwrap_err(),
            GatewayError::Config(_)
        ));
    }
}
