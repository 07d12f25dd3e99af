//! Client configuration.
//!
//! TOML-deserializable settings for the gateway endpoint and transport. The
//! defaults point at the production gateway; override `api_url` for a
//! sandbox host.

use serde::Deserialize;
use url::Url;

use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// Production gateway endpoint.
pub const DEFAULT_API_URL: &str = "https://paytrace.com/api/default.pay";

/// Root client configuration.
///
/// # Examples
///
/// ```
/// use paytrace_client::GatewayConfig;
///
/// let toml = r#"
///     api_url = "https://paytrace.com/api/default.pay"
///
///     [transport]
///     timeout_secs = 30
/// "#;
///
/// let config: GatewayConfig = toml::from_str(toml).unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub transport: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), transport: HttpConfig::default() }
    }
}

impl GatewayConfig {
    /// Validates the configuration.
    ///
    /// The endpoint must be an HTTPS URL that is not a localhost or loopback
    /// address: credentials ride on every request, so an accidental plaintext
    /// or local target is refused outright. Transport bounds are checked too.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming the offending value.
    pub fn validate(&self) -> Result<()> {
        self.endpoint()?;
        self.transport.validate()
    }

    /// Parses and validates the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the URL does not parse or fails
    /// the HTTPS/loopback checks.
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| GatewayError::Config(format!("invalid api_url '{}': {e}", self.api_url)))?;

        if url.scheme() != "https" {
            return Err(GatewayError::Config(format!(
                "api_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str() {
            let host_lower = host.to_lowercase();
            if host_lower == "localhost"
                || host_lower == "::1"
                || host_lower == "[::1]"
                || host_lower.starts_with("127.")
            {
                return Err(GatewayError::Config(format!(
                    "api_url must not be localhost or loopback: {host}"
                )));
            }
        }

        Ok(url)
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}
