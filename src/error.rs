//! Error types for the PayTrace client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`]. The crate performs no silent recovery: every failure
//! is surfaced to the caller as a typed error, and gateway-level business
//! outcomes (e.g. a declined card) are NOT errors: a decoded
//! [`Response`](crate::Response) carrying a decline code is a successful call.
//!
//! # Error Categories
//!
//! - **Schema errors** ([`GatewayError::SchemaNotFound`],
//!   [`GatewayError::UnknownField`]): programmer errors, fatal to the call
//! - **Validation errors** ([`ValidationError`]): recoverable; fill in the
//!   missing fields and validate again
//! - **Credential errors** ([`GatewayError::MissingCredentials`]): recoverable
//!   by setting credentials and resubmitting
//! - **Transport errors** ([`GatewayError::Http`],
//!   [`GatewayError::Transport`]): network-layer failures, propagated
//!   unchanged and never retried by the core
//! - **Decode errors** ([`GatewayError::Decode`]): the raw reply could not be
//!   parsed; the offending snippet is preserved for diagnosis

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while building, submitting, or decoding a gateway
/// exchange.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No schema is registered for the requested transaction type.
    ///
    /// This must never occur for the statically-defined types; it guards
    /// lookups by wire name and future registry extensions.
    #[error("no schema registered for transaction type '{0}'")]
    SchemaNotFound(String),

    /// A field name is not recognized for the bound transaction type.
    ///
    /// Raised on construction and on [`set_field`](crate::Request::set_field)
    /// so that typos fail loudly instead of being silently dropped by the
    /// gateway.
    #[error("unrecognized field '{0}'")]
    UnknownField(String),

    /// The request does not satisfy its schema.
    ///
    /// Recoverable: fill in the missing fields and validate again.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submission was attempted with no active credentials.
    ///
    /// The check runs before any network activity; set credentials on the
    /// client and resubmit.
    #[error("credentials are not set; call set_credentials before submitting")]
    MissingCredentials,

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and TLS
    /// failures. The core does not retry; that is a caller decision.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-level failure outside the HTTP client itself, such as a
    /// non-success status from the gateway host.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The raw response body could not be parsed into key/value pairs.
    ///
    /// Carries a bounded snippet of the offending body; the decoder never
    /// guesses a partial result.
    #[error("malformed gateway response: {snippet:?}")]
    Decode {
        /// Leading portion of the body that failed to parse.
        snippet: String,
    },

    /// Invalid client configuration (endpoint URL, transport bounds).
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

/// Schema validation failures raised by [`validate`](crate::Request::validate).
///
/// Validation is pure and repeatable: calling it twice with no mutation in
/// between yields the same result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A `Required` field is absent or empty.
    ///
    /// An empty string counts as "provided but empty" and does not satisfy
    /// the rule.
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// No member of a required group of alternative fields is present.
    ///
    /// Providing any one member satisfies the group; providing several is not
    /// an error at this layer.
    #[error("missing required group '{group}': provide one of {members:?}")]
    MissingRequiredGroup {
        /// Group identifier from the schema (e.g. `payment`).
        group: String,
        /// Every member field that could satisfy the group.
        members: Vec<String>,
    },
}
