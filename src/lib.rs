//! PayTrace client: typed requests for the PayTrace payment gateway.
//!
//! A client-side convenience layer over the gateway's key/value HTTP API. The
//! crate builds correctly-shaped requests for named transaction types,
//! validates them against static field schemas before anything touches the
//! network, serializes them to the `PARMLIST` wire format, and parses the
//! gateway's flat `KEY~VALUE|` reply into a structured [`Response`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Host program   │  picks a TransactionType, fills in fields
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────────────────────────────────────┐
//! │           paytrace-client (this crate)           │
//! │  ┌───────────────┐       ┌────────────────────┐  │
//! │  │ Schema        │──────▶│ Request            │  │
//! │  │ registry      │ rules │ validate + encode  │  │
//! │  └───────────────┘       └─────────┬──────────┘  │
//! │  ┌───────────────┐       ┌─────────▼──────────┐  │
//! │  │ Credential    │──────▶│ Transport          │  │
//! │  │ context       │ merge │ blocking POST      │  │
//! │  └───────────────┘       └─────────┬──────────┘  │
//! │                          ┌─────────▼──────────┐  │
//! │                          │ Response decoder   │  │
//! │                          └────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//!          │ HTTPS, application/x-www-form-urlencoded
//! ┌────────▼─────────┐
//! │ PayTrace gateway │
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paytrace_client::{GatewayConfig, PayTraceClient, Request, TransactionType};
//!
//! # fn example() -> paytrace_client::Result<()> {
//! let mut client = PayTraceClient::new(&GatewayConfig::default())?;
//! client.set_credentials("demo123", "demo123");
//!
//! // Authorize a dollar against the demo card.
//! let authorization = Request::with_fields(TransactionType::Authorization, &[
//!     ("amount", "1.00"),
//!     ("cc", "4012881888818888"),
//!     ("expmnth", "01"),
//!     ("expyr", "15"),
//!     ("csc", "999"),
//! ])?;
//! let response = client.submit(&authorization)?;
//!
//! // Chain the returned transaction ID into a void.
//! if let Some(transaction_id) = response.transaction_id() {
//!     let void =
//!         Request::with_fields(TransactionType::Void, &[("tranxid", transaction_id)])?;
//!     client.submit(&void)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`schema`]: transaction types and the static field-requirement registry
//! - [`request`]: schema-bound request construction, validation and encoding
//! - [`response`]: decoder for the gateway's flat key/value replies
//! - [`credentials`]: the process-lifetime credential context
//! - [`transport`]: blocking HTTP delivery behind a swappable trait
//! - [`client`]: the submission flow tying the pieces together
//! - [`config`]: TOML-deserializable endpoint and transport settings
//! - [`error`]: typed error taxonomy
//!
//! # Error Handling
//!
//! Every fallible operation returns [`Result`]. Schema misuse
//! ([`GatewayError::SchemaNotFound`], [`GatewayError::UnknownField`]) is a
//! programmer error; validation and credential failures are recoverable;
//! transport and decode failures propagate unchanged. A gateway-level decline
//! is NOT an error: the call succeeds and the caller inspects
//! [`Response::code`].
//!
//! # Concurrency
//!
//! Single-caller, synchronous, blocking. The schema registry is immutable
//! after initialization and safe for concurrent reads; the credential context
//! is the one piece of mutable state, and hosts using threads must serialize
//! writes to it or give each thread its own client.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod request;
pub mod response;
pub mod schema;
pub mod transport;

pub use client::PayTraceClient;
pub use config::{DEFAULT_API_URL, GatewayConfig};
pub use credentials::{CredentialContext, Credentials};
pub use error::{GatewayError, Result, ValidationError};
pub use request::Request;
pub use response::Response;
pub use schema::{FieldDef, FieldRule, Registry, TransactionType, TypeSchema};
pub use transport::{HttpConfig, HttpTransport, Transport};
