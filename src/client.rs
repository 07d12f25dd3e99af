//! Gateway client: credentials, transport and the submission flow.

use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    config::GatewayConfig,
    credentials::CredentialContext,
    error::{GatewayError, Result},
    request::Request,
    response::Response,
    transport::{HttpTransport, Transport},
};

/// Client for the gateway's key/value API.
///
/// Owns the endpoint, a boxed [`Transport`], the active
/// [`CredentialContext`] and a test-mode flag. One submission is one blocking
/// request/response exchange; there is no queueing, retrying or caching.
///
/// # Examples
///
/// ```rust,no_run
/// use paytrace_client::{GatewayConfig, PayTraceClient, Request, TransactionType};
///
/// # fn example() -> paytrace_client::Result<()> {
/// let mut client = PayTraceClient::new(&GatewayConfig::default())?;
/// client.set_credentials("demo123", "demo123");
///
/// let request = Request::with_fields(TransactionType::Authorization, &[
///     ("amount", "1.00"),
///     ("cc", "4012881888818888"),
///     ("expmnth", "01"),
///     ("expyr", "15"),
/// ])?;
///
/// let response = client.submit(&request)?;
/// println!("approved: {}", response.is_approved());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PayTraceClient {
    endpoint: Url,
    transport: Box<dyn Transport>,
    credentials: CredentialContext,
    test_mode: bool,
}

impl PayTraceClient {
    /// Creates a client with an HTTP transport built from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] for an invalid endpoint or transport
    /// bounds, and [`GatewayError::Http`] if client construction fails.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.transport)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the endpoint URL is invalid.
    pub fn with_transport(config: &GatewayConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let endpoint = config.endpoint()?;
        Ok(Self { endpoint, transport, credentials: CredentialContext::new(), test_mode: false })
    }

    /// Installs account credentials, overwriting any previous pair.
    ///
    /// Affects every subsequently submitted request, never one in flight.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.set(username, password);
    }

    /// Removes the active credentials; submission fails fast until new ones
    /// are installed.
    pub fn clear_credentials(&mut self) {
        self.credentials.clear();
    }

    /// Enables or disables gateway test mode.
    ///
    /// While enabled, transaction-processing requests carry `TEST~Y` and the
    /// gateway answers with standardized test responses without placing a
    /// hold on the customer's card.
    pub fn set_test_mode(&mut self, enabled: bool) {
        self.test_mode = enabled;
    }

    /// Whether test mode is enabled.
    #[must_use]
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// The configured gateway endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits one request: credential check, validation, encoding, delivery,
    /// decoding.
    ///
    /// A decoded decline is a successful call; inspect
    /// [`Response::code`]/[`Response::is_approved`] for the business outcome.
    /// Field values never appear in the traces emitted here.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCredentials`] (before any network
    /// activity), a [`ValidationError`](crate::ValidationError) wrapped in
    /// [`GatewayError::Validation`], a transport failure, or
    /// [`GatewayError::Decode`] if the reply cannot be parsed.
    #[instrument(
        skip(self, request),
        fields(method = request.schema().gateway_method(), tranx_type = %request.transaction_type())
    )]
    pub fn submit(&self, request: &Request) -> Result<Response> {
        let credentials = self.credentials.current().ok_or(GatewayError::MissingCredentials)?;
        request.validate()?;

        let payload = request.encode(credentials, self.test_mode);
        debug!(payload_bytes = payload.len(), "sending gateway request");

        let raw = self.transport.send(&self.endpoint, &payload)?;
        let response = Response::decode(&raw)?;
        info!(code = response.code(), approved = response.is_approved(), "gateway exchange complete");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{error::ValidationError, schema::TransactionType};

    /// Transport double that records payloads and answers from a script.
    #[derive(Debug, Default)]
    struct RecordingTransport {
        reply: String,
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingTransport {
        fn approving(sent: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                reply: "TRANSACTIONID~26303013|RESPONSE~101. Your transaction was successfully \
                        approved.|"
                    .to_owned(),
                sent,
            }
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, _endpoint: &Url, wire_payload: &str) -> Result<String> {
            self.sent.lock().unwrap().push(wire_payload.to_owned());
            Ok(self.reply.clone())
        }
    }

    fn client_with_recorder(sent: Arc<Mutex<Vec<String>>>) -> PayTraceClient {
        PayTraceClient::with_transport(
            &GatewayConfig::default(),
            Box::new(RecordingTransport::approving(sent)),
        )
        .unwrap()
    }

    #[test]
    fn test_submit_without_credentials_never_reaches_transport() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let client = client_with_recorder(Arc::clone(&sent));

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        let err = client.submit(&request).unwrap_err();

        assert!(matches!(err, GatewayError::MissingCredentials));
        assert!(sent.lock().unwrap().is_empty(), "transport was invoked");
    }

    #[test]
    fn test_submit_invalid_request_never_reaches_transport() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut client = client_with_recorder(Arc::clone(&sent));
        client.set_credentials("demo123", "demo123");

        let request = Request::new(TransactionType::Void).unwrap();
        let err = client.submit(&request).unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::MissingRequiredField(field)) if field == "tranxid"
        ));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_round_trip() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut client = client_with_recorder(Arc::clone(&sent));
        client.set_credentials("demo123", "demo123");

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        let response = client.submit(&request).unwrap();

        assert_eq!(response.transaction_id(), Some("26303013"));
        assert!(response.is_approved());

        let payloads = sent.lock().unwrap();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].starts_with("PARMLIST="));
    }

    #[test]
    fn test_resubmitting_is_not_suppressed() {
        // Deduping a resend is the caller's responsibility, never the core's.
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut client = client_with_recorder(Arc::clone(&sent));
        client.set_credentials("demo123", "demo123");

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        client.submit(&request).unwrap();
        client.submit(&request).unwrap();

        assert_eq!(sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_test_mode_reaches_the_wire() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut client = client_with_recorder(Arc::clone(&sent));
        client.set_credentials("demo123", "demo123");
        client.set_test_mode(true);

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        client.submit(&request).unwrap();

        let payloads = sent.lock().unwrap();
        assert!(payloads[0].contains("TEST%7EY"));
    }

    #[test]
    fn test_credentials_can_be_cleared() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut client = client_with_recorder(Arc::clone(&sent));
        client.set_credentials("demo123", "demo123");
        client.clear_credentials();

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        assert!(matches!(client.submit(&request).unwrap_err(), GatewayError::MissingCredentials));
    }

    #[test]
    fn test_malformed_reply_surfaces_decode_error() {
        #[derive(Debug)]
        struct GarbageTransport;

        impl Transport for GarbageTransport {
            fn send(&self, _endpoint: &Url, _wire_payload: &str) -> Result<String> {
                Ok("Service Unavailable".to_owned())
            }
        }

        let mut client =
            PayTraceClient::with_transport(&GatewayConfig::default(), Box::new(GarbageTransport))
                .unwrap();
        client.set_credentials("demo123", "demo123");

        let request = Request::with_fields(TransactionType::Void, &[("tranxid", "1539")]).unwrap();
        let err = client.submit(&request).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { snippet } if snippet.contains("Service")));
    }
}
