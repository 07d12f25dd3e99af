//! Gateway account credentials.
//!
//! The two authentication tokens the gateway demands on every request live in
//! an explicit [`CredentialContext`] owned by the client, not in module
//! globals. The context is read at send time; overwriting it affects every
//! subsequently submitted request but never one already in flight. Hosts that
//! share a client across threads must serialize writes themselves or give
//! each thread its own context.

use std::fmt;

/// A username/password pair for a gateway account.
///
/// The password is redacted from `Debug` output so credentials can appear in
/// logs and error context without leaking.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Holder of the currently active credentials.
///
/// Starts empty; submission fails fast with
/// [`MissingCredentials`](crate::GatewayError::MissingCredentials) until
/// [`set`](Self::set) is called.
#[derive(Debug, Default)]
pub struct CredentialContext {
    current: Option<Credentials>,
}

impl CredentialContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs credentials, overwriting any previous pair.
    pub fn set(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.current = Some(Credentials::new(username, password));
    }

    /// The active credentials, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Credentials> {
        self.current.as_ref()
    }

    /// Removes the active credentials.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_starts_empty() {
        let context = CredentialContext::new();
        assert!(context.current().is_none());
    }

    #[test]
    fn test_set_and_read_back() {
        let mut context = CredentialContext::new();
        context.set("demo123", "demo123");
        let credentials = context.current().unwrap();
        assert_eq!(credentials.username(), "demo123");
        assert_eq!(credentials.password(), "demo123");
    }

    #[test]
    fn test_set_overwrites() {
        let mut context = CredentialContext::new();
        context.set("first", "one");
        context.set("second", "two");
        assert_eq!(context.current().unwrap().username(), "second");
    }

    #[test]
    fn test_clear_removes_credentials() {
        let mut context = CredentialContext::new();
        context.set("demo123", "demo123");
        context.clear();
        assert!(context.current().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("merchant", "s3cret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("merchant"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
