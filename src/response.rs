//! Decoder for the gateway's flat key/value reply format.
//!
//! The gateway answers every request with pipe-delimited `KEY~VALUE` pairs,
//! for example:
//!
//! ```text
//! TRANSACTIONID~26303013|RESPONSE~101. Your transaction was successfully approved.|
//! ```
//!
//! Pair ordering is not guaranteed and unknown keys are preserved verbatim so
//! the decoder keeps working when the gateway adds fields. A reply the
//! decoder cannot split into pairs fails with
//! [`GatewayError::Decode`](crate::GatewayError::Decode); there is no partial
//! decode.

use std::collections::BTreeMap;

use crate::error::{GatewayError, Result};

/// Longest response prefix carried in a decode error.
const SNIPPET_LEN: usize = 100;

/// A decoded gateway reply.
///
/// Immutable once constructed. A decoded decline is still a successful call;
/// inspect [`code`](Self::code) or [`is_approved`](Self::is_approved) for the
/// business outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    fields: BTreeMap<String, String>,
}

impl Response {
    /// Parses a raw reply body.
    ///
    /// Tolerates surrounding whitespace, a trailing delimiter, and empty
    /// trailing segments. Duplicate keys keep the last value.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] when the body is empty or any
    /// non-empty segment lacks the `~` key/value separator.
    pub fn decode(raw: &str) -> Result<Self> {
        let body = raw.trim();
        let mut fields = BTreeMap::new();
        for segment in body.split('|') {
            if segment.is_empty() {
                continue;
            }
            let Some((key, value)) = segment.split_once('~') else {
                return Err(decode_error(raw));
            };
            if key.is_empty() {
                return Err(decode_error(raw));
            }
            fields.insert(key.to_owned(), value.to_owned());
        }
        if fields.is_empty() {
            return Err(decode_error(raw));
        }
        Ok(Self { fields })
    }

    /// Value of one reply field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All decoded fields, ordered by key.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// `TRANSACTIONID`, for chaining into a Void or Capture request.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.get("TRANSACTIONID")
    }

    /// `CHECKID`, for chaining into check follow-up requests.
    #[must_use]
    pub fn check_id(&self) -> Option<&str> {
        self.get("CHECKID")
    }

    /// Human-readable `RESPONSE` text.
    #[must_use]
    pub fn response_text(&self) -> Option<&str> {
        self.get("RESPONSE")
    }

    /// Human-readable `ERROR` text, present on gateway-rejected requests.
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        self.get("ERROR")
    }

    /// Numeric prefix of the `RESPONSE` (or, failing that, `ERROR`) text.
    ///
    /// The gateway leads every status message with its code, e.g.
    /// `101. Your transaction was successfully approved.`
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        let text = self.response_text().or_else(|| self.error_text())?;
        let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }

    /// Whether the reply carries an approval code.
    ///
    /// Approvals occupy the 100-range of gateway codes; an `ERROR` reply is
    /// never an approval regardless of its code.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.error_text().is_none() && self.code().is_some_and(|code| (100..200).contains(&code))
    }
}

fn decode_error(raw: &str) -> GatewayError {
    GatewayError::Decode { snippet: raw.chars().take(SNIPPET_LEN).collect() }
}
