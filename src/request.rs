//! Schema-bound request objects.
//!
//! A [`Request`] is bound to exactly one [`TransactionType`] at construction
//! and accumulates field values against that type's schema. Unrecognized
//! field names fail loudly, validation walks the schema without touching the
//! network, and encoding renders the deterministic `PARMLIST` wire form the
//! gateway expects.
//!
//! ```
//! use paytrace_client::{Request, TransactionType};
//!
//! # fn main() -> paytrace_client::Result<()> {
//! let mut request = Request::new(TransactionType::Void)?;
//! request.set_field("tranxid", "26303013")?;
//! assert!(request.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeMap, fmt::Write as _};

use url::form_urlencoded;

use crate::{
    credentials::Credentials,
    error::{GatewayError, Result, ValidationError},
    schema::{Registry, TransactionType, TypeSchema},
};

/// A request bound to one transaction type.
///
/// Mutated only before submission; submitting it is a caller-driven sequence
/// of [`validate`](Self::validate) and [`encode`](Self::encode) (the client
/// drives both). Re-validating is always safe; re-sending the same request
/// may create a duplicate transaction at the gateway, and the core neither
/// suppresses nor dedupes that; it is a caller decision.
#[derive(Debug, Clone)]
pub struct Request {
    tranx_type: TransactionType,
    schema: &'static TypeSchema,
    fields: BTreeMap<String, String>,
    discretionary: BTreeMap<String, String>,
}

impl Request {
    /// Creates an empty request for one transaction type.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SchemaNotFound`] if the registry has no schema
    /// for the type, which cannot happen for the statically-defined types.
    pub fn new(tranx_type: TransactionType) -> Result<Self> {
        let schema = Registry::global().rules_for(tranx_type)?;
        Ok(Self {
            tranx_type,
            schema,
            fields: BTreeMap::new(),
            discretionary: BTreeMap::new(),
        })
    }

    /// Creates a request pre-populated with field values.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownField`] if any name is not recognized
    /// for this transaction type.
    pub fn with_fields(tranx_type: TransactionType, initial: &[(&str, &str)]) -> Result<Self> {
        let mut request = Self::new(tranx_type)?;
        for (name, value) in initial {
            request.set_field(name, value)?;
        }
        Ok(request)
    }

    /// The transaction type this request is bound to.
    #[must_use]
    pub fn transaction_type(&self) -> TransactionType {
        self.tranx_type
    }

    /// The schema this request validates against.
    #[must_use]
    pub fn schema(&self) -> &'static TypeSchema {
        self.schema
    }

    /// Sets one field, overwriting any previous value (last write wins).
    ///
    /// Field names are the lowercase, case-sensitive names from the schema.
    /// The global credential names (`un`, `pswd`, `terms`) are also accepted,
    /// though the active credential context is authoritative for `un` and
    /// `pswd` at encode time. An empty value is stored but counts as
    /// "provided but empty" and satisfies no rule.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownField`] for any other name, for every
    /// transaction type.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.schema.recognizes(name) {
            return Err(GatewayError::UnknownField(name.to_owned()));
        }
        self.fields.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    /// Sets a merchant-defined discretionary data field.
    ///
    /// Names the schema recognizes are routed through
    /// [`set_field`](Self::set_field); anything else is accepted verbatim,
    /// but only for transaction types whose schema allows discretionary data.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownField`] when the type does not accept
    /// discretionary data.
    pub fn set_discretionary(&mut self, name: &str, value: &str) -> Result<()> {
        if self.schema.recognizes(name) {
            return self.set_field(name, value);
        }
        if !self.schema.allows_discretionary_data() {
            return Err(GatewayError::UnknownField(name.to_owned()));
        }
        self.discretionary.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    /// Current value of one field, if set.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .or_else(|| self.discretionary.get(name))
            .map(String::as_str)
    }

    /// Checks the accumulated fields against the schema.
    ///
    /// Pure and repeatable: no mutation, no network, same result on every
    /// call until the request changes. All `Required` rules are checked
    /// before any group rule, so a missing required field is reported even
    /// when a group is also unsatisfied.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredField`] for the first absent
    /// or empty required field, then
    /// [`ValidationError::MissingRequiredGroup`] for the first group with no
    /// present member.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        for name in self.schema.required_fields() {
            if !self.is_present(name) {
                return Err(ValidationError::MissingRequiredField(name.to_owned()));
            }
        }
        for group in self.schema.groups() {
            let members = self.schema.group_members(group);
            if !members.iter().any(|name| self.is_present(name)) {
                return Err(ValidationError::MissingRequiredGroup {
                    group: group.to_owned(),
                    members: members.into_iter().map(str::to_owned).collect(),
                });
            }
        }
        Ok(())
    }

    /// Renders the wire payload: uppercase `KEY~VALUE` pairs sorted by key,
    /// joined with `|` and a trailing delimiter, form-urlencoded as the
    /// single `PARMLIST` parameter.
    ///
    /// The synthetic `METHOD`, `TRANXTYPE`/`CHECKTYPE` and `TERMS` fields are
    /// added here, credentials are merged in from the active context, and
    /// `TEST~Y` is injected for transaction-processing methods when test mode
    /// is enabled. Encoding is deterministic for a given field mapping and
    /// credential pair.
    #[must_use]
    pub fn encode(&self, credentials: &Credentials, test_mode: bool) -> String {
        let mut wire: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in self.fields.iter().chain(&self.discretionary) {
            let wire_name = name.to_ascii_uppercase();
            let wire_value = if wire_name == "SWIPE" { encode_swipe(value) } else { value.clone() };
            wire.insert(wire_name, wire_value);
        }

        wire.insert("METHOD".to_owned(), self.schema.gateway_method().to_owned());
        if let Some(tranx_type) = self.schema.tranx_type() {
            wire.insert("TRANXTYPE".to_owned(), tranx_type.to_owned());
        }
        if let Some(check_type) = self.schema.check_type() {
            wire.insert("CHECKTYPE".to_owned(), check_type.to_owned());
        }
        wire.entry("TERMS".to_owned()).or_insert_with(|| "Y".to_owned());
        wire.insert("UN".to_owned(), credentials.username().to_owned());
        wire.insert("PSWD".to_owned(), credentials.password().to_owned());
        if test_mode && self.schema.is_transaction_method() {
            wire.entry("TEST".to_owned()).or_insert_with(|| "Y".to_owned());
        }

        let mut parmlist = String::new();
        for (key, value) in &wire {
            let _ = write!(parmlist, "{key}~{value}|");
        }
        form_urlencoded::Serializer::new(String::new())
            .append_pair("PARMLIST", &parmlist)
            .finish()
    }

    fn is_present(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|value| !value.is_empty())
    }
}

/// Swipe data carries track separators that collide with the pair delimiter;
/// the gateway wants them replaced and the value percent-escaped on its own.
fn encode_swipe(value: &str) -> String {
    let sanitized = value.replace('|', "***");
    form_urlencoded::byte_serialize(sanitized.as_bytes()).collect()
}
