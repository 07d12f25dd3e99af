//! Field schemas for the PayTrace key/value API.
//!
//! Every transaction type the gateway documents maps to a static table of
//! field definitions: which fields must always be present, which belong to a
//! group of mutually alternative fields (any one member satisfies the group),
//! and which are optional. The tables drive both request validation and the
//! help output in the demos, replacing the attribute introspection the
//! gateway's dynamic-language clients rely on.
//!
//! Field names on this API surface are the lowercase, case-sensitive names
//! callers pass in (`amount`, `cc`, `tranxid`); uppercasing to the gateway's
//! wire names happens at encode time.

mod registry;

use std::fmt;

pub use registry::{Registry, TypeSchema};

use crate::error::{GatewayError, Result};

/// Fields merged into every request from the active credential context.
///
/// These are recognized on any request in addition to the per-type schema,
/// but the context values are authoritative at encode time.
pub const CREDENTIAL_FIELDS: &[&str] = &["un", "pswd", "terms"];

/// A named kind of gateway operation.
///
/// The set is fixed at compile time; [`Registry`] holds one schema per
/// variant. `Credit` in older gateway documentation is the same operation as
/// [`Refund`](Self::Refund) and resolves to it in [`from_name`](Self::from_name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Charge a card (or stored customer) immediately.
    Sale,
    /// Reserve funds without capturing them.
    Authorization,
    /// Return funds from a settled transaction, or re-key a refund.
    Refund,
    /// Cancel an unsettled transaction by its transaction ID.
    Void,
    /// Sale with an approval code obtained outside the gateway.
    ForcedSale,
    /// Settle a previously approved authorization.
    Capture,
    /// Cash disbursement to the card holder; swiped by default.
    CashAdvance,
    /// Store a transaction for later authorization.
    StoreForward,
    /// ACH debit against a checking account.
    CheckSale,
    /// ACH refund, by check ID or account details.
    CheckRefund,
    /// Create a stored customer profile.
    CreateCustomer,
    /// Update a stored customer profile.
    UpdateCustomer,
    /// Delete a stored customer profile.
    DeleteCustomer,
    /// Email a transaction or check receipt.
    EmailReceipt,
    /// Export transaction records.
    ExportTransactions,
    /// Export settlement batch information.
    ExportBatch,
    /// Initiate settlement on terminal-based networks.
    SettleBatch,
}

impl TransactionType {
    /// Every defined transaction type, in registry order.
    pub const ALL: &'static [Self] = &[
        Self::Sale,
        Self::Authorization,
        Self::Refund,
        Self::Void,
        Self::ForcedSale,
        Self::Capture,
        Self::CashAdvance,
        Self::StoreForward,
        Self::CheckSale,
        Self::CheckRefund,
        Self::CreateCustomer,
        Self::UpdateCustomer,
        Self::DeleteCustomer,
        Self::EmailReceipt,
        Self::ExportTransactions,
        Self::ExportBatch,
        Self::SettleBatch,
    ];

    /// Canonical name for this transaction type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Authorization => "Authorization",
            Self::Refund => "Refund",
            Self::Void => "Void",
            Self::ForcedSale => "ForcedSale",
            Self::Capture => "Capture",
            Self::CashAdvance => "CashAdvance",
            Self::StoreForward => "StoreForward",
            Self::CheckSale => "CheckSale",
            Self::CheckRefund => "CheckRefund",
            Self::CreateCustomer => "CreateCustomer",
            Self::UpdateCustomer => "UpdateCustomer",
            Self::DeleteCustomer => "DeleteCustomer",
            Self::EmailReceipt => "EmailReceipt",
            Self::ExportTransactions => "ExportTransactions",
            Self::ExportBatch => "ExportBatch",
            Self::SettleBatch => "SettleBatch",
        }
    }

    /// Resolves a transaction type from its canonical name or a documented
    /// wire alias (`Force`, `Str/FWD`, `Credit`).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SchemaNotFound`] for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Sale" => Ok(Self::Sale),
            "Authorization" => Ok(Self::Authorization),
            "Refund" | "Credit" => Ok(Self::Refund),
            "Void" => Ok(Self::Void),
            "ForcedSale" | "Force" => Ok(Self::ForcedSale),
            "Capture" => Ok(Self::Capture),
            "CashAdvance" => Ok(Self::CashAdvance),
            "StoreForward" | "Str/FWD" => Ok(Self::StoreForward),
            "CheckSale" => Ok(Self::CheckSale),
            "CheckRefund" => Ok(Self::CheckRefund),
            "CreateCustomer" => Ok(Self::CreateCustomer),
            "UpdateCustomer" => Ok(Self::UpdateCustomer),
            "DeleteCustomer" => Ok(Self::DeleteCustomer),
            "EmailReceipt" => Ok(Self::EmailReceipt),
            "ExportTransactions" => Ok(Self::ExportTransactions),
            "ExportBatch" => Ok(Self::ExportBatch),
            "SettleBatch" => Ok(Self::SettleBatch),
            other => Err(GatewayError::SchemaNotFound(other.to_owned())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Necessity of one field for one transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Must be present and non-empty.
    Required,
    /// At least one field sharing this group identifier must be present and
    /// non-empty. Providing several members is allowed.
    RequiredInGroup(&'static str),
    /// May be omitted.
    Optional,
}

/// One field definition in a transaction type's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Caller-facing field name (lowercase, case-sensitive).
    pub name: &'static str,
    /// Necessity of the field for the owning type.
    pub rule: FieldRule,
}

impl FieldDef {
    /// A `Required` field.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self { name, rule: FieldRule::Required }
    }

    /// A member of a group of alternative fields.
    #[must_use]
    pub const fn in_group(name: &'static str, group: &'static str) -> Self {
        Self { name, rule: FieldRule::RequiredInGroup(group) }
    }

    /// An `Optional` field.
    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        Self { name, rule: FieldRule::Optional }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_canonical() {
        for ty in TransactionType::ALL {
            assert_eq!(TransactionType::from_name(ty.name()).unwrap(), *ty);
        }
    }

    #[test]
    fn test_from_name_wire_aliases() {
        assert_eq!(TransactionType::from_name("Force").unwrap(), TransactionType::ForcedSale);
        assert_eq!(TransactionType::from_name("Str/FWD").unwrap(), TransactionType::StoreForward);
        assert_eq!(TransactionType::from_name("Credit").unwrap(), TransactionType::Refund);
    }

    #[test]
    fn test_from_name_unknown_fails() {
        let err = TransactionType::from_name("Barter").unwrap_err();
        assert!(matches!(err, GatewayError::SchemaNotFound(name) if name == "Barter"));
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert!(TransactionType::from_name("sale").is_err());
        assert!(TransactionType::from_name("VOID").is_err());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(TransactionType::Void.to_string(), "Void");
        assert_eq!(TransactionType::ForcedSale.to_string(), "ForcedSale");
    }

    #[test]
    fn test_field_def_constructors() {
        assert_eq!(FieldDef::required("amount").rule, FieldRule::Required);
        assert_eq!(FieldDef::in_group("cc", "payment").rule, FieldRule::RequiredInGroup("payment"));
        assert_eq!(FieldDef::optional("invoice").rule, FieldRule::Optional);
    }
}
