//! Static schema tables and the process-wide registry.
//!
//! The tables transcribe the gateway's documented field requirements for each
//! transaction type. The registry is built once on first use and never
//! mutated afterward, so concurrent reads need no locking.

use std::{collections::HashMap, fmt::Write as _, sync::OnceLock};

use crate::{
    error::{GatewayError, Result},
    schema::{CREDENTIAL_FIELDS, FieldDef, FieldRule, TransactionType},
};

const fn req(name: &'static str) -> FieldDef {
    FieldDef::required(name)
}

const fn grp(name: &'static str, group: &'static str) -> FieldDef {
    FieldDef::in_group(name, group)
}

const fn opt(name: &'static str) -> FieldDef {
    FieldDef::optional(name)
}

/// Schema for one transaction type: gateway method, wire discriminator, and
/// the ordered field definitions.
#[derive(Debug, Clone, Copy)]
pub struct TypeSchema {
    method: &'static str,
    tranx_type: Option<&'static str>,
    check_type: Option<&'static str>,
    fields: &'static [FieldDef],
    discretionary_data: bool,
}

impl TypeSchema {
    const fn tranx(tranx_type: &'static str, fields: &'static [FieldDef], discretionary: bool) -> Self {
        Self {
            method: "ProcessTranx",
            tranx_type: Some(tranx_type),
            check_type: None,
            fields,
            discretionary_data: discretionary,
        }
    }

    const fn check(check_type: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            method: "ProcessCheck",
            tranx_type: None,
            check_type: Some(check_type),
            fields,
            discretionary_data: false,
        }
    }

    const fn method(method: &'static str, fields: &'static [FieldDef], discretionary: bool) -> Self {
        Self { method, tranx_type: None, check_type: None, fields, discretionary_data: discretionary }
    }

    /// Gateway `METHOD` value for this type.
    #[must_use]
    pub fn gateway_method(&self) -> &'static str {
        self.method
    }

    /// `TRANXTYPE` wire discriminator, for transaction-processing methods.
    #[must_use]
    pub fn tranx_type(&self) -> Option<&'static str> {
        self.tranx_type
    }

    /// `CHECKTYPE` wire discriminator, for check-processing methods.
    #[must_use]
    pub fn check_type(&self) -> Option<&'static str> {
        self.check_type
    }

    /// Ordered field definitions for this type.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Whether the gateway accepts merchant-defined discretionary data for
    /// this type.
    #[must_use]
    pub fn allows_discretionary_data(&self) -> bool {
        self.discretionary_data
    }

    /// Whether this type runs through a transaction-processing method, the
    /// ones that honor the `TEST` flag.
    #[must_use]
    pub fn is_transaction_method(&self) -> bool {
        matches!(self.method, "ProcessTranx" | "ProcessCheck")
    }

    /// Whether `name` is acceptable on a request of this type, either as a
    /// schema field or as one of the global credential fields.
    #[must_use]
    pub fn recognizes(&self, name: &str) -> bool {
        CREDENTIAL_FIELDS.contains(&name) || self.fields.iter().any(|def| def.name == name)
    }

    /// Names of all `Required` fields, in schema order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|def| def.rule == FieldRule::Required)
            .map(|def| def.name)
    }

    /// Group identifiers in schema order, deduplicated.
    #[must_use]
    pub fn groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        for def in self.fields {
            if let FieldRule::RequiredInGroup(group) = def.rule
                && !groups.contains(&group)
            {
                groups.push(group);
            }
        }
        groups
    }

    /// Member fields of one group, in schema order.
    #[must_use]
    pub fn group_members(&self, group: &str) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|def| matches!(def.rule, FieldRule::RequiredInGroup(g) if g == group))
            .map(|def| def.name)
            .collect()
    }

    /// Renders a field summary for help output, in the shape interactive
    /// clients print when asked what a transaction type expects.
    #[must_use]
    pub fn describe(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{name}(");
        let _ = writeln!(out, "    # Required fields");
        let required: Vec<_> = self.required_fields().collect();
        if required.is_empty() {
            let _ = writeln!(out, "    # <none>");
        } else {
            let _ = writeln!(out, "    {}", required.join(", "));
        }
        for group in self.groups() {
            let _ = writeln!(out, "\n    # Required: any one of '{group}'");
            let _ = writeln!(out, "    {}", self.group_members(group).join(", "));
        }
        if self.discretionary_data {
            let _ = writeln!(out, "\n    # Merchant-defined discretionary data may also be included.");
        }
        let optional: Vec<_> = self
            .fields
            .iter()
            .filter(|def| def.rule == FieldRule::Optional)
            .map(|def| def.name)
            .collect();
        if !optional.is_empty() {
            let _ = writeln!(out, "\n    # Optional fields");
            let _ = writeln!(out, "    {}", optional.join(", "));
        }
        out.push(')');
        out
    }
}

impl TransactionType {
    /// Renders the field summary for this type's schema.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SchemaNotFound`] if no schema is registered,
    /// which cannot happen for the statically-defined types.
    pub fn describe(self) -> Result<String> {
        Ok(Registry::global().rules_for(self)?.describe(self.name()))
    }
}

const SALE_FIELDS: &[FieldDef] = &[
    req("amount"),
    grp("cc", "payment"),
    grp("swipe", "payment"),
    grp("custid", "payment"),
    opt("expmnth"),
    opt("expyr"),
    opt("csc"),
    opt("bname"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("sname"),
    opt("saddress"),
    opt("saddress2"),
    opt("scity"),
    opt("scounty"),
    opt("sstate"),
    opt("szip"),
    opt("scountry"),
    opt("email"),
    opt("invoice"),
    opt("description"),
    opt("tax"),
    opt("custref"),
    opt("returnclr"),
    opt("customdba"),
    opt("enablepartialauth"),
    opt("test"),
];

// Same shape as a sale plus the optional authorization date.
const STORE_FORWARD_FIELDS: &[FieldDef] = &[
    req("amount"),
    grp("cc", "payment"),
    grp("swipe", "payment"),
    grp("custid", "payment"),
    opt("strfwddate"),
    opt("expmnth"),
    opt("expyr"),
    opt("csc"),
    opt("bname"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("sname"),
    opt("saddress"),
    opt("saddress2"),
    opt("scity"),
    opt("scounty"),
    opt("sstate"),
    opt("szip"),
    opt("scountry"),
    opt("email"),
    opt("invoice"),
    opt("description"),
    opt("tax"),
    opt("custref"),
    opt("test"),
];

// A refund can re-key a payment method or reference the original transaction.
const REFUND_FIELDS: &[FieldDef] = &[
    grp("cc", "payment"),
    grp("swipe", "payment"),
    grp("custid", "payment"),
    grp("tranxid", "payment"),
    opt("amount"),
    opt("expmnth"),
    opt("expyr"),
    opt("csc"),
    opt("bname"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("sname"),
    opt("saddress"),
    opt("saddress2"),
    opt("scity"),
    opt("scounty"),
    opt("sstate"),
    opt("szip"),
    opt("scountry"),
    opt("email"),
    opt("invoice"),
    opt("description"),
    opt("tax"),
    opt("custref"),
    opt("test"),
];

const VOID_FIELDS: &[FieldDef] = &[req("tranxid"), opt("test")];

const CAPTURE_FIELDS: &[FieldDef] = &[req("tranxid"), opt("test")];

const FORCED_SALE_FIELDS: &[FieldDef] = &[
    req("amount"),
    req("approval"),
    grp("cc", "payment"),
    grp("swipe", "payment"),
    grp("custid", "payment"),
    opt("expmnth"),
    opt("expyr"),
    opt("csc"),
    opt("invoice"),
    opt("description"),
    opt("test"),
];

// Cash advances are swiped card-present transactions with identity checks.
const CASH_ADVANCE_FIELDS: &[FieldDef] = &[
    req("amount"),
    req("swipe"),
    req("cashadvance"),
    req("photoid"),
    req("idexp"),
    req("last4"),
    req("bname"),
    req("baddress"),
    req("baddress2"),
    req("bcity"),
    req("bstate"),
    req("bzip"),
    opt("cc"),
    opt("expmnth"),
    opt("expyr"),
    opt("test"),
];

const CHECK_SALE_FIELDS: &[FieldDef] = &[
    req("amount"),
    grp("dda", "account"),
    grp("custid", "account"),
    opt("tr"),
    opt("bname"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("email"),
    opt("invoice"),
    opt("description"),
    opt("test"),
];

const CHECK_REFUND_FIELDS: &[FieldDef] = &[
    grp("checkid", "account"),
    grp("dda", "account"),
    grp("custid", "account"),
    opt("amount"),
    opt("tr"),
    opt("test"),
];

const CREATE_CUSTOMER_FIELDS: &[FieldDef] = &[
    req("custid"),
    req("bname"),
    req("cc"),
    req("expmnth"),
    req("expyr"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("sname"),
    opt("saddress"),
    opt("saddress2"),
    opt("scity"),
    opt("scounty"),
    opt("sstate"),
    opt("szip"),
    opt("scountry"),
    opt("email"),
    opt("phone"),
    opt("fax"),
    opt("custpswd"),
    opt("dda"),
    opt("tr"),
];

const UPDATE_CUSTOMER_FIELDS: &[FieldDef] = &[
    req("custid"),
    opt("newcustid"),
    opt("cc"),
    opt("expmnth"),
    opt("expyr"),
    opt("bname"),
    opt("baddress"),
    opt("baddress2"),
    opt("bcity"),
    opt("bstate"),
    opt("bzip"),
    opt("bcountry"),
    opt("sname"),
    opt("saddress"),
    opt("saddress2"),
    opt("scity"),
    opt("scounty"),
    opt("sstate"),
    opt("szip"),
    opt("scountry"),
    opt("email"),
    opt("phone"),
    opt("fax"),
    opt("custpswd"),
    opt("dda"),
    opt("tr"),
];

const DELETE_CUSTOMER_FIELDS: &[FieldDef] = &[req("custid")];

const EMAIL_RECEIPT_FIELDS: &[FieldDef] =
    &[req("email"), grp("tranxid", "receipt"), grp("checkid", "receipt")];

// Export either one transaction by ID or a date range.
const EXPORT_TRANSACTIONS_FIELDS: &[FieldDef] = &[
    grp("tranxid", "range"),
    grp("sdate", "range"),
    opt("edate"),
    opt("tranxtype"),
    opt("custid"),
    opt("user"),
    opt("returnbin"),
    opt("searchtext"),
];

const EXPORT_BATCH_FIELDS: &[FieldDef] = &[opt("sdate"), opt("batchnumber")];

const SETTLE_BATCH_FIELDS: &[FieldDef] = &[];

static SCHEMAS: &[(TransactionType, TypeSchema)] = &[
    (TransactionType::Sale, TypeSchema::tranx("Sale", SALE_FIELDS, true)),
    (TransactionType::Authorization, TypeSchema::tranx("Authorization", SALE_FIELDS, true)),
    (TransactionType::Refund, TypeSchema::tranx("Refund", REFUND_FIELDS, true)),
    (TransactionType::Void, TypeSchema::tranx("Void", VOID_FIELDS, false)),
    (TransactionType::ForcedSale, TypeSchema::tranx("Force", FORCED_SALE_FIELDS, false)),
    (TransactionType::Capture, TypeSchema::tranx("Capture", CAPTURE_FIELDS, false)),
    (TransactionType::CashAdvance, TypeSchema::tranx("Sale", CASH_ADVANCE_FIELDS, true)),
    (TransactionType::StoreForward, TypeSchema::tranx("Str/FWD", STORE_FORWARD_FIELDS, true)),
    (TransactionType::CheckSale, TypeSchema::check("Sale", CHECK_SALE_FIELDS)),
    (TransactionType::CheckRefund, TypeSchema::check("Refund", CHECK_REFUND_FIELDS)),
    (TransactionType::CreateCustomer, TypeSchema::method("CreateCustomer", CREATE_CUSTOMER_FIELDS, true)),
    (TransactionType::UpdateCustomer, TypeSchema::method("UpdateCustomer", UPDATE_CUSTOMER_FIELDS, true)),
    (TransactionType::DeleteCustomer, TypeSchema::method("DeleteCustomer", DELETE_CUSTOMER_FIELDS, false)),
    (TransactionType::EmailReceipt, TypeSchema::method("EmailReceipt", EMAIL_RECEIPT_FIELDS, false)),
    (TransactionType::ExportTransactions, TypeSchema::method("ExportTranx", EXPORT_TRANSACTIONS_FIELDS, false)),
    (TransactionType::ExportBatch, TypeSchema::method("ExportBatch", EXPORT_BATCH_FIELDS, false)),
    (TransactionType::SettleBatch, TypeSchema::method("SETTLETRANX", SETTLE_BATCH_FIELDS, false)),
];

/// Process-wide schema registry.
///
/// Built once from [`SCHEMAS`] on first access; immutable afterward and safe
/// for concurrent reads.
#[derive(Debug)]
pub struct Registry {
    by_type: HashMap<TransactionType, &'static TypeSchema>,
}

impl Registry {
    /// Returns the process-wide registry, building it on first use.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self {
            by_type: SCHEMAS.iter().map(|(ty, schema)| (*ty, schema)).collect(),
        })
    }

    /// Looks up the schema for a transaction type.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SchemaNotFound`] if the type is missing from
    /// the table. This cannot happen for the statically-defined types; the
    /// error guards registry extension mistakes.
    pub fn rules_for(&self, tranx_type: TransactionType) -> Result<&'static TypeSchema> {
        self.by_type
            .get(&tranx_type)
            .copied()
            .ok_or_else(|| GatewayError::SchemaNotFound(tranx_type.name().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_schema() {
        let registry = Registry::global();
        for ty in TransactionType::ALL {
            assert!(registry.rules_for(*ty).is_ok(), "no schema for {ty}");
        }
    }

    #[test]
    fn test_no_duplicate_field_names() {
        let registry = Registry::global();
        for ty in TransactionType::ALL {
            let schema = registry.rules_for(*ty).unwrap();
            let mut seen = Vec::new();
            for def in schema.fields() {
                assert!(!seen.contains(&def.name), "{ty}: duplicate field '{}'", def.name);
                seen.push(def.name);
            }
        }
    }

    #[test]
    fn test_transaction_methods_demand_something() {
        // Every type that moves money requires at least one field or group.
        let registry = Registry::global();
        for ty in TransactionType::ALL {
            let schema = registry.rules_for(*ty).unwrap();
            if schema.is_transaction_method() {
                let has_required = schema.required_fields().next().is_some();
                assert!(has_required || !schema.groups().is_empty(), "{ty} demands nothing");
            }
        }
    }

    #[test]
    fn test_groups_have_multiple_members() {
        let registry = Registry::global();
        for ty in TransactionType::ALL {
            let schema = registry.rules_for(*ty).unwrap();
            for group in schema.groups() {
                assert!(
                    schema.group_members(group).len() >= 2,
                    "{ty}: group '{group}' has a single member"
                );
            }
        }
    }

    #[test]
    fn test_sale_schema_shape() {
        let schema = Registry::global().rules_for(TransactionType::Sale).unwrap();
        assert_eq!(schema.gateway_method(), "ProcessTranx");
        assert_eq!(schema.tranx_type(), Some("Sale"));
        assert_eq!(schema.check_type(), None);
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["amount"]);
        assert_eq!(schema.group_members("payment"), vec!["cc", "swipe", "custid"]);
        assert!(schema.allows_discretionary_data());
    }

    #[test]
    fn test_void_schema_shape() {
        let schema = Registry::global().rules_for(TransactionType::Void).unwrap();
        assert_eq!(schema.tranx_type(), Some("Void"));
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["tranxid"]);
        assert!(schema.groups().is_empty());
        assert!(!schema.allows_discretionary_data());
    }

    #[test]
    fn test_refund_accepts_transaction_reference() {
        let schema = Registry::global().rules_for(TransactionType::Refund).unwrap();
        assert_eq!(schema.group_members("payment"), vec!["cc", "swipe", "custid", "tranxid"]);
    }

    #[test]
    fn test_forced_sale_wire_name() {
        let schema = Registry::global().rules_for(TransactionType::ForcedSale).unwrap();
        assert_eq!(schema.tranx_type(), Some("Force"));
        let required: Vec<_> = schema.required_fields().collect();
        assert!(required.contains(&"approval"));
    }

    #[test]
    fn test_check_types_use_checktype_discriminator() {
        let sale = Registry::global().rules_for(TransactionType::CheckSale).unwrap();
        assert_eq!(sale.gateway_method(), "ProcessCheck");
        assert_eq!(sale.check_type(), Some("Sale"));
        assert_eq!(sale.tranx_type(), None);

        let refund = Registry::global().rules_for(TransactionType::CheckRefund).unwrap();
        assert_eq!(refund.check_type(), Some("Refund"));
    }

    #[test]
    fn test_recognizes_credential_fields_everywhere() {
        let registry = Registry::global();
        for ty in TransactionType::ALL {
            let schema = registry.rules_for(*ty).unwrap();
            for name in CREDENTIAL_FIELDS {
                assert!(schema.recognizes(name), "{ty} rejects credential field '{name}'");
            }
        }
    }

    #[test]
    fn test_recognizes_is_case_sensitive() {
        let schema = Registry::global().rules_for(TransactionType::Sale).unwrap();
        assert!(schema.recognizes("amount"));
        assert!(!schema.recognizes("AMOUNT"));
        assert!(!schema.recognizes("Amount"));
    }

    #[test]
    fn test_describe_lists_rules() {
        let rendered = TransactionType::Sale.describe().unwrap();
        assert!(rendered.starts_with("Sale("));
        assert!(rendered.contains("# Required fields"));
        assert!(rendered.contains("amount"));
        assert!(rendered.contains("any one of 'payment'"));
        assert!(rendered.contains("cc, swipe, custid"));
        assert!(rendered.contains("discretionary data"));
        assert!(rendered.contains("# Optional fields"));
    }

    #[test]
    fn test_describe_handles_empty_schema() {
        let rendered = TransactionType::SettleBatch.describe().unwrap();
        assert!(rendered.contains("# <none>"));
        assert!(!rendered.contains("# Optional fields"));
    }

    #[test]
    fn test_email_receipt_reference_group() {
        let schema = Registry::global().rules_for(TransactionType::EmailReceipt).unwrap();
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["email"]);
        assert_eq!(schema.group_members("receipt"), vec!["tranxid", "checkid"]);
    }

    #[test]
    fn test_export_transactions_range_group() {
        let schema = Registry::global().rules_for(TransactionType::ExportTransactions).unwrap();
        assert_eq!(schema.group_members("range"), vec!["tranxid", "sdate"]);
        assert!(!schema.is_transaction_method());
    }
}
