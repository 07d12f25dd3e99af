//! Print what each transaction type expects.
//!
//! The schema registry drives validation and this help output alike; use it
//! to discover which fields a request needs before wiring one up.
//!
//! Run with: `cargo run --example request_fields`

use paytrace_client::TransactionType;

fn main() -> paytrace_client::Result<()> {
    for ty in [
        TransactionType::Sale,
        TransactionType::Authorization,
        TransactionType::Refund,
        TransactionType::Void,
        TransactionType::CheckSale,
        TransactionType::EmailReceipt,
    ] {
        println!("{}\n", ty.describe()?);
    }
    Ok(())
}
