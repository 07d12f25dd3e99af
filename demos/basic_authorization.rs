//! Authorize a dollar against the gateway demo account, then void it.
//!
//! Mirrors the classic interactive walkthrough: authorize with the demo card,
//! grab the returned transaction ID, and cancel the authorization. Requires
//! network access to the live gateway.
//!
//! Run with: `cargo run --example basic_authorization`

use paytrace_client::{GatewayConfig, PayTraceClient, Request, TransactionType};

fn main() -> paytrace_client::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut client = PayTraceClient::new(&GatewayConfig::default())?;
    client.set_credentials("demo123", "demo123");
    client.set_test_mode(true);

    println!("==> authorizing 1.00 against the demo card");
    let authorization = Request::with_fields(TransactionType::Authorization, &[
        ("amount", "1.00"),
        ("cc", "4012881888818888"),
        ("expmnth", "01"),
        ("expyr", "15"),
        ("csc", "999"),
        ("baddress", "123 Main St."),
        ("bzip", "53719"),
        ("invoice", "8888"),
    ])?;
    let response = client.submit(&authorization)?;
    for (key, value) in response.fields() {
        println!("    {key} = {value}");
    }

    let Some(transaction_id) = response.transaction_id() else {
        println!("==> no transaction ID returned; nothing to void");
        return Ok(());
    };

    println!("==> voiding transaction {transaction_id}");
    let void = Request::with_fields(TransactionType::Void, &[("tranxid", transaction_id)])?;
    let response = client.submit(&void)?;
    for (key, value) in response.fields() {
        println!("    {key} = {value}");
    }

    Ok(())
}
