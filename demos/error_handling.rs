//! Handling the client's error taxonomy.
//!
//! Shows the failures a host program should expect: typo'd field names,
//! unsatisfied schemas, and submitting before credentials are set. None of
//! these touch the network.
//!
//! Run with: `cargo run --example error_handling`

use paytrace_client::{
    GatewayConfig, GatewayError, PayTraceClient, Request, TransactionType, ValidationError,
};

fn main() -> paytrace_client::Result<()> {
    // A field name the schema does not know fails immediately.
    let mut request = Request::new(TransactionType::Sale)?;
    match request.set_field("ammount", "1.00") {
        Err(GatewayError::UnknownField(name)) => println!("typo caught: '{name}'"),
        other => println!("unexpected: {other:?}"),
    }

    // Validation names exactly what is missing.
    match request.validate() {
        Err(ValidationError::MissingRequiredField(field)) => {
            println!("fill in '{field}' first");
        }
        other => println!("unexpected: {other:?}"),
    }
    request.set_field("amount", "1.00")?;
    match request.validate() {
        Err(ValidationError::MissingRequiredGroup { group, members }) => {
            println!("'{group}' needs one of: {}", members.join(", "));
        }
        other => println!("unexpected: {other:?}"),
    }
    request.set_field("cc", "4012881888818888")?;
    assert!(request.validate().is_ok());

    // Submitting without credentials fails before any network activity.
    let client = PayTraceClient::new(&GatewayConfig::default())?;
    match client.submit(&request) {
        Err(GatewayError::MissingCredentials) => {
            println!("set credentials before submitting");
        }
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
