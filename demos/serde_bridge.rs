//! Converting `#[derive(Serialize)]` types without implementing the traits.
//!
//! Run with: cargo run --example serde_bridge

use plist_protocols::{
    to_root_value, to_root_value_with_options, to_value, ConvertOptions, KeyFormatter,
};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Account {
    user: String,
    roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manager: Option<String>,
    #[serde(with = "serde_bytes")]
    avatar: Vec<u8>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let account = Account {
        user: "alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
        manager: None,
        avatar: vec![0xff, 0xd8],
    };

    let root = to_root_value(&account)?;
    println!("Account: {}", root.as_value());

    let options = ConvertOptions::new().with_key_formatter(KeyFormatter::prefixed("acct."));
    let prefixed = to_root_value_with_options(&account, &options)?;
    println!("Prefixed: {}", prefixed.as_value());

    // Arrays convert fine as values but are refused as document roots
    let roles = to_value(&account.roles)?;
    println!("Roles as value: {}", roles);
    if let Err(err) = to_root_value(&account.roles) {
        println!("Roles as root: {}", err);
    }

    Ok(())
}
