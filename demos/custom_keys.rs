//! Using non-string map keys and swapping the key formatter.
//!
//! Run with: cargo run --example custom_keys

use plist_protocols::{
    root_value_of, root_value_of_with_options, ConvertOptions, KeyFormatter, ToPlistKey,
};
use std::collections::BTreeMap;
use std::error::Error;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Port(u16);

impl ToPlistKey for Port {
    fn to_plist_key(&self) -> String {
        format!("Port{}", self.0)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut services = BTreeMap::new();
    services.insert(Port(22), "ssh");
    services.insert(Port(443), "https");

    // Default formatter: keys render themselves
    println!("Default:   {}", root_value_of(&services)?.as_value());

    let options = ConvertOptions::new().with_key_formatter(KeyFormatter::lowercase());
    println!(
        "Lowercase: {}",
        root_value_of_with_options(&services, &options)?.as_value()
    );

    let options = ConvertOptions::new().with_key_formatter(KeyFormatter::text_only());
    match root_value_of_with_options(&services, &options) {
        Ok(root) => println!("Text only: {}", root.as_value()),
        Err(err) => println!("Text only: rejected ({})", err),
    }

    Ok(())
}
