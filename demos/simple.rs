//! Your first property list: a map of settings converted to a document root.
//!
//! Run with: cargo run --example simple

use plist_protocols::{root_value_of, PlistValue};
use std::collections::BTreeMap;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut window = BTreeMap::new();
    window.insert("width", 800);
    window.insert("height", 600);

    let mut settings: BTreeMap<&str, PlistValue> = BTreeMap::new();
    settings.insert("title", PlistValue::from("Main Window"));
    settings.insert("visible", PlistValue::from(true));
    settings.insert("window", plist_protocols::value_of(&window)?);

    let root = root_value_of(&settings)?;
    println!("Document root: {}", root.as_value());

    for (key, value) in root.as_map() {
        println!("  {} is a {}", key, value.kind());
    }

    Ok(())
}
