//! # plist_protocols
//!
//! Typed conversion of native Rust values into a property-list document model.
//!
//! ## What is it for?
//!
//! A property list is a tree of booleans, numbers, strings, data blobs, dates,
//! arrays and dictionaries whose root must be a dictionary. This crate lets any
//! application type describe how it maps onto that tree, and builds the tree for
//! an external writer (binary, XML or anything else) to encode.
//!
//! ## Key Features
//!
//! - **Closed value model**: [`PlistValue`] is the only node type; application
//!   types participate by implementing conversion traits, not by extending it
//! - **Root safety**: only dictionary-like types implement [`ToRootPlistValue`],
//!   so a scalar or array at the document root is a compile error
//! - **Key formatting**: map keys of any [`ToPlistKey`] type go through a
//!   swappable [`KeyFormatter`] chosen per call
//! - **Explicit policies**: duplicate keys and nesting depth are configured in
//!   [`ConvertOptions`] and surface as [`Error`] values, never panics
//! - **Serde bridge**: [`to_value`] converts any `T: Serialize` under the same
//!   options as the typed path
//!
//! ## Quick Start
//!
//! ```rust
//! use plist_protocols::{root_value_of, PlistValue};
//! use std::collections::BTreeMap;
//!
//! let mut settings = BTreeMap::new();
//! settings.insert("volume", vec![1, 2, 3]);
//!
//! let root = root_value_of(&settings).unwrap();
//! let volume = root.as_map().get("volume").unwrap();
//! assert_eq!(volume.as_array().map(Vec::len), Some(3));
//! ```
//!
//! Roots are checked by the type system:
//!
//! ```compile_fail
//! let root = plist_protocols::root_value_of(&42);
//! ```
//!
//! ```compile_fail
//! let root = plist_protocols::root_value_of(&vec![true, false]);
//! ```
//!
//! ## Custom Keys
//!
//! ```rust
//! use plist_protocols::{root_value_of, PlistValue, ToPlistKey};
//! use std::collections::HashMap;
//!
//! #[derive(PartialEq, Eq, Hash)]
//! struct Id(u32);
//!
//! impl ToPlistKey for Id {
//!     fn to_plist_key(&self) -> String {
//!         format!("k{}", self.0)
//!     }
//! }
//!
//! let mut map = HashMap::new();
//! map.insert(Id(42), "v");
//!
//! let root = root_value_of(&map).unwrap();
//! assert_eq!(root.as_map().get("k42"), Some(&PlistValue::from("v")));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Conversion is a pure function of its input: no I/O, no global state
//! - Proper error propagation with `Result` types

pub mod convert;
pub mod error;
pub mod key;
pub mod macros;
pub mod map;
pub mod options;
pub mod root;
pub mod ser;
pub mod value;

pub use convert::{Converter, DictionaryBuilder, ToPlistValue, ToRootPlistValue};
pub use error::{Error, Result};
pub use key::{KeyFormatter, ToPlistKey};
pub use map::PlistMap;
pub use options::{ConvertOptions, DuplicateKeyPolicy, DEFAULT_MAX_DEPTH};
pub use root::RootValue;
pub use ser::PlistValueSerializer;
pub use value::{Number, PlistValue};

use serde::Serialize;

/// Convert any `T: ToPlistValue` to a [`PlistValue`] with default options.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{value_of, PlistValue};
///
/// let value = value_of(&vec![true, false]).unwrap();
/// assert_eq!(value, PlistValue::Array(vec![PlistValue::Bool(true), PlistValue::Bool(false)]));
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] for values nested deeper than
/// [`DEFAULT_MAX_DEPTH`]. Default options never reject keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_of<T>(value: &T) -> Result<PlistValue>
where
    T: ?Sized + ToPlistValue,
{
    value_of_with_options(value, &ConvertOptions::default())
}

/// Convert any `T: ToPlistValue` to a [`PlistValue`] with custom options.
///
/// # Errors
///
/// Returns an error if a policy in `options` is violated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn value_of_with_options<T>(value: &T, options: &ConvertOptions) -> Result<PlistValue>
where
    T: ?Sized + ToPlistValue,
{
    Converter::new(options).convert(value)
}

/// Convert a root-eligible value to a document root with default options.
///
/// Keys are used verbatim when they are native text and otherwise rendered
/// through their [`ToPlistKey`] implementation.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{root_value_of, PlistValue};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("a".to_string(), 1);
/// let root = root_value_of(&map).unwrap();
/// assert_eq!(root.as_map().get("a"), Some(&PlistValue::from(1)));
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] for values nested deeper than
/// [`DEFAULT_MAX_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn root_value_of<T>(value: &T) -> Result<RootValue>
where
    T: ?Sized + ToRootPlistValue,
{
    root_value_of_with_options(value, &ConvertOptions::default())
}

/// Convert a root-eligible value to a document root with custom options.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{root_value_of_with_options, ConvertOptions, KeyFormatter};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("Timeout", 30);
///
/// let options = ConvertOptions::new().with_key_formatter(KeyFormatter::prefixed("net."));
/// let root = root_value_of_with_options(&map, &options).unwrap();
/// assert!(root.as_map().contains_key("net.Timeout"));
/// ```
///
/// # Errors
///
/// Returns an error if a policy in `options` is violated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn root_value_of_with_options<T>(value: &T, options: &ConvertOptions) -> Result<RootValue>
where
    T: ?Sized + ToRootPlistValue,
{
    tracing::trace!(
        duplicate_keys = ?options.duplicate_keys,
        max_depth = ?options.max_depth,
        "converting property list root"
    );
    value.to_root_plist_value(&mut Converter::new(options))
}

/// Convert any `T: Serialize` to a [`PlistValue`] with default options.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_dictionary());
/// ```
///
/// # Errors
///
/// Returns an error if the value contains something a property list cannot
/// hold, such as `None` or a non-string map key, or nests deeper than
/// [`DEFAULT_MAX_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<PlistValue>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, &ConvertOptions::default())
}

/// Convert any `T: Serialize` to a [`PlistValue`] with custom options.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{to_value_with_options, ConvertOptions, KeyFormatter, PlistValue};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("Retries", 3);
///
/// let options = ConvertOptions::new().with_key_formatter(KeyFormatter::lowercase());
/// let value = to_value_with_options(&map, &options).unwrap();
/// assert_eq!(value.as_dictionary().unwrap().get("retries"), Some(&PlistValue::from(3)));
/// ```
///
/// # Errors
///
/// Everything [`to_value`] reports, plus any policy in `options` that is
/// violated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_options<T>(value: &T, options: &ConvertOptions) -> Result<PlistValue>
where
    T: ?Sized + Serialize,
{
    Converter::new(options).serialize(value)
}

/// Convert any `T: Serialize` to a document root with default options.
///
/// # Errors
///
/// Everything [`to_value`] reports, plus [`Error::NotRootEligible`] when the
/// value does not serialize to a dictionary.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_root_value<T>(value: &T) -> Result<RootValue>
where
    T: ?Sized + Serialize,
{
    to_root_value_with_options(value, &ConvertOptions::default())
}

/// Convert any `T: Serialize` to a document root with custom options.
///
/// # Errors
///
/// Everything [`to_value_with_options`] reports, plus
/// [`Error::NotRootEligible`] when the value does not serialize to a dictionary.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_root_value_with_options<T>(value: &T, options: &ConvertOptions) -> Result<RootValue>
where
    T: ?Sized + Serialize,
{
    tracing::trace!(
        duplicate_keys = ?options.duplicate_keys,
        max_depth = ?options.max_depth,
        "serializing property list root"
    );
    RootValue::try_from(to_value_with_options(value, options)?)
}
