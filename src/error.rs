//! Error types for property-list conversion.
//!
//! Conversion into the document model is total for every type that implements
//! the conversion traits. The errors below only arise from policies the caller
//! opted into (depth limits, duplicate-key rejection, restrictive key formatters)
//! or from the dynamic serde bridge, which cannot check root eligibility or
//! null-freeness at compile time.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{value_of_with_options, ConvertOptions, Error};
//!
//! let nested = vec![vec![vec![1]]];
//! let options = ConvertOptions::new().with_max_depth(Some(2));
//!
//! match value_of_with_options(&nested, &options) {
//!     Err(Error::DepthExceeded { limit }) => assert_eq!(limit, 2),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while building a property-list tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The value nests deeper than the configured limit.
    #[error("Maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Two source entries formatted to the same dictionary key under
    /// [`DuplicateKeyPolicy::Reject`](crate::DuplicateKeyPolicy::Reject).
    #[error("Duplicate dictionary key after formatting: {key:?}")]
    DuplicateKey { key: String },

    /// The key formatter refused a key.
    #[error("Key {key:?} rejected: {reason}")]
    KeyRejected { key: String, reason: String },

    /// A value other than a dictionary was offered as a document root.
    #[error("A {found} cannot be the root of a property list; only a dictionary can")]
    NotRootEligible { found: &'static str },

    /// The serde bridge met a value the property-list model cannot represent.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a depth error for the given limit.
    pub fn depth_exceeded(limit: usize) -> Self {
        Error::DepthExceeded { limit }
    }

    /// Creates a duplicate-key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plist_protocols::Error;
    ///
    /// let err = Error::duplicate_key("name");
    /// assert!(err.to_string().contains("\"name\""));
    /// ```
    pub fn duplicate_key(key: &str) -> Self {
        Error::DuplicateKey {
            key: key.to_string(),
        }
    }

    /// Creates an error for a key refused by a key formatter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plist_protocols::Error;
    ///
    /// let err = Error::key_rejected("42", "only text keys are allowed");
    /// assert!(err.to_string().contains("only text keys"));
    /// ```
    pub fn key_rejected(key: &str, reason: &str) -> Self {
        Error::KeyRejected {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a root-eligibility error naming the kind of value found.
    pub fn not_root_eligible(found: &'static str) -> Self {
        Error::NotRootEligible { found }
    }

    /// Creates an unsupported type error for values the model cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::depth_exceeded(8).to_string(),
            "Maximum nesting depth of 8 exceeded"
        );
        assert_eq!(
            Error::not_root_eligible("string").to_string(),
            "A string cannot be the root of a property list; only a dictionary can"
        );
        assert_eq!(
            Error::unsupported_type("null").to_string(),
            "Unsupported type: null"
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::ser::Error>::custom("boom");
        assert_eq!(err, Error::Custom("boom".to_string()));
    }
}
