//! The root of a property-list document.
//!
//! Only a dictionary may sit at the top of a document. [`RootValue`] wraps a
//! [`PlistValue`] that is known to be a dictionary; its constructors are the
//! only way to make one, so a bare scalar or array can never be handed to a
//! document writer as a root.
//!
//! Typed conversion enforces this at compile time through
//! [`ToRootPlistValue`](crate::ToRootPlistValue), which only map-like types
//! implement. Trees built dynamically, for instance through the serde bridge,
//! are checked at runtime with `RootValue::try_from`.

use crate::{Error, PlistMap, PlistValue};
use std::ops::Deref;

/// A property-list value that is legal as the outermost node of a document.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{PlistMap, PlistValue, RootValue};
///
/// let root = RootValue::from_map(PlistMap::new());
/// assert!(root.is_dictionary());
///
/// assert!(RootValue::try_from(PlistValue::from(42)).is_err());
/// assert!(RootValue::try_from(PlistValue::Array(vec![])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RootValue(PlistValue);

impl RootValue {
    /// Wraps a dictionary as a document root.
    #[must_use]
    pub fn from_map(map: PlistMap) -> Self {
        RootValue(PlistValue::Dictionary(map))
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn as_value(&self) -> &PlistValue {
        &self.0
    }

    /// Returns the root dictionary.
    #[must_use]
    pub fn as_map(&self) -> &PlistMap {
        match &self.0 {
            PlistValue::Dictionary(map) => map,
            _ => unreachable!("RootValue always wraps a dictionary"),
        }
    }

    /// Unwraps into a plain node, e.g. to embed the document in a larger tree.
    #[must_use]
    pub fn into_value(self) -> PlistValue {
        self.0
    }

    #[must_use]
    pub fn into_map(self) -> PlistMap {
        match self.0 {
            PlistValue::Dictionary(map) => map,
            _ => unreachable!("RootValue always wraps a dictionary"),
        }
    }
}

impl Deref for RootValue {
    type Target = PlistValue;

    fn deref(&self) -> &PlistValue {
        &self.0
    }
}

impl AsRef<PlistValue> for RootValue {
    fn as_ref(&self) -> &PlistValue {
        &self.0
    }
}

impl From<RootValue> for PlistValue {
    fn from(root: RootValue) -> Self {
        root.0
    }
}

impl From<PlistMap> for RootValue {
    fn from(map: PlistMap) -> Self {
        RootValue::from_map(map)
    }
}

impl TryFrom<PlistValue> for RootValue {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Dictionary(map) => Ok(RootValue::from_map(map)),
            other => Err(Error::not_root_eligible(other.kind())),
        }
    }
}

impl serde::Serialize for RootValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_reports_kind() {
        let err = RootValue::try_from(PlistValue::from("text")).unwrap_err();
        assert_eq!(err, Error::NotRootEligible { found: "string" });

        let err = RootValue::try_from(PlistValue::Array(vec![])).unwrap_err();
        assert_eq!(err, Error::NotRootEligible { found: "array" });
    }

    #[test]
    fn test_round_trip_through_plain_value() {
        let mut map = PlistMap::new();
        map.insert("k".to_string(), PlistValue::from(1));

        let root = RootValue::from(map.clone());
        assert_eq!(root.as_map(), &map);
        assert_eq!(root.kind(), "dictionary");

        let plain: PlistValue = root.clone().into();
        assert_eq!(RootValue::try_from(plain).unwrap(), root);
        assert_eq!(root.into_map(), map);
    }
}
