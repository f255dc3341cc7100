//! Ordered dictionary type for property-list documents.
//!
//! [`PlistMap`] wraps an [`IndexMap`] so that dictionary entries keep the order in
//! which conversion inserted them. Property lists do not assign meaning to key
//! order, but a stable order makes the output of a conversion deterministic,
//! which in turn keeps encoded documents byte-for-byte reproducible.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{PlistMap, PlistValue};
//!
//! let mut map = PlistMap::new();
//! map.insert("name".to_string(), PlistValue::from("Alice"));
//! map.insert("age".to_string(), PlistValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::PlistValue;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// An insertion-ordered map of string keys to property-list values.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{PlistMap, PlistValue};
///
/// let mut map = PlistMap::new();
/// map.insert("first".to_string(), PlistValue::from(1));
/// map.insert("second".to_string(), PlistValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlistMap(IndexMap<String, PlistValue>);

impl PlistMap {
    /// Creates an empty `PlistMap`.
    #[must_use]
    pub fn new() -> Self {
        PlistMap(IndexMap::new())
    }

    /// Creates an empty `PlistMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PlistMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place
    /// (the key keeps its original position) and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plist_protocols::{PlistMap, PlistValue};
    ///
    /// let mut map = PlistMap::new();
    /// assert!(map.insert("key".to_string(), PlistValue::from(42)).is_none());
    /// assert_eq!(
    ///     map.insert("key".to_string(), PlistValue::from(43)),
    ///     Some(PlistValue::from(42))
    /// );
    /// ```
    pub fn insert(&mut self, key: String, value: PlistValue) -> Option<PlistValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, PlistValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, PlistValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PlistValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, PlistValue>> for PlistMap {
    fn from(map: HashMap<String, PlistValue>) -> Self {
        PlistMap(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, PlistValue>> for PlistMap {
    fn from(map: BTreeMap<String, PlistValue>) -> Self {
        PlistMap(map.into_iter().collect())
    }
}

impl From<PlistMap> for HashMap<String, PlistValue> {
    fn from(map: PlistMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl From<PlistMap> for BTreeMap<String, PlistValue> {
    fn from(map: PlistMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for PlistMap {
    type Item = (String, PlistValue);
    type IntoIter = indexmap::map::IntoIter<String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlistMap {
    type Item = (&'a String, &'a PlistValue);
    type IntoIter = indexmap::map::Iter<'a, String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PlistValue)> for PlistMap {
    fn from_iter<T: IntoIterator<Item = (String, PlistValue)>>(iter: T) -> Self {
        PlistMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = PlistMap::new();
        map.insert("a".to_string(), PlistValue::from(1));
        map.insert("b".to_string(), PlistValue::from(2));
        map.insert("a".to_string(), PlistValue::from(3));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_i64())).collect();
        assert_eq!(entries, vec![("a", Some(3)), ("b", Some(2))]);
    }

    #[test]
    fn test_btree_conversion_sorts_keys() {
        let mut map = PlistMap::new();
        map.insert("z".to_string(), PlistValue::from(true));
        map.insert("m".to_string(), PlistValue::from(false));

        let sorted: BTreeMap<String, PlistValue> = map.clone().into();
        let back = PlistMap::from(sorted);
        let keys: Vec<_> = back.keys().cloned().collect();
        assert_eq!(keys, vec!["m", "z"]);
        assert!(back.contains_key("z"));
    }
}
