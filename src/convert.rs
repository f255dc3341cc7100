//! Conversion capabilities.
//!
//! Two traits decide where a native value may appear in a property list:
//!
//! - [`ToPlistValue`]: the value can be placed anywhere inside a document.
//! - [`ToRootPlistValue`]: the value can also be the document root. Only
//!   map-like types implement it, so `root_value_of(&42)` or
//!   `root_value_of(&vec![1, 2])` do not compile.
//!
//! Every root-eligible type is also a plain value and converts the same way at
//! any depth. The container impls in this module all funnel through
//! [`Converter`], which applies the key formatter, the duplicate-key policy and
//! the depth limit from [`ConvertOptions`].
//!
//! ## Implementing the capabilities
//!
//! Root-capable types build their dictionary with
//! [`Converter::convert_dictionary`], so their keys are formatted, duplicates
//! are checked and the dictionary counts toward the depth limit, then derive
//! the plain conversion with [`impl_to_plist_value_via_root!`](crate::impl_to_plist_value_via_root).
//!
//! ```rust
//! use plist_protocols::{
//!     impl_to_plist_value_via_root, root_value_of, value_of, Converter, PlistValue, Result,
//!     RootValue, ToPlistValue, ToRootPlistValue,
//! };
//!
//! struct Celsius(f64);
//!
//! impl ToPlistValue for Celsius {
//!     fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
//!         Ok(PlistValue::from(self.0))
//!     }
//! }
//!
//! struct Reading {
//!     sensor: String,
//!     values: Vec<Celsius>,
//! }
//!
//! impl ToRootPlistValue for Reading {
//!     fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
//!         cx.convert_dictionary(|dict| {
//!             dict.entry("sensor", &self.sensor)?;
//!             dict.entry("values", &self.values)?;
//!             Ok(())
//!         })
//!         .map(RootValue::from_map)
//!     }
//! }
//!
//! impl_to_plist_value_via_root!(Reading);
//!
//! let reading = Reading { sensor: "t1".into(), values: vec![Celsius(21.5)] };
//! let root = root_value_of(&reading).unwrap();
//! assert_eq!(root.as_map().len(), 2);
//! assert!(value_of(&Celsius(-4.0)).unwrap().is_number());
//! ```

use crate::{
    ConvertOptions, DuplicateKeyPolicy, Error, PlistMap, PlistValue, PlistValueSerializer, Result,
    RootValue, ToPlistKey,
};
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_bytes::{ByteBuf, Bytes};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

/// Anything which can be converted into a property-list value.
///
/// Leaf types return their node directly and ignore the converter. Containers
/// hand their children back to the converter so that options and the depth
/// limit apply to the whole tree.
pub trait ToPlistValue {
    /// Converts this value into a property-list node.
    ///
    /// # Errors
    ///
    /// Only policy violations configured in the converter's options can fail:
    /// depth limit, duplicate keys, or keys refused by the key formatter.
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue>;
}

/// Anything which can be converted into the root of a property list.
///
/// Implement [`ToPlistValue`] with
/// [`impl_to_plist_value_via_root!`](crate::impl_to_plist_value_via_root) so the
/// value converts identically wherever it appears.
pub trait ToRootPlistValue: ToPlistValue {
    /// Converts this value into a document root.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ToPlistValue::to_plist_value`].
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue>;
}

/// Per-call conversion state: the options in effect and the current nesting depth.
///
/// A converter is created by the crate's entry points and threaded through
/// every `to_plist_value` call. It holds no global state, so independent
/// conversions may run on different threads at the same time.
#[derive(Debug)]
pub struct Converter<'a> {
    options: &'a ConvertOptions,
    depth: usize,
}

impl<'a> Converter<'a> {
    #[must_use]
    pub fn new(options: &'a ConvertOptions) -> Self {
        Converter { options, depth: 0 }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        self.options
    }

    /// Number of containers currently being converted.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Converts a nested value.
    pub fn convert<T>(&mut self, value: &T) -> Result<PlistValue>
    where
        T: ToPlistValue + ?Sized,
    {
        value.to_plist_value(self)
    }

    /// Formats a native key with the configured key formatter.
    pub fn convert_key<K>(&self, key: &K) -> Result<String>
    where
        K: ToPlistKey + ?Sized,
    {
        self.options.key_formatter.format(&key)
    }

    /// Converts every element in order into an array node.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DepthExceeded`] when the array would nest past the
    /// limit, or with the first error raised by an element.
    pub fn convert_array<'v, T, I>(&mut self, items: I) -> Result<PlistValue>
    where
        I: IntoIterator<Item = &'v T>,
        T: ToPlistValue + ?Sized + 'v,
    {
        self.nested(|cx| {
            let items = items.into_iter();
            let mut out = Vec::with_capacity(items.size_hint().0);
            for item in items {
                out.push(item.to_plist_value(cx)?);
            }
            Ok(PlistValue::Array(out))
        })
    }

    /// Converts map entries into a dictionary.
    ///
    /// Each key goes through the key formatter, then each value is converted.
    /// Collisions between formatted keys follow the configured
    /// [`DuplicateKeyPolicy`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DepthExceeded`], [`Error::DuplicateKey`] under
    /// [`DuplicateKeyPolicy::Reject`], or any error from the key formatter or a
    /// value.
    pub fn convert_map<'v, K, V, I>(&mut self, entries: I) -> Result<PlistMap>
    where
        I: IntoIterator<Item = (&'v K, &'v V)>,
        K: ToPlistKey + ?Sized + 'v,
        V: ToPlistValue + ?Sized + 'v,
    {
        self.convert_dictionary(|dict| {
            for (key, value) in entries {
                dict.entry(key, value)?;
            }
            Ok(())
        })
    }

    /// Builds a dictionary one entry at a time.
    ///
    /// This is how hand-written [`ToRootPlistValue`] impls produce their
    /// dictionary: the dictionary counts as one nesting level, and every entry
    /// added through the [`DictionaryBuilder`] is key-formatted and checked
    /// against the duplicate-key policy like any map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DepthExceeded`] before `build` runs, or with the
    /// first error `build` returns.
    pub fn convert_dictionary<F>(&mut self, build: F) -> Result<PlistMap>
    where
        F: FnOnce(&mut DictionaryBuilder<'_, 'a>) -> Result<()>,
    {
        self.nested(|cx| {
            let mut dict = DictionaryBuilder {
                cx,
                map: PlistMap::new(),
            };
            build(&mut dict)?;
            Ok(dict.map)
        })
    }

    /// Converts any `T: Serialize` through the serde bridge, sharing this
    /// converter's options and depth.
    ///
    /// # Errors
    ///
    /// Everything [`to_value_with_options`](crate::to_value_with_options)
    /// reports.
    pub fn serialize<T>(&mut self, value: &T) -> Result<PlistValue>
    where
        T: Serialize + ?Sized,
    {
        let depth = self.depth;
        let result = value.serialize(PlistValueSerializer::new(self));
        self.depth = depth;
        result
    }

    /// Inserts an already formatted entry, applying the duplicate-key policy.
    pub(crate) fn insert_entry(
        &self,
        map: &mut PlistMap,
        key: String,
        value: PlistValue,
    ) -> Result<()> {
        if map.contains_key(&key) {
            match self.options.duplicate_keys {
                DuplicateKeyPolicy::Reject => return Err(Error::duplicate_key(&key)),
                DuplicateKeyPolicy::LastWriteWins => {
                    tracing::debug!(key = %key, "duplicate dictionary key, keeping the later value");
                }
            }
        }
        map.insert(key, value);
        Ok(())
    }

    /// Opens one container level, failing if that would pass the depth limit.
    pub(crate) fn enter(&mut self) -> Result<()> {
        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(Error::depth_exceeded(limit));
            }
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.enter()?;
        let result = f(self);
        self.leave();
        result
    }
}

/// Collects the entries of a dictionary under construction.
///
/// Obtained from [`Converter::convert_dictionary`].
#[derive(Debug)]
pub struct DictionaryBuilder<'c, 'a> {
    cx: &'c mut Converter<'a>,
    map: PlistMap,
}

impl<'a> DictionaryBuilder<'_, 'a> {
    /// Formats `key`, converts `value` and adds the pair.
    ///
    /// # Errors
    ///
    /// Fails if the key formatter rejects the key, the value fails to convert,
    /// or the formatted key is already present under
    /// [`DuplicateKeyPolicy::Reject`].
    pub fn entry<K, V>(&mut self, key: &K, value: &V) -> Result<&mut Self>
    where
        K: ToPlistKey + ?Sized,
        V: ToPlistValue + ?Sized,
    {
        let key = self.cx.convert_key(key)?;
        let value = value.to_plist_value(self.cx)?;
        self.cx.insert_entry(&mut self.map, key, value)?;
        Ok(self)
    }

    /// Entries added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The converter driving this dictionary, for values that need it directly.
    pub fn converter(&mut self) -> &mut Converter<'a> {
        self.cx
    }
}

// Scalars

macro_rules! impl_number {
    ($($ty:ty),*) => {
        $(
            impl ToPlistValue for $ty {
                fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
                    Ok(PlistValue::from(*self))
                }
            }
        )*
    };
}

impl_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl ToPlistValue for bool {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::Bool(*self))
    }
}

impl ToPlistValue for char {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::String(self.to_string()))
    }
}

impl ToPlistValue for str {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::String(self.to_string()))
    }
}

impl ToPlistValue for String {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::String(self.clone()))
    }
}

/// Binary blobs. `Vec<u8>` is an array of numbers; wrap bytes in `ByteBuf`
/// or `Bytes` to get a data node.
impl ToPlistValue for ByteBuf {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::Data(self.to_vec()))
    }
}

impl ToPlistValue for Bytes {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::Data(self.to_vec()))
    }
}

impl<Tz: TimeZone> ToPlistValue for DateTime<Tz> {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::Date(self.with_timezone(&Utc)))
    }
}

impl ToPlistValue for SystemTime {
    fn to_plist_value(&self, _cx: &mut Converter<'_>) -> Result<PlistValue> {
        Ok(PlistValue::Date(DateTime::<Utc>::from(*self)))
    }
}

// Pointers

impl<T: ToPlistValue + ?Sized> ToPlistValue for &T {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        (**self).to_plist_value(cx)
    }
}

impl<T: ToPlistValue + ?Sized> ToPlistValue for Box<T> {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        (**self).to_plist_value(cx)
    }
}

impl<T: ToPlistValue + ?Sized> ToPlistValue for Rc<T> {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        (**self).to_plist_value(cx)
    }
}

impl<T: ToPlistValue + ?Sized> ToPlistValue for Arc<T> {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        (**self).to_plist_value(cx)
    }
}

impl<T> ToPlistValue for Cow<'_, T>
where
    T: ToPlistValue + ToOwned + ?Sized,
{
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        (**self).to_plist_value(cx)
    }
}

// Sequences

impl<T: ToPlistValue> ToPlistValue for [T] {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        cx.convert_array(self.iter())
    }
}

impl<T: ToPlistValue, const N: usize> ToPlistValue for [T; N] {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        cx.convert_array(self.iter())
    }
}

impl<T: ToPlistValue> ToPlistValue for Vec<T> {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        cx.convert_array(self.iter())
    }
}

impl<T: ToPlistValue> ToPlistValue for VecDeque<T> {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        cx.convert_array(self.iter())
    }
}

// Maps

impl<K, V, S> ToRootPlistValue for HashMap<K, V, S>
where
    K: ToPlistKey,
    V: ToPlistValue,
    S: BuildHasher,
{
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        cx.convert_map(self.iter()).map(RootValue::from_map)
    }
}

impl<K, V, S> ToRootPlistValue for IndexMap<K, V, S>
where
    K: ToPlistKey,
    V: ToPlistValue,
    S: BuildHasher,
{
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        cx.convert_map(self.iter()).map(RootValue::from_map)
    }
}

impl<K, V> ToRootPlistValue for BTreeMap<K, V>
where
    K: ToPlistKey,
    V: ToPlistValue,
{
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        cx.convert_map(self.iter()).map(RootValue::from_map)
    }
}

impl<K, V, S> ToPlistValue for HashMap<K, V, S>
where
    K: ToPlistKey,
    V: ToPlistValue,
    S: BuildHasher,
{
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        self.to_root_plist_value(cx).map(RootValue::into_value)
    }
}

impl<K, V, S> ToPlistValue for IndexMap<K, V, S>
where
    K: ToPlistKey,
    V: ToPlistValue,
    S: BuildHasher,
{
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        self.to_root_plist_value(cx).map(RootValue::into_value)
    }
}

impl<K, V> ToPlistValue for BTreeMap<K, V>
where
    K: ToPlistKey,
    V: ToPlistValue,
{
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        self.to_root_plist_value(cx).map(RootValue::into_value)
    }
}

impl<T: ToRootPlistValue + ?Sized> ToRootPlistValue for &T {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        (**self).to_root_plist_value(cx)
    }
}

impl<T: ToRootPlistValue + ?Sized> ToRootPlistValue for Box<T> {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        (**self).to_root_plist_value(cx)
    }
}

impl<T: ToRootPlistValue + ?Sized> ToRootPlistValue for Rc<T> {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        (**self).to_root_plist_value(cx)
    }
}

impl<T: ToRootPlistValue + ?Sized> ToRootPlistValue for Arc<T> {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        (**self).to_root_plist_value(cx)
    }
}

// Document nodes re-walk their children so that options still apply.

impl ToPlistValue for PlistValue {
    fn to_plist_value(&self, cx: &mut Converter<'_>) -> Result<PlistValue> {
        match self {
            PlistValue::Array(items) => cx.convert_array(items.iter()),
            PlistValue::Dictionary(map) => map.to_plist_value(cx),
            leaf => Ok(leaf.clone()),
        }
    }
}

impl ToRootPlistValue for PlistMap {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        cx.convert_map(self.iter()).map(RootValue::from_map)
    }
}


impl ToRootPlistValue for RootValue {
    fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
        self.as_map().to_root_plist_value(cx)
    }
}

crate::impl_to_plist_value_via_root!(PlistMap, RootValue);
