//! Dynamic value representation for property-list documents.
//!
//! This module provides the [`PlistValue`] enum, one node of a property-list
//! document tree, and [`Number`], its numeric payload.
//!
//! ## Core Types
//!
//! - [`PlistValue`]: boolean, number, string, data, date, array or dictionary
//! - [`Number`]: integers of any width plus reals, with non-finite reals kept as
//!   their own variants instead of being rejected
//!
//! The enum is closed: the only way for an application type to take part in a
//! document is to implement [`ToPlistValue`](crate::ToPlistValue) and produce one
//! of these variants. There is no null variant because property lists have none.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{Number, PlistValue};
//!
//! let flag = PlistValue::from(true);
//! let count = PlistValue::from(42u8);
//! let ratio = PlistValue::from(f64::NAN);
//!
//! assert!(flag.is_bool());
//! assert_eq!(count.as_i64(), Some(42));
//! assert_eq!(ratio, PlistValue::Number(Number::NaN));
//! ```

use crate::{Error, PlistMap};
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_bytes::ByteBuf;
use std::fmt;

/// One node of a property-list document.
///
/// Arrays and dictionaries own their children; a tree built by conversion never
/// shares subtrees and therefore cannot contain cycles.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::{plist, PlistValue};
///
/// let doc = plist!({ "a": 1, "b": [true, "x"] });
/// let b = doc.as_dictionary().and_then(|d| d.get("b")).unwrap();
///
/// assert_eq!(b.as_array().map(Vec::len), Some(2));
/// assert!(matches!(b.as_array().unwrap()[0], PlistValue::Bool(true)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PlistValue {
    Bool(bool),
    Number(Number),
    String(String),
    Data(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<PlistValue>),
    Dictionary(PlistMap),
}

/// A numeric property-list value.
///
/// Constructors normalise their input so that equal numbers compare equal:
/// every integer that fits in an `i64` is stored as [`Number::Integer`], wider
/// integers as [`Number::BigInteger`], and non-finite floats map onto the
/// dedicated [`Number::Infinity`], [`Number::NegativeInfinity`] and
/// [`Number::NaN`] variants. `Real` therefore only ever holds finite values.
///
/// # Examples
///
/// ```rust
/// use plist_protocols::Number;
///
/// assert_eq!(Number::from(7u64), Number::Integer(7));
/// assert!(Number::from(u64::MAX).is_big_integer());
/// assert_eq!(Number::from(f32::INFINITY), Number::Infinity);
/// assert_eq!(Number::from(f64::NAN), Number::NaN);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    BigInteger(BigInt),
    Real(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Builds a number from an `f64`, routing non-finite values to their own variants.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else {
            Number::Real(value)
        }
    }

    /// Builds a number from an `i128`, using `Integer` whenever the value fits.
    #[must_use]
    pub fn from_i128(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInteger(BigInt::from(value)),
        }
    }

    /// Builds a number from a `u128`, using `Integer` whenever the value fits.
    #[must_use]
    pub fn from_u128(value: u128) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::BigInteger(BigInt::from(value)),
        }
    }

    /// Returns `true` for integers of any width.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::BigInteger(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_big_integer(&self) -> bool {
        matches!(self, Number::BigInteger(_))
    }

    /// Returns `true` for finite reals.
    #[inline]
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Number::Real(_))
    }

    /// Returns `true` for Infinity, -Infinity and NaN.
    #[inline]
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(
            self,
            Number::Infinity | Number::NegativeInfinity | Number::NaN
        )
    }

    /// Converts this number to an `i64` if it is an integer in range.
    ///
    /// Reals are never truncated; `Number::Real(42.0).as_i64()` is `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::BigInteger(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Converts this number to a `u64` if it is a non-negative integer in range.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Integer(i) => u64::try_from(*i).ok(),
            Number::BigInteger(b) => u64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Converts this number to an `f64`.
    ///
    /// Always succeeds; integers wider than 53 bits lose precision.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::BigInteger(b) => b.to_f64().unwrap_or(f64::NAN),
            Number::Real(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::BigInteger(b) => write!(f, "{}", b),
            Number::Real(r) => write!(f, "{}", r),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

macro_rules! number_from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(i64::from(value))
                }
            }
        )*
    };
}

number_from_lossless!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! number_from_wide {
    ($($ty:ty => $via:ident as $wide:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$via(value as $wide)
                }
            }
        )*
    };
}

number_from_wide!(
    isize => from_i128 as i128,
    i128 => from_i128 as i128,
    usize => from_u128 as u128,
    u64 => from_u128 as u128,
    u128 => from_u128 as u128
);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::from_f64(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

impl PlistValue {
    /// Returns a short name for the active variant, used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plist_protocols::PlistValue;
    ///
    /// assert_eq!(PlistValue::from("x").kind(), "string");
    /// assert_eq!(PlistValue::Array(vec![]).kind(), "array");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            PlistValue::Bool(_) => "boolean",
            PlistValue::Number(_) => "number",
            PlistValue::String(_) => "string",
            PlistValue::Data(_) => "data",
            PlistValue::Date(_) => "date",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PlistValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, PlistValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PlistValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, PlistValue::Data(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, PlistValue::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, PlistValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_dictionary(&self) -> bool {
        matches!(self, PlistValue::Dictionary(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// Booleans are never confused with the integers 0 and 1:
    ///
    /// ```rust
    /// use plist_protocols::PlistValue;
    ///
    /// assert_eq!(PlistValue::from(true).as_bool(), Some(true));
    /// assert_eq!(PlistValue::from(1).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            PlistValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is an integer that fits in an `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// If the value is a number, returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            PlistValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            PlistValue::Date(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<PlistValue>> {
        match self {
            PlistValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&PlistMap> {
        match self {
            PlistValue::Dictionary(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for PlistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlistValue::Bool(b) => write!(f, "{}", b),
            PlistValue::Number(n) => write!(f, "{}", n),
            PlistValue::String(s) => write!(f, "{:?}", s),
            PlistValue::Data(bytes) => {
                f.write_str("<")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str(">")
            }
            PlistValue::Date(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PlistValue::Array(arr) => {
                f.write_str("[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            PlistValue::Dictionary(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Integer(i) => serializer.serialize_i64(*i),
            Number::BigInteger(b) => {
                if let Ok(u) = u64::try_from(b) {
                    serializer.serialize_u64(u)
                } else if let Ok(i) = i128::try_from(b) {
                    serializer.serialize_i128(i)
                } else if let Ok(u) = u128::try_from(b) {
                    serializer.serialize_u128(u)
                } else {
                    serializer.serialize_str(&b.to_string())
                }
            }
            Number::Real(r) => serializer.serialize_f64(*r),
            Number::Infinity => serializer.serialize_f64(f64::INFINITY),
            Number::NegativeInfinity => serializer.serialize_f64(f64::NEG_INFINITY),
            Number::NaN => serializer.serialize_f64(f64::NAN),
        }
    }
}

impl Serialize for PlistValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PlistValue::Bool(b) => serializer.serialize_bool(*b),
            PlistValue::Number(n) => n.serialize(serializer),
            PlistValue::String(s) => serializer.serialize_str(s),
            PlistValue::Data(bytes) => serializer.serialize_bytes(bytes),
            PlistValue::Date(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PlistValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            PlistValue::Dictionary(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

// TryFrom implementations for extracting payloads from PlistValue
impl TryFrom<PlistValue> for i64 {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::custom(format!("number {} does not fit in i64", n))),
            other => Err(Error::custom(format!(
                "expected integer, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<PlistValue> for f64 {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Number(n) => Ok(n.as_f64()),
            other => Err(Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<PlistValue> for bool {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Bool(b) => Ok(b),
            other => Err(Error::custom(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<PlistValue> for String {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::String(s) => Ok(s),
            other => Err(Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<PlistValue> for Vec<u8> {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Data(bytes) => Ok(bytes),
            other => Err(Error::custom(format!(
                "expected data, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<PlistValue> for DateTime<Utc> {
    type Error = Error;

    fn try_from(value: PlistValue) -> crate::Result<Self> {
        match value {
            PlistValue::Date(dt) => Ok(dt),
            other => Err(Error::custom(format!(
                "expected date, found {}",
                other.kind()
            ))),
        }
    }
}

// From implementations for creating PlistValue from primitives
macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PlistValue {
                fn from(value: $ty) -> Self {
                    PlistValue::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<Number> for PlistValue {
    fn from(value: Number) -> Self {
        PlistValue::Number(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Bool(value)
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<char> for PlistValue {
    fn from(value: char) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<ByteBuf> for PlistValue {
    fn from(value: ByteBuf) -> Self {
        PlistValue::Data(value.into_vec())
    }
}

impl From<DateTime<Utc>> for PlistValue {
    fn from(value: DateTime<Utc>) -> Self {
        PlistValue::Date(value)
    }
}

impl From<Vec<PlistValue>> for PlistValue {
    fn from(value: Vec<PlistValue>) -> Self {
        PlistValue::Array(value)
    }
}

impl From<PlistMap> for PlistValue {
    fn from(value: PlistMap) -> Self {
        PlistValue::Dictionary(value)
    }
}
