//! Serde bridge into the property-list value model.
//!
//! Types that already derive `Serialize` can be turned into a [`PlistValue`]
//! without implementing [`ToPlistValue`](crate::ToPlistValue). The bridge is
//! dynamic, so rules the typed traits enforce at compile time are checked here
//! at runtime:
//!
//! - `None`, `()` and unit structs have no property-list representation and fail
//!   with [`Error::UnsupportedType`]. Use `#[serde(skip_serializing_if = "Option::is_none")]`
//!   on optional fields.
//! - Map keys must serialize to strings or chars.
//! - [`to_root_value`](crate::to_root_value) rejects anything but a dictionary.
//!
//! The bridge runs on a [`Converter`], so [`ConvertOptions`](crate::ConvertOptions)
//! apply exactly as on the typed path: struct field names and map keys go
//! through the key formatter, colliding keys follow the duplicate-key policy,
//! and every array or dictionary produced counts toward the depth limit.
//!
//! Structs and maps become dictionaries in field order, sequences and tuples
//! become arrays, byte buffers become data, unit variants become strings, and
//! other enum variants become a single-entry dictionary keyed by the variant name.
//! Variant names are tags and are never key-formatted.
//!
//! ## Examples
//!
//! ```rust
//! use plist_protocols::{to_value, PlistValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Window { title: String, size: (u32, u32) }
//!
//! let value = to_value(&Window { title: "Main".into(), size: (800, 600) }).unwrap();
//! let dict = value.as_dictionary().unwrap();
//! assert_eq!(dict.get("title"), Some(&PlistValue::from("Main")));
//! assert_eq!(dict.get("size").and_then(|v| v.as_array()).map(Vec::len), Some(2));
//! ```

use crate::{Converter, Error, Number, PlistMap, PlistValue, Result};
use serde::{ser, Serialize};

/// A serializer whose output is a [`PlistValue`] tree instead of text.
///
/// Usually reached through [`to_value`](crate::to_value) or
/// [`Converter::serialize`].
pub struct PlistValueSerializer<'c, 'a> {
    cx: &'c mut Converter<'a>,
}

impl<'c, 'a> PlistValueSerializer<'c, 'a> {
    pub fn new(cx: &'c mut Converter<'a>) -> Self {
        PlistValueSerializer { cx }
    }
}

pub struct SerializeVec<'c, 'a> {
    cx: &'c mut Converter<'a>,
    vec: Vec<PlistValue>,
    variant: Option<&'static str>,
}

pub struct SerializeMap<'c, 'a> {
    cx: &'c mut Converter<'a>,
    map: PlistMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl<'c, 'a> ser::Serializer for PlistValueSerializer<'c, 'a> {
    type Ok = PlistValue;
    type Error = Error;

    type SerializeSeq = SerializeVec<'c, 'a>;
    type SerializeTuple = SerializeVec<'c, 'a>;
    type SerializeTupleStruct = SerializeVec<'c, 'a>;
    type SerializeTupleVariant = SerializeVec<'c, 'a>;
    type SerializeMap = SerializeMap<'c, 'a>;
    type SerializeStruct = SerializeMap<'c, 'a>;
    type SerializeStructVariant = SerializeMap<'c, 'a>;

    fn serialize_bool(self, v: bool) -> Result<PlistValue> {
        Ok(PlistValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<PlistValue> {
        Ok(PlistValue::Number(Number::from_i128(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<PlistValue> {
        Ok(PlistValue::Number(Number::from_u128(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<PlistValue> {
        Ok(PlistValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<PlistValue> {
        Ok(PlistValue::Data(v.to_vec()))
    }

    fn serialize_none(self) -> Result<PlistValue> {
        Err(Error::unsupported_type("none (property lists have no null)"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<PlistValue> {
        Err(Error::unsupported_type("unit (property lists have no null)"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<PlistValue> {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<PlistValue> {
        Ok(PlistValue::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<PlistValue>
    where
        T: ?Sized + Serialize,
    {
        self.cx.enter()?;
        let inner = value.serialize(PlistValueSerializer::new(self.cx));
        self.cx.leave();
        Ok(tagged(variant, inner?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'c, 'a>> {
        SerializeVec::open(self.cx, len.unwrap_or(0), None)
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'c, 'a>> {
        SerializeVec::open(self.cx, len, None)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec<'c, 'a>> {
        SerializeVec::open(self.cx, len, None)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec<'c, 'a>> {
        SerializeVec::open(self.cx, len, Some(variant))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap<'c, 'a>> {
        SerializeMap::open(self.cx, len.unwrap_or(0), None)
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap<'c, 'a>> {
        SerializeMap::open(self.cx, len, None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap<'c, 'a>> {
        SerializeMap::open(self.cx, len, Some(variant))
    }
}

/// Enters the levels a container occupies: one for the container, one more
/// for the dictionary tagging an enum variant.
fn enter_levels(cx: &mut Converter<'_>, variant: Option<&'static str>) -> Result<()> {
    if variant.is_some() {
        cx.enter()?;
    }
    if let Err(err) = cx.enter() {
        if variant.is_some() {
            cx.leave();
        }
        return Err(err);
    }
    Ok(())
}

fn leave_levels(cx: &mut Converter<'_>, variant: Option<&'static str>) {
    cx.leave();
    if variant.is_some() {
        cx.leave();
    }
}

impl<'c, 'a> SerializeVec<'c, 'a> {
    fn open(
        cx: &'c mut Converter<'a>,
        capacity: usize,
        variant: Option<&'static str>,
    ) -> Result<Self> {
        enter_levels(cx, variant)?;
        Ok(SerializeVec {
            cx,
            vec: Vec::with_capacity(capacity),
            variant,
        })
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let value = value.serialize(PlistValueSerializer::new(self.cx))?;
        self.vec.push(value);
        Ok(())
    }

    fn finish(self) -> PlistValue {
        leave_levels(self.cx, self.variant);
        let array = PlistValue::Array(self.vec);
        match self.variant {
            Some(variant) => tagged(variant, array),
            None => array,
        }
    }
}

impl<'c, 'a> SerializeMap<'c, 'a> {
    fn open(
        cx: &'c mut Converter<'a>,
        capacity: usize,
        variant: Option<&'static str>,
    ) -> Result<Self> {
        enter_levels(cx, variant)?;
        Ok(SerializeMap {
            cx,
            map: PlistMap::with_capacity(capacity),
            current_key: None,
            variant,
        })
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let key = self.cx.convert_key(key)?;
        let value = value.serialize(PlistValueSerializer::new(self.cx))?;
        self.cx.insert_entry(&mut self.map, key, value)
    }

    fn finish(self) -> PlistValue {
        leave_levels(self.cx, self.variant);
        let dict = PlistValue::Dictionary(self.map);
        match self.variant {
            Some(variant) => tagged(variant, dict),
            None => dict,
        }
    }
}

impl ser::SerializeSeq for SerializeVec<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(PlistValueSerializer::new(self.cx))? {
            PlistValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::key_rejected(
                &other.to_string(),
                "dictionary keys must serialize to strings",
            )),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(&key, value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key, value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap<'_, '_> {
    type Ok = PlistValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key, value)
    }

    fn end(self) -> Result<PlistValue> {
        Ok(self.finish())
    }
}

fn tagged(variant: &'static str, value: PlistValue) -> PlistValue {
    let mut map = PlistMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    PlistValue::Dictionary(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConvertOptions, DuplicateKeyPolicy, KeyFormatter};
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn to_plist_value<T: Serialize + ?Sized>(value: &T) -> Result<PlistValue> {
        Converter::new(&ConvertOptions::default()).serialize(value)
    }

    /// `n` arrays nested inside each other around a single integer.
    struct Nested(usize);

    impl Serialize for Nested {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            use serde::ser::SerializeSeq;
            if self.0 == 0 {
                return serializer.serialize_i32(0);
            }
            let mut seq = serializer.serialize_seq(Some(1))?;
            seq.serialize_element(&Nested(self.0 - 1))?;
            seq.end()
        }
    }

    #[derive(Serialize)]
    enum Chain {
        End,
        Link(Box<Chain>),
    }

    fn chain(len: usize) -> Chain {
        (0..len).fold(Chain::End, |next, _| Chain::Link(Box::new(next)))
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Line(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_plist_value(&Shape::Point).unwrap(), PlistValue::from("Point"));

        let circle = to_plist_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle, tagged("Circle", PlistValue::from(1.5)));

        let line = to_plist_value(&Shape::Line(1, 2)).unwrap();
        assert_eq!(
            line,
            tagged(
                "Line",
                PlistValue::Array(vec![PlistValue::from(1), PlistValue::from(2)])
            )
        );

        let rect = to_plist_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect
            .as_dictionary()
            .and_then(|d| d.get("Rect"))
            .and_then(PlistValue::as_dictionary)
            .unwrap();
        assert_eq!(inner.get("w"), Some(&PlistValue::from(3)));
        assert_eq!(inner.keys().cloned().collect::<Vec<_>>(), vec!["w", "h"]);
    }

    #[test]
    fn test_null_like_values_fail() {
        assert!(matches!(
            to_plist_value(&Option::<i32>::None),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(to_plist_value(&()), Err(Error::UnsupportedType(_))));
        assert_eq!(to_plist_value(&Some(3)).unwrap(), PlistValue::from(3));
    }

    #[test]
    fn test_bytes_and_wide_integers() {
        let bytes = serde_bytes::ByteBuf::from(vec![1, 2, 3]);
        assert_eq!(
            to_plist_value(&bytes).unwrap(),
            PlistValue::Data(vec![1, 2, 3])
        );
        assert_eq!(
            to_plist_value(&u128::MAX).unwrap(),
            PlistValue::Number(Number::from_u128(u128::MAX))
        );
        assert_eq!(
            to_plist_value(&f64::INFINITY).unwrap(),
            PlistValue::Number(Number::Infinity)
        );
    }

    #[test]
    fn test_non_string_map_keys_rejected() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        assert!(matches!(
            to_plist_value(&map),
            Err(Error::KeyRejected { .. })
        ));

        let mut map = BTreeMap::new();
        map.insert('k', "v");
        let dict = to_plist_value(&map).unwrap();
        assert_eq!(
            dict.as_dictionary().and_then(|d| d.get("k")),
            Some(&PlistValue::from("v"))
        );
    }

    #[test]
    fn test_depth_limit_applies_to_sequences() {
        let options = ConvertOptions::new().with_max_depth(Some(3));
        let mut cx = Converter::new(&options);
        assert!(cx.serialize(&Nested(3)).is_ok());
        assert_eq!(
            cx.serialize(&Nested(4)),
            Err(Error::DepthExceeded { limit: 3 })
        );
        assert_eq!(cx.depth(), 0);
    }

    #[test]
    fn test_default_depth_limit_stops_deep_input() {
        // Unoptimised builds need more than the default test stack for 512 levels.
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(|| {
                assert!(to_plist_value(&Nested(crate::DEFAULT_MAX_DEPTH)).is_ok());
                assert_eq!(
                    to_plist_value(&Nested(200_000)),
                    Err(Error::DepthExceeded {
                        limit: crate::DEFAULT_MAX_DEPTH
                    })
                );
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_newtype_variants_count_as_levels() {
        let options = ConvertOptions::new().with_max_depth(Some(4));
        let mut cx = Converter::new(&options);
        assert!(cx.serialize(&chain(4)).is_ok());
        assert_eq!(
            cx.serialize(&chain(5)),
            Err(Error::DepthExceeded { limit: 4 })
        );
    }

    #[test]
    fn test_struct_variant_counts_tag_and_body() {
        let options = ConvertOptions::new().with_max_depth(Some(1));
        let mut cx = Converter::new(&options);
        assert!(cx.serialize(&Shape::Rect { w: 1, h: 1 }).is_err());
        assert_eq!(cx.depth(), 0);

        let options = ConvertOptions::new().with_max_depth(Some(2));
        assert!(Converter::new(&options)
            .serialize(&Shape::Rect { w: 1, h: 1 })
            .is_ok());
    }

    #[test]
    fn test_keys_are_formatted_and_checked() {
        #[derive(Serialize)]
        struct Headers {
            #[serde(rename = "Accept")]
            accept: &'static str,
            #[serde(flatten)]
            extra: BTreeMap<&'static str, &'static str>,
        }

        let mut extra = BTreeMap::new();
        extra.insert("ACCEPT", "text/plain");
        let headers = Headers {
            accept: "*/*",
            extra,
        };

        let lower = ConvertOptions::new().with_key_formatter(KeyFormatter::lowercase());
        let value = Converter::new(&lower).serialize(&headers).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("accept"), Some(&PlistValue::from("text/plain")));

        let strict = lower.with_duplicate_keys(DuplicateKeyPolicy::Reject);
        assert_eq!(
            Converter::new(&strict).serialize(&headers),
            Err(Error::DuplicateKey {
                key: "accept".to_string()
            })
        );
    }

    #[test]
    fn test_variant_tags_are_not_formatted() {
        let options = ConvertOptions::new().with_key_formatter(KeyFormatter::prefixed("x."));
        let value = Converter::new(&options)
            .serialize(&Shape::Circle(2.0))
            .unwrap();
        assert_eq!(value, tagged("Circle", PlistValue::from(2.0)));
    }
}
