/// Builds a [`PlistValue`](crate::PlistValue) from a JSON-like literal.
///
/// Objects become dictionaries in the order written, arrays become arrays, and
/// any other expression goes through `PlistValue::from`. Inside arrays and
/// objects each item is a literal (negative numbers included), a nested
/// array or object, or a single token tree; wrap longer expressions in
/// parentheses.
///
/// ```rust
/// use plist_protocols::{plist, PlistValue};
///
/// let offset = 7;
/// let value = plist!({
///     "name": "Alice",
///     "age": 30,
///     "range": [-1, 1.5],
///     "tags": ["admin", true, (offset * 2)]
/// });
/// assert!(value.is_dictionary());
/// ```
#[macro_export]
macro_rules! plist {
    (@array [$($done:expr,)*]) => {
        vec![$($done,)*]
    };

    (@array [$($done:expr,)*] $lit:literal $(, $($rest:tt)*)?) => {
        $crate::plist!(@array [$($done,)* $crate::PlistValue::from($lit),] $($($rest)*)?)
    };

    (@array [$($done:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::plist!(@array [$($done,)* $crate::plist!($elem),] $($($rest)*)?)
    };

    (@dict $dict:ident) => {};

    (@dict $dict:ident $key:literal : $value:literal $(, $($rest:tt)*)?) => {
        $dict.insert($key.to_string(), $crate::PlistValue::from($value));
        $crate::plist!(@dict $dict $($($rest)*)?);
    };

    (@dict $dict:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $dict.insert($key.to_string(), $crate::plist!($value));
        $crate::plist!(@dict $dict $($($rest)*)?);
    };

    ([ $($elems:tt)* ]) => {
        $crate::PlistValue::Array($crate::plist!(@array [] $($elems)*))
    };

    ({ $($entries:tt)* }) => {{
        #[allow(unused_mut)]
        let mut dict = $crate::PlistMap::new();
        $crate::plist!(@dict dict $($entries)*);
        $crate::PlistValue::Dictionary(dict)
    }};

    ($other:expr) => {
        $crate::PlistValue::from($other)
    };
}

/// Implements [`ToPlistValue`](crate::ToPlistValue) for root-capable types by
/// delegating to [`ToRootPlistValue`](crate::ToRootPlistValue).
///
/// A root-capable type then converts identically wherever it appears, and only
/// `to_root_plist_value` has to be written by hand.
///
/// ```rust
/// use plist_protocols::{
///     impl_to_plist_value_via_root, value_of, Converter, Result, RootValue, ToRootPlistValue,
/// };
///
/// struct Version { major: u32, minor: u32 }
///
/// impl ToRootPlistValue for Version {
///     fn to_root_plist_value(&self, cx: &mut Converter<'_>) -> Result<RootValue> {
///         cx.convert_dictionary(|dict| {
///             dict.entry("major", &self.major)?.entry("minor", &self.minor)?;
///             Ok(())
///         })
///         .map(RootValue::from_map)
///     }
/// }
///
/// impl_to_plist_value_via_root!(Version);
///
/// assert!(value_of(&vec![Version { major: 1, minor: 2 }]).is_ok());
/// ```
#[macro_export]
macro_rules! impl_to_plist_value_via_root {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ToPlistValue for $ty {
                fn to_plist_value(
                    &self,
                    cx: &mut $crate::Converter<'_>,
                ) -> $crate::Result<$crate::PlistValue> {
                    $crate::ToRootPlistValue::to_root_plist_value(self, cx)
                        .map($crate::RootValue::into_value)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, PlistMap, PlistValue};

    #[test]
    fn test_plist_macro_primitives() {
        assert_eq!(plist!(true), PlistValue::Bool(true));
        assert_eq!(plist!(false), PlistValue::Bool(false));
        assert_eq!(plist!(42), PlistValue::Number(Number::Integer(42)));
        assert_eq!(plist!(3.5), PlistValue::Number(Number::Real(3.5)));
        assert_eq!(plist!("hello"), PlistValue::String("hello".to_string()));
    }

    #[test]
    fn test_plist_macro_arrays() {
        assert_eq!(plist!([]), PlistValue::Array(vec![]));
        assert_eq!(
            plist!([1, "x", false]),
            PlistValue::Array(vec![
                PlistValue::from(1),
                PlistValue::from("x"),
                PlistValue::Bool(false),
            ])
        );
    }

    #[test]
    fn test_plist_macro_dictionaries() {
        assert_eq!(plist!({}), PlistValue::Dictionary(PlistMap::new()));

        let dict = plist!({
            "outer": { "inner": [1, 2] },
            "flag": true
        });

        match dict {
            PlistValue::Dictionary(map) => {
                assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["outer", "flag"]);
                let inner = map
                    .get("outer")
                    .and_then(PlistValue::as_dictionary)
                    .and_then(|d| d.get("inner"));
                assert_eq!(inner.and_then(|v| v.as_array()).map(Vec::len), Some(2));
            }
            _ => panic!("Expected dictionary"),
        }
    }

    #[test]
    fn test_plist_macro_negative_literals() {
        assert_eq!(plist!(-3), PlistValue::from(-3));
        assert_eq!(
            plist!([-1, -2.5, 3]),
            PlistValue::Array(vec![
                PlistValue::from(-1),
                PlistValue::from(-2.5),
                PlistValue::from(3),
            ])
        );

        let dict = plist!({ "min": -40, "max": 85, "nested": [-1, { "k": -2 }], });
        let map = dict.as_dictionary().unwrap();
        assert_eq!(map.get("min"), Some(&PlistValue::from(-40)));
        assert_eq!(
            map.get("nested"),
            Some(&PlistValue::Array(vec![
                PlistValue::from(-1),
                plist!({ "k": -2 }),
            ]))
        );
    }

    #[test]
    fn test_plist_macro_parenthesised_expressions() {
        let n = 4;
        assert_eq!(
            plist!([(n * 2), (PlistValue::Data(vec![1]))]),
            PlistValue::Array(vec![PlistValue::from(8), PlistValue::Data(vec![1])])
        );
    }
}
