//! Property-based tests for the conversion laws
//!
//! Order preservation for sequences, entry preservation for maps, exact
//! scalar mapping, and idempotence of re-converting a finished tree.

use plist_protocols::{root_value_of, to_value, value_of, Number, PlistValue};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn arb_leaf() -> impl Strategy<Value = PlistValue> {
    prop_oneof![
        any::<bool>().prop_map(PlistValue::Bool),
        any::<i64>().prop_map(PlistValue::from),
        any::<u64>().prop_map(PlistValue::from),
        any::<f64>().prop_map(PlistValue::from),
        ".{0,12}".prop_map(PlistValue::String),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(PlistValue::Data),
    ]
}

fn arb_value() -> impl Strategy<Value = PlistValue> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(PlistValue::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| PlistValue::Dictionary(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i64_is_integer(n in any::<i64>()) {
        prop_assert_eq!(value_of(&n).unwrap(), PlistValue::Number(Number::Integer(n)));
    }

    #[test]
    fn prop_u64_round_trips(n in any::<u64>()) {
        let value = value_of(&n).unwrap();
        prop_assert_eq!(value.as_number().and_then(Number::as_u64), Some(n));
    }

    #[test]
    fn prop_finite_f64_is_exact(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(value_of(&f).unwrap(), PlistValue::Number(Number::Real(f)));
    }

    #[test]
    fn prop_bool_is_bool(b in any::<bool>()) {
        prop_assert_eq!(value_of(&b).unwrap(), PlistValue::Bool(b));
    }

    #[test]
    fn prop_string_is_string(s in ".{0,32}") {
        prop_assert_eq!(value_of(&s).unwrap(), PlistValue::String(s.clone()));
    }

    #[test]
    fn prop_vec_preserves_order(v in prop::collection::vec(any::<i32>(), 0..32)) {
        let value = value_of(&v).unwrap();
        let items = value.as_array().unwrap();
        prop_assert_eq!(items.len(), v.len());
        for (item, n) in items.iter().zip(&v) {
            let expected = value_of(n).unwrap();
            prop_assert_eq!(item, &expected);
        }
    }

    #[test]
    fn prop_map_preserves_entries(m in prop::collection::hash_map("[a-z]{0,8}", any::<i32>(), 0..16)) {
        let root = root_value_of(&m).unwrap();
        prop_assert_eq!(root.as_map().len(), m.len());
        for (k, v) in &m {
            let expected = value_of(v).unwrap();
            prop_assert_eq!(root.as_map().get(k), Some(&expected));
        }
    }

    #[test]
    fn prop_nested_maps(m in prop::collection::btree_map(
        "[a-z]{1,4}",
        prop::collection::btree_map("[a-z]{1,4}", any::<bool>(), 0..4),
        0..4,
    )) {
        let root = root_value_of(&m).unwrap();
        for (k, inner) in &m {
            let dict = root.as_map().get(k).and_then(PlistValue::as_dictionary).unwrap();
            prop_assert_eq!(dict.len(), inner.len());
        }
    }

    #[test]
    fn prop_reconversion_is_identity(value in arb_value()) {
        prop_assert_eq!(value_of(&value).unwrap(), value.clone());
    }

    #[test]
    fn prop_serde_bridge_agrees(m in prop::collection::btree_map("[a-z]{1,6}", prop::collection::vec(any::<i64>(), 0..4), 0..8)) {
        let typed = root_value_of(&m).unwrap().into_value();
        prop_assert_eq!(to_value(&m).unwrap(), typed);
    }
}

#[test]
fn test_hash_map_of_vectors() {
    let mut map: HashMap<String, Vec<bool>> = HashMap::new();
    map.insert("x".to_string(), vec![true, false]);
    let root = root_value_of(&map).unwrap();
    assert_eq!(
        root.as_map().get("x"),
        Some(&PlistValue::Array(vec![PlistValue::Bool(true), PlistValue::Bool(false)]))
    );

    let empty: BTreeMap<String, i32> = BTreeMap::new();
    assert!(root_value_of(&empty).unwrap().as_map().is_empty());
}
