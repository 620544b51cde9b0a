//! Integration tests for the public mapping API.

use std::collections::HashMap;

use eventmap::engine::spec::{EventMap, FieldDirective, FieldMap, UnmappedSink};
use eventmap::engine::value_utils::is_non_empty;
use eventmap::validation::validate_event_map;
use eventmap::{map_event, map_event_helper, MappingError};
use serde_json::{json, Map, Value};

fn copy_fields(keys: &[&str]) -> HashMap<String, FieldDirective> {
    keys.iter()
        .map(|k| (k.to_string(), FieldDirective::Copy))
        .collect()
}

#[test]
fn test_copy_law() {
    let spec = EventMap::new(copy_fields(&["k"]));
    let output = map_event(&spec, &json!({"k": "v"})).unwrap();
    assert_eq!(output, json!({"k": "v"}));
}

#[test]
fn test_drop_law() {
    let spec = EventMap::new(HashMap::from([("k".to_string(), FieldDirective::Drop)]));
    for payload in [json!({"k": "v"}), json!({"k": null}), json!({"k": [1]})] {
        assert!(map_event_helper(&spec, &payload).is_none());
    }
}

#[test]
fn test_unmapped_capture_is_stringified() {
    let spec = EventMap::default().with_unmapped(UnmappedSink::named("extra"));
    let output = map_event(&spec, &json!({"a": 1, "b": "x"})).unwrap();
    assert_eq!(output, json!({"extra": {"a": "1", "b": "x"}}));
}

#[test]
fn test_root_unmapped_capture_keeps_types() {
    let spec = EventMap::default().with_unmapped(UnmappedSink::Root);
    let output = map_event(&spec, &json!({"a": 1})).unwrap();
    assert_eq!(output, json!({"a": 1}));
    assert!(output.get("a").unwrap().is_number());
}

#[test]
fn test_default_override() {
    let mut defaults = Map::new();
    defaults.insert("s".to_string(), json!("d"));

    let spec = EventMap::new(copy_fields(&["s"])).with_defaults(defaults.clone());
    assert_eq!(map_event(&spec, &json!({})).unwrap(), json!({"s": "d"}));

    let spec = EventMap::new(copy_fields(&["s"])).with_defaults(defaults);
    assert_eq!(
        map_event(&spec, &json!({"s": "x"})).unwrap(),
        json!({"s": "x"})
    );
}

#[test]
fn test_promoted_attributes_never_override_siblings() {
    let spec = EventMap::new(copy_fields(&["s"]));
    let output = map_event(
        &spec,
        &json!({"s": "1", "friendbuyAttributes": {"s": "2"}}),
    )
    .unwrap();
    assert_eq!(output, json!({"s": "1"}));
}

#[test]
fn test_array_elements_mapping_to_nothing_are_dropped() {
    let element = EventMap::new(copy_fields(&["x"]));
    let spec = EventMap::new(HashMap::from([(
        "items".to_string(),
        FieldDirective::from(FieldMap::array_of(element)),
    )]));
    let output = map_event(&spec, &json!({"items": [{"x": "a"}, {}]})).unwrap();
    assert_eq!(output, json!({"items": [{"x": "a"}]}));
}

#[test]
fn test_no_result_raises_invalid_request_data() {
    let spec = EventMap::new(copy_fields(&["a"]));
    let err = map_event(&spec, &json!({"unmapped1": "v"})).unwrap_err();
    assert!(matches!(err, MappingError::NoMappableFields));
    assert_eq!(err.code(), "INVALID_REQUEST_DATA");
    assert_eq!(err.status(), 400);
    assert!(err.to_string().starts_with("error-eventmap-mapper-1"));
}

#[test]
fn test_nested_path_write() {
    let spec = EventMap::new(HashMap::from([(
        "v".to_string(),
        FieldDirective::from(FieldMap::scalar().renamed(vec!["a", "b"])),
    )]));
    let output = map_event(&spec, &json!({"v": "x"})).unwrap();
    assert_eq!(output, json!({"a": {"b": "x"}}));
}

#[test]
fn test_finalize_runs_last_and_replaces_output() {
    let spec = EventMap::new(copy_fields(&["a", "b"])).with_finalize(|mut out| {
        // The hook must see the fully populated pre-finalize object.
        assert!(out.contains_key("a") && out.contains_key("b"));
        let total = out.values().filter_map(Value::as_i64).sum::<i64>();
        out.insert("total".to_string(), json!(total));
        out
    });
    let output = map_event(&spec, &json!({"a": 2, "b": 3})).unwrap();
    assert_eq!(output, json!({"a": 2, "b": 3, "total": 5}));
}

#[test]
fn test_finalize_attached_to_nested_spec_runs_at_that_level() {
    let element = EventMap::new(copy_fields(&["sku"])).with_finalize(|mut out| {
        out.insert("currency".to_string(), json!("EUR"));
        out
    });
    let spec = EventMap::new(HashMap::from([(
        "products".to_string(),
        FieldDirective::from(FieldMap::array_of(element)),
    )]));
    let output = map_event(&spec, &json!({"products": [{"sku": "A-1"}]})).unwrap();
    assert_eq!(
        output,
        json!({"products": [{"sku": "A-1", "currency": "EUR"}]})
    );

    // A nested finalize that empties its level drops that sub-field
    // entirely instead of writing an empty object.
    let nested = EventMap::new(copy_fields(&["city"])).with_finalize(|_| Map::new());
    let spec = EventMap::new(HashMap::from([
        (
            "address".to_string(),
            FieldDirective::from(FieldMap::object(nested)),
        ),
        ("name".to_string(), FieldDirective::Copy),
    ]));
    let output = map_event(
        &spec,
        &json!({"address": {"city": "Lisbon"}, "name": "Ada"}),
    )
    .unwrap();
    assert_eq!(output, json!({"name": "Ada"}));
}

#[test]
fn test_emptiness_classification_is_stable() {
    for value in [json!(null), json!(0), json!(false), json!("x")] {
        let first = is_non_empty(&value);
        let second = is_non_empty(&value);
        assert_eq!(first, second);
        assert!(first);
    }
}

#[test]
fn test_full_destination_shaped_mapping() {
    // A realistic destination action: rename identity fields, map an
    // array of products, collect leftover properties, seed a constant.
    let product = EventMap::new(HashMap::from([
        ("sku".to_string(), FieldDirective::Copy),
        (
            "price".to_string(),
            FieldDirective::from(FieldMap::scalar().renamed("unitPrice")),
        ),
    ]));

    let mut defaults = Map::new();
    defaults.insert("source".to_string(), json!("segment"));

    let spec = EventMap::new(HashMap::from([
        (
            "email".to_string(),
            FieldDirective::from(FieldMap::scalar().renamed(vec!["customer", "email"])),
        ),
        (
            "products".to_string(),
            FieldDirective::from(FieldMap::array_of(product)),
        ),
        ("anonymousId".to_string(), FieldDirective::Drop),
    ]))
    .with_defaults(defaults)
    .with_unmapped(UnmappedSink::named("additionalProperties"));

    validate_event_map(&spec).unwrap();

    let payload = json!({
        "email": "ada@example.com",
        "anonymousId": "anon-1",
        "products": [
            {"sku": "A-1", "price": 9.99, "warehouse": "ignored"},
            {"warehouse": "also ignored"}
        ],
        "coupon": "SAVE10",
        "friendbuyAttributes": {"referralCode": "r-42", "coupon": "never-wins"}
    });

    let output = map_event(&spec, &payload).unwrap();
    assert_eq!(
        output,
        json!({
            "source": "segment",
            "customer": {"email": "ada@example.com"},
            "products": [{"sku": "A-1", "unitPrice": 9.99}],
            "additionalProperties": {"coupon": "SAVE10", "referralCode": "r-42"}
        })
    );
}
