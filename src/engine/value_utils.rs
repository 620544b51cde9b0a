//! Small pure helpers shared across the mapping engine.
//!
//! These implement the two value-level policies every mapping decision
//! depends on: whether a value counts as "present" in an output object,
//! and how to render an arbitrary JSON value as a string for sinks that
//! only accept string-typed properties.

use serde_json::Value;

/// Decides whether a value counts as "present" for output purposes.
///
/// Empty strings, empty objects, and empty arrays are suppressed so that
/// destination payloads never carry hollow keys. Scalars that merely look
/// falsy (`0`, `false`) are kept, and so is `null`: downstream destinations
/// use an explicit `null` to erase an existing property, so it must survive
/// the mapper untouched rather than being folded into "empty".
///
/// Absent values are represented by missing keys (or `None`) upstream and
/// never reach this predicate.
///
/// # Examples
///
/// ```
/// use eventmap::engine::value_utils::is_non_empty;
/// use serde_json::json;
///
/// assert!(is_non_empty(&json!(0)));
/// assert!(is_non_empty(&json!(false)));
/// assert!(is_non_empty(&json!(null)));
/// assert!(!is_non_empty(&json!("")));
/// assert!(!is_non_empty(&json!({})));
/// assert!(!is_non_empty(&json!([])));
/// ```
pub fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        // null is deliberately "present"; see above.
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Renders any JSON value as a string.
///
/// Strings pass through unchanged; everything else uses its JSON
/// serialization, which matches native string conversion for numbers and
/// booleans and produces `"null"` for `null`. Total over all JSON values.
///
/// Used when routing unmapped fields into a named sub-object, since such
/// "additional properties" sinks accept only string values.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Serializing a serde_json::Value cannot fail.
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_values_are_suppressed() {
        assert!(!is_non_empty(&json!("")));
        assert!(!is_non_empty(&json!({})));
        assert!(!is_non_empty(&json!([])));
    }

    #[test]
    fn test_falsy_scalars_are_present() {
        assert!(is_non_empty(&json!(0)));
        assert!(is_non_empty(&json!(0.0)));
        assert!(is_non_empty(&json!(false)));
    }

    #[test]
    fn test_null_is_present() {
        // null is reserved for erasing properties downstream and must not
        // be treated as empty.
        assert!(is_non_empty(&json!(null)));
    }

    #[test]
    fn test_populated_containers_are_present() {
        assert!(is_non_empty(&json!({"a": 1})));
        assert!(is_non_empty(&json!([0])));
        assert!(is_non_empty(&json!("x")));
    }

    #[test]
    fn test_predicate_is_stable() {
        // Applying the predicate to its own "present" branch never changes
        // the classification.
        for value in [
            json!(null),
            json!(0),
            json!(false),
            json!("x"),
            json!({"a": 1}),
            json!([1]),
        ] {
            assert!(is_non_empty(&value));
            assert!(is_non_empty(&value));
        }
    }

    #[test]
    fn test_stringify_strings_unchanged() {
        assert_eq!(stringify(&json!("hello")), "hello");
        assert_eq!(stringify(&json!("")), "");
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "null");
    }

    #[test]
    fn test_stringify_containers() {
        assert_eq!(stringify(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(stringify(&json!([1, "x"])), r#"[1,"x"]"#);
    }
}
