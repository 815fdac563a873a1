//! JSON helpers for stored parameter values.

use serde_json::{Map, Value};

/// Returns `true` if `text` parses as JSON.
///
/// # Example
///
/// ```
/// use cognito_ssm::json::is_well_formed_json;
///
/// assert!(is_well_formed_json(r#"{"message":"x"}"#));
/// assert!(is_well_formed_json("42"));
/// assert!(!is_well_formed_json("not json"));
/// ```
pub fn is_well_formed_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

/// Merges `overrides` over `base`, one level deep.
///
/// Keys of `base` keep their position; keys present in `overrides` replace
/// the base value wholesale (nested objects are not merged) and new keys are
/// appended. Neither input is modified.
///
/// # Example
///
/// ```
/// use cognito_ssm::json::shallow_merge;
/// use serde_json::json;
///
/// let base = json!({"a": 1, "b": 2});
/// let overrides = json!({"b": 3, "c": 4});
/// let merged = shallow_merge(base.as_object().unwrap(), overrides.as_object().unwrap());
///
/// assert_eq!(serde_json::Value::Object(merged), json!({"a": 1, "b": 3, "c": 4}));
/// ```
pub fn shallow_merge(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
