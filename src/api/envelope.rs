//! Upstream response envelope normalization.
//!
//! The upstream service is inconsistent about wrapping payloads: the same
//! route may answer with a bare object/array or with `{ "data": ... }`.
//! These helpers apply one rule everywhere: prefer an enclosed `data`
//! property over the raw body.

use serde_json::Value;

/// Extract an object-shaped payload: `raw.data` when it is an object or an
/// array, otherwise `raw` itself.
pub fn pick_object(raw: Value) -> Value {
    match raw {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ (Value::Object(_) | Value::Array(_))) => data,
            Some(other) => {
                // Non-payload `data` (string, number...) is not an envelope;
                // put it back and hand over the whole body.
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extract an array-shaped payload: `raw.data` when it is an array, `raw`
/// when it is an array, `[]` otherwise.
pub fn pick_array(raw: Value) -> Vec<Value> {
    match raw {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
