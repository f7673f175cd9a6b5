//! Response shape normalization
//!
//! The upstream wraps payloads inconsistently: sometimes a bare array,
//! sometimes an object carrying the records under `data` or `result`.
//! Every payload is forced into a flat list before indexing.

use serde_json::Value;

/// Coerce a raw API payload into a list of records.
///
/// Objects are unwrapped through their `data` field, then `result`,
/// then kept whole as a single record. A non-list leftover becomes a
/// one-element list, or an empty list when it holds nothing usable.
///
/// ```
/// use numex::services::normalizer::normalize_records;
/// use serde_json::json;
///
/// assert_eq!(normalize_records(json!({"data": [1, 2]})), vec![json!(1), json!(2)]);
/// assert!(normalize_records(json!(null)).is_empty());
/// ```
pub fn normalize_records(raw: Value) -> Vec<Value> {
    let unwrapped = match raw {
        Value::Object(mut map) => {
            if let Some(inner) = map.remove("data") {
                inner
            } else if let Some(inner) = map.remove("result") {
                inner
            } else {
                return vec![Value::Object(map)];
            }
        }
        other => other,
    };

    match unwrapped {
        Value::Array(items) => items,
        value if is_empty(&value) => Vec::new(),
        value => vec![value],
    }
}

/// True for values carrying no records: null, false, zero, an empty
/// string, or an empty collection.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
