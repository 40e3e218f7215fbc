//! Tolerant field extraction from normalized response mappings.
//!
//! The remote service's column naming is not contractually fixed from this
//! side, so a missing top-level field falls back to a depth-first search
//! through nested objects and arrays before giving up.

use serde_json::Value;

use crate::envelope::FieldMap;

/// Look up `key` in a field mapping: direct hit first, then depth-first
/// through all nested objects and arrays. First match wins.
pub fn lookup<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a Value> {
    if let Some(value) = fields.get(key) {
        return Some(value);
    }
    fields.values().find_map(|v| lookup_value(v, key))
}

fn lookup_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|v| lookup_value(v, key))),
        Value::Array(items) => items.iter().find_map(|v| lookup_value(v, key)),
        _ => None,
    }
}

/// Extract a display string for `key`, falling back to `default` when the
/// field is absent or null anywhere in the mapping.
///
/// String values are returned verbatim; other scalars are rendered as JSON.
pub fn extract_text(fields: &FieldMap, key: &str, default: &str) -> String {
    match lookup(fields, key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}
