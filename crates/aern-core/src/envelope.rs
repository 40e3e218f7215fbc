//! Envelope normalization for remote table-service responses.
//!
//! The hosted table service has returned row-insertion results in several
//! envelope shapes across SDK revisions: a bare field mapping, a mapping
//! wrapped under `"row"`, a list of mappings under `"rows"`, a mapping
//! under `"values"`/`"data"`, or a sequence whose first element is the
//! mapping. Rather than probing attributes at runtime, the shapes are a
//! closed set of variants resolved by pattern matching, with a fixed
//! priority order when more than one could apply.

use serde_json::{Map, Value};
use tracing::debug;

/// A flat field-name → value mapping extracted from a response envelope.
pub type FieldMap = Map<String, Value>;

/// The recognised response envelope shapes, in resolution priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Null, absent, or a scalar with no usable structure.
    Missing,
    /// A sequence; only the first element is inspected.
    Sequence(Vec<Value>),
    /// `{"row": {...}}`
    RowKeyed(FieldMap),
    /// `{"rows": [{...}, ...]}` — first element wins.
    RowsKeyed(Vec<Value>),
    /// `{"values": {...}}` or `{"data": {...}}`
    ValuesKeyed(FieldMap),
    /// The whole object is treated as the field mapping.
    Bare(FieldMap),
}

impl Envelope {
    /// Classify a raw response into one envelope shape.
    ///
    /// Object keys are checked in order `row`, `rows`, `values`, `data`;
    /// a key whose value has the wrong type is skipped rather than
    /// treated as a match.
    pub fn classify(response: Option<&Value>) -> Self {
        let Some(value) = response else {
            return Self::Missing;
        };
        match value {
            Value::Array(items) => Self::Sequence(items.clone()),
            Value::Object(map) => {
                if let Some(Value::Object(row)) = map.get("row") {
                    Self::RowKeyed(row.clone())
                } else if let Some(Value::Array(rows)) = map.get("rows") {
                    Self::RowsKeyed(rows.clone())
                } else if let Some(Value::Object(values)) = map.get("values") {
                    Self::ValuesKeyed(values.clone())
                } else if let Some(Value::Object(data)) = map.get("data") {
                    Self::ValuesKeyed(data.clone())
                } else {
                    Self::Bare(map.clone())
                }
            }
            _ => Self::Missing,
        }
    }
}

/// Normalize a raw row-insertion response into a flat [`FieldMap`].
///
/// Returns an empty mapping (never an error) when the response carries no
/// usable row, so callers can always fall back to default field values.
pub fn normalize(response: Option<&Value>) -> FieldMap {
    match Envelope::classify(response) {
        Envelope::Missing => {
            debug!("response envelope empty or unrecognised");
            FieldMap::new()
        }
        Envelope::Sequence(items) => match items.first() {
            Some(Value::Object(map)) => unwrap_fields(map.clone()),
            _ => {
                debug!("sequence envelope without a leading object");
                FieldMap::new()
            }
        },
        Envelope::RowsKeyed(rows) => match rows.first() {
            Some(Value::Object(map)) => unwrap_fields(map.clone()),
            _ => {
                debug!("rows envelope without a leading object");
                FieldMap::new()
            }
        },
        Envelope::RowKeyed(map) | Envelope::ValuesKeyed(map) | Envelope::Bare(map) => {
            unwrap_fields(map)
        }
    }
}

/// Remove one level of nesting when a field mapping wraps its content
/// under `values`, `fields`, or `data` (checked in that order).
///
/// Exactly one level — applying this to its own output is a no-op unless
/// the inner mapping itself uses one of the wrapper keys.
pub fn unwrap_fields(fields: FieldMap) -> FieldMap {
    for key in ["values", "fields", "data"] {
        if let Some(Value::Object(inner)) = fields.get(key) {
            return inner.clone();
        }
    }
    fields
}

/// Resolve the content reference URI from a file-upload response.
///
/// Checks the top-level `uri` then `url` keys, then the same pair inside a
/// nested `row` object. Returns `None` when the upload succeeded at the
/// transport level but carried no usable reference — a distinct condition
/// from a transport failure, which never reaches this function.
pub fn resolve_upload_uri(response: Option<&Value>) -> Option<String> {
    let map = response?.as_object()?;
    uri_from_map(map).or_else(|| {
        map.get("row")
            .and_then(Value::as_object)
            .and_then(uri_from_map)
    })
}

fn uri_from_map(map: &FieldMap) -> Option<String> {
    for key in ["uri", "url"] {
        if let Some(Value::String(s)) = map.get(key)
            && !s.is_empty()
        {
            return Some(s.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        value.as_object().expect("test value must be an object").clone()
    }

    #[test]
    fn null_response_yields_empty_map() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn scalar_response_yields_empty_map() {
        assert!(normalize(Some(&json!("ok"))).is_empty());
        assert!(normalize(Some(&json!(42))).is_empty());
    }

    #[test]
    fn row_keyed_returns_inner_fields() {
        let resp = json!({"row": {"description": "fire", "summary": "evacuate"}});
        let out = normalize(Some(&resp));
        assert_eq!(out, fields(json!({"description": "fire", "summary": "evacuate"})));
    }

    #[test]
    fn rows_keyed_returns_first_element() {
        let resp = json!({"rows": [{"description": "first"}, {"description": "second"}]});
        let out = normalize(Some(&resp));
        assert_eq!(out, fields(json!({"description": "first"})));
    }

    #[test]
    fn empty_rows_yields_empty_map() {
        assert!(normalize(Some(&json!({"rows": []}))).is_empty());
    }

    #[test]
    fn sequence_inspects_first_element() {
        let resp = json!([{"description": "from list"}, {"description": "ignored"}]);
        let out = normalize(Some(&resp));
        assert_eq!(out, fields(json!({"description": "from list"})));
    }

    #[test]
    fn sequence_of_scalars_yields_empty_map() {
        assert!(normalize(Some(&json!(["a", "b"]))).is_empty());
        assert!(normalize(Some(&json!([]))).is_empty());
    }

    #[test]
    fn values_keyed_unwraps_directly() {
        let resp = json!({"values": {"summary": "stay calm"}});
        assert_eq!(normalize(Some(&resp)), fields(json!({"summary": "stay calm"})));
    }

    #[test]
    fn data_keyed_unwraps_directly() {
        let resp = json!({"data": {"summary": "stay calm"}});
        assert_eq!(normalize(Some(&resp)), fields(json!({"summary": "stay calm"})));
    }

    #[test]
    fn bare_mapping_is_its_own_field_map() {
        let resp = json!({"description": "bare", "summary": "bare too"});
        assert_eq!(normalize(Some(&resp)), fields(resp.clone()));
    }

    #[test]
    fn row_takes_priority_over_rows() {
        let resp = json!({
            "row": {"description": "from row"},
            "rows": [{"description": "from rows"}]
        });
        assert_eq!(normalize(Some(&resp)), fields(json!({"description": "from row"})));
    }

    #[test]
    fn non_object_row_key_is_skipped() {
        // "row" holding a string is not a match; "rows" wins instead.
        let resp = json!({"row": "oops", "rows": [{"description": "fallback"}]});
        assert_eq!(normalize(Some(&resp)), fields(json!({"description": "fallback"})));
    }

    #[test]
    fn row_nesting_values_is_unwrapped_once() {
        let resp = json!({"row": {"values": {"description": "deep"}}});
        assert_eq!(normalize(Some(&resp)), fields(json!({"description": "deep"})));
    }

    #[test]
    fn unwrap_is_idempotent() {
        let wrapped = fields(json!({"values": {"description": "X"}}));
        let once = unwrap_fields(wrapped);
        assert_eq!(once, fields(json!({"description": "X"})));
        let twice = unwrap_fields(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn unwrap_prefers_values_over_fields_and_data() {
        let wrapped = fields(json!({
            "values": {"a": 1},
            "fields": {"b": 2},
            "data": {"c": 3}
        }));
        assert_eq!(unwrap_fields(wrapped), fields(json!({"a": 1})));
    }

    #[test]
    fn unwrap_ignores_non_object_wrapper_values() {
        let wrapped = fields(json!({"values": "scalar", "description": "kept"}));
        let out = unwrap_fields(wrapped.clone());
        assert_eq!(out, wrapped);
    }

    #[test]
    fn classify_distinguishes_shapes() {
        assert_eq!(Envelope::classify(None), Envelope::Missing);
        assert!(matches!(
            Envelope::classify(Some(&json!([{"a": 1}]))),
            Envelope::Sequence(_)
        ));
        assert!(matches!(
            Envelope::classify(Some(&json!({"row": {"a": 1}}))),
            Envelope::RowKeyed(_)
        ));
        assert!(matches!(
            Envelope::classify(Some(&json!({"rows": [{"a": 1}]}))),
            Envelope::RowsKeyed(_)
        ));
        assert!(matches!(
            Envelope::classify(Some(&json!({"data": {"a": 1}}))),
            Envelope::ValuesKeyed(_)
        ));
        assert!(matches!(
            Envelope::classify(Some(&json!({"a": 1}))),
            Envelope::Bare(_)
        ));
    }

    // ── Upload URI resolution ──

    #[test]
    fn uri_key_resolves_first() {
        let resp = json!({"uri": "s3://bucket/a.mp3", "url": "https://ignored"});
        assert_eq!(
            resolve_upload_uri(Some(&resp)),
            Some("s3://bucket/a.mp3".to_string())
        );
    }

    #[test]
    fn url_key_is_the_fallback() {
        let resp = json!({"url": "https://cdn/a.jpg"});
        assert_eq!(
            resolve_upload_uri(Some(&resp)),
            Some("https://cdn/a.jpg".to_string())
        );
    }

    #[test]
    fn nested_row_uri_resolves() {
        let resp = json!({"row": {"uri": "s3://bucket/b.wav"}});
        assert_eq!(
            resolve_upload_uri(Some(&resp)),
            Some("s3://bucket/b.wav".to_string())
        );
    }

    #[test]
    fn empty_or_null_uri_is_not_a_reference() {
        assert_eq!(resolve_upload_uri(Some(&json!({"uri": ""}))), None);
        assert_eq!(resolve_upload_uri(Some(&json!({"uri": null}))), None);
    }

    #[test]
    fn missing_reference_is_none() {
        assert_eq!(resolve_upload_uri(None), None);
        assert_eq!(resolve_upload_uri(Some(&json!({"ok": true}))), None);
        assert_eq!(resolve_upload_uri(Some(&json!("plain"))), None);
    }
}
