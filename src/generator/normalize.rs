use serde_json::{Map, Number, Value};

use crate::metadata::{MetaValue, Metadata};

/// Converts a frontmatter value into its JSON form. Dates become ISO 8601
/// strings at any depth.
pub(super) fn normalize(value: &MetaValue) -> Value {
    match value {
        MetaValue::Null => Value::Null,
        MetaValue::Bool(b) => Value::Bool(*b),
        MetaValue::Integer(i) => Value::from(*i),
        MetaValue::Unsigned(u) => Value::from(*u),
        // JSON has no inf/nan
        MetaValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        MetaValue::String(s) => Value::String(s.clone()),
        MetaValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        MetaValue::DateTime(ts) => Value::String(ts.to_iso8601()),
        MetaValue::Sequence(items) => Value::Array(items.iter().map(normalize).collect()),
        MetaValue::Mapping(m) => Value::Object(normalize_metadata(m)),
    }
}

pub(super) fn normalize_metadata(metadata: &Metadata) -> Map<String, Value> {
    metadata
        .iter()
        .map(|(k, v)| (k.to_string(), normalize(v)))
        .collect()
}
