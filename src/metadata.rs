use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};

use crate::error::FrontmatterError;

mod loader;
mod resolve;

pub(crate) use loader::load;

/// Date with a time of day, with or without a zone.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`
    pub fn to_iso8601(&self) -> String {
        let naive = match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Offset(dt) => dt.naive_local(),
        };
        let mut res = naive.format("%Y-%m-%dT%H:%M:%S").to_string();
        let micros = naive.nanosecond() / 1_000;
        if micros != 0 {
            res.push_str(&format!(".{micros:06}"));
        }
        if let Timestamp::Offset(dt) = self {
            res.push_str(&dt.format("%:z").to_string());
        }
        res
    }
}

/// A value as found in frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(Timestamp),
    Sequence(Vec<MetaValue>),
    Mapping(Metadata),
}

impl MetaValue {
    pub fn kind(&self) -> &'static str {
        match self {
            MetaValue::Null => "null",
            MetaValue::Bool(_) => "a boolean",
            MetaValue::Integer(_) | MetaValue::Unsigned(_) | MetaValue::Float(_) => "a number",
            MetaValue::String(_) => "a string",
            MetaValue::Date(_) | MetaValue::DateTime(_) => "a date",
            MetaValue::Sequence(_) => "a sequence",
            MetaValue::Mapping(_) => "a mapping",
        }
    }

    /// Blank frontmatter (`~`, `{}`, `[]`, `""`, `false`, `0`) carries no metadata.
    pub fn is_blank(&self) -> bool {
        match self {
            MetaValue::Null => true,
            MetaValue::Bool(b) => !b,
            MetaValue::Integer(i) => *i == 0,
            MetaValue::Unsigned(u) => *u == 0,
            MetaValue::Float(f) => *f == 0.0,
            MetaValue::String(s) => s.is_empty(),
            MetaValue::Date(_) | MetaValue::DateTime(_) => false,
            MetaValue::Sequence(items) => items.is_empty(),
            MetaValue::Mapping(m) => m.is_empty(),
        }
    }
}

/// Ordered field name to value mapping. Keys are unique; re-inserting a key
/// replaces the value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        let key = key.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keys end up as JSON object keys, so scalars are spelled the way a JSON
/// encoder would spell them.
fn key_to_string(key: MetaValue) -> Result<String, FrontmatterError> {
    Ok(match key {
        MetaValue::Null => "null".to_string(),
        MetaValue::Bool(b) => b.to_string(),
        MetaValue::Integer(i) => i.to_string(),
        MetaValue::Unsigned(u) => u.to_string(),
        MetaValue::Float(f) => serde_json::Number::from_f64(f)
            .map_or_else(|| f.to_string(), |n| n.to_string()),
        MetaValue::String(s) => s,
        MetaValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        MetaValue::DateTime(ts) => ts.to_iso8601(),
        other @ (MetaValue::Sequence(_) | MetaValue::Mapping(_)) => {
            return Err(FrontmatterError::UnsupportedKey(other.kind().to_string()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamp_formatting() {
        let naive =
            NaiveDateTime::parse_from_str("2023-05-01 10:30:00.25", "%Y-%m-%d %H:%M:%S%.f")
                .unwrap();
        assert_eq!(Timestamp::Naive(naive).to_iso8601(), "2023-05-01T10:30:00.250000");

        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let zoned = naive.with_nanosecond(0).unwrap().and_local_timezone(offset).single().unwrap();
        assert_eq!(Timestamp::Offset(zoned).to_iso8601(), "2023-05-01T10:30:00+09:00");
    }

    #[test]
    fn scalar_keys_are_stringified() {
        assert_eq!(key_to_string(MetaValue::Null).unwrap(), "null");
        assert_eq!(key_to_string(MetaValue::Bool(true)).unwrap(), "true");
        assert_eq!(key_to_string(MetaValue::Integer(-7)).unwrap(), "-7");
        assert_eq!(key_to_string(MetaValue::Float(1.5)).unwrap(), "1.5");
        assert_eq!(
            key_to_string(MetaValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap())).unwrap(),
            "2023-05-01"
        );
    }

    #[test]
    fn collection_keys_are_rejected() {
        assert!(matches!(
            key_to_string(MetaValue::Sequence(vec![])),
            Err(FrontmatterError::UnsupportedKey(_))
        ));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut m = Metadata::new();
        m.insert("_filename", MetaValue::String("from frontmatter".to_string()));
        m.insert("title", MetaValue::String("Dune".to_string()));
        let old = m.insert("_filename", MetaValue::String("Dune".to_string()));

        assert_eq!(old, Some(MetaValue::String("from frontmatter".to_string())));
        assert_eq!(m.len(), 2);
        let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["_filename", "title"]);
    }

    #[test]
    fn blank_values() {
        assert!(MetaValue::Null.is_blank());
        assert!(MetaValue::Mapping(Metadata::new()).is_blank());
        assert!(MetaValue::String(String::new()).is_blank());
        assert!(!MetaValue::Sequence(vec![MetaValue::Null]).is_blank());
        assert!(!MetaValue::Date(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()).is_blank());
    }
}
