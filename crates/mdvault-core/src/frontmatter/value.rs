//! Frontmatter value model
//!
//! Metadata is an insertion-ordered map of string keys to a tagged value
//! type. Dates stay typed so they serialize unquoted, and a parse /
//! serialize cycle keeps keys in their original order.

use crate::timestamp::Timestamp;
use chrono::NaiveDate;
use serde_json::Value as JsonValue;

/// A single frontmatter value
#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(Timestamp),
    List(Vec<FrontmatterValue>),
    Map(Metadata),
}

impl FrontmatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FrontmatterValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Date(_) | Self::DateTime(_))
    }

    /// Convert to JSON for callers that report metadata
    ///
    /// Dates and timestamps become their canonical string form.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::from(*i),
            Self::Unsigned(u) => JsonValue::from(*u),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(ts) => JsonValue::String(ts.to_string()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => map.to_json(),
        }
    }
}

impl From<JsonValue> for FrontmatterValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Unsigned(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for FrontmatterValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<NaiveDate> for FrontmatterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Timestamp> for FrontmatterValue {
    fn from(value: Timestamp) -> Self {
        Self::DateTime(value)
    }
}

/// Insertion-ordered frontmatter map with unique keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace a value
    ///
    /// An existing key keeps its position; a new key goes to the end.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FrontmatterValue>,
    ) -> Option<FrontmatterValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FrontmatterValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Merge `other` into `self`, later keys overwriting earlier ones
    pub fn merge(&mut self, other: Metadata) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, FrontmatterValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, FrontmatterValue)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl IntoIterator for Metadata {
    type Item = (String, FrontmatterValue);
    type IntoIter = std::vec::IntoIter<(String, FrontmatterValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_position_of_existing_key() {
        let mut metadata = Metadata::new();
        metadata.insert("title", "T");
        metadata.insert("status", "open");
        let old = metadata.insert("title", "Renamed");

        assert_eq!(old, Some(FrontmatterValue::from("T")));
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["title", "status"]);
        assert_eq!(metadata.get("title").and_then(|v| v.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_merge_overwrites_and_appends() {
        let mut metadata: Metadata = [
            ("title".to_string(), FrontmatterValue::from("T")),
            ("status".to_string(), FrontmatterValue::from("open")),
        ]
        .into_iter()
        .collect();

        let updates: Metadata = [
            ("status".to_string(), FrontmatterValue::from("done")),
            ("priority".to_string(), FrontmatterValue::Integer(2)),
        ]
        .into_iter()
        .collect();

        metadata.merge(updates);
        assert_eq!(
            metadata.keys().collect::<Vec<_>>(),
            vec!["title", "status", "priority"]
        );
        assert_eq!(metadata.get("status").and_then(|v| v.as_str()), Some("done"));
    }

    #[test]
    fn test_from_json_object() {
        let value = FrontmatterValue::from(json!({
            "title": "Note",
            "count": 3,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "draft": false,
            "parent": null
        }));
        let FrontmatterValue::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map.get("count"), Some(&FrontmatterValue::Integer(3)));
        assert_eq!(map.get("ratio"), Some(&FrontmatterValue::Float(0.5)));
        assert_eq!(map.get("draft"), Some(&FrontmatterValue::Bool(false)));
        assert_eq!(map.get("parent"), Some(&FrontmatterValue::Null));
        assert_eq!(map.get("tags").and_then(|v| v.as_list()).map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_json_keeps_large_unsigned_integers() {
        let value = FrontmatterValue::from(json!(u64::MAX));
        assert_eq!(value, FrontmatterValue::Unsigned(u64::MAX));
        assert_eq!(value.to_json(), json!(u64::MAX));
        assert_eq!(FrontmatterValue::from(7u64), FrontmatterValue::Integer(7));
    }

    #[test]
    fn test_to_json_renders_dates_as_strings() {
        let mut metadata = Metadata::new();
        metadata.insert("created", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(metadata.to_json(), json!({ "created": "2026-01-01" }));
    }
}
