use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of an entity collection.
///
/// `id` is absent until the backing store assigns one. Every other
/// attribute is kept as a string keyed by its field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub enabled: bool,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

/// Ordered sequence of records for one entity type.
///
/// Always replaced wholesale by the gateway response, never merged.
pub type Collection = Vec<Record>;

impl Record {
    pub fn new(id: u64) -> Self {
        Self {
            id: Some(id),
            enabled: true,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by seed data and tests.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Text shown in a table column. `id` and `enabled` are virtual columns.
    pub fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.map(|id| id.to_string()).unwrap_or_default(),
            "enabled" => self.enabled.to_string(),
            key => self.value(key).to_string(),
        }
    }
}

/// Next unused positive id: `max(existing) + 1`, or `1` for an empty collection.
/// `None` once the highest id is `u64::MAX`.
pub fn next_id(collection: &[Record]) -> Option<u64> {
    match collection.iter().filter_map(|r| r.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

pub fn find(collection: &[Record], id: u64) -> Option<&Record> {
    collection.iter().find(|r| r.id == Some(id))
}

/// In-progress edit buffer for a single record.
///
/// Serializes to the `save` payload: `id` and `enabled` are only sent when
/// known, so a new record gets the store's default `enabled = true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct Draft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

impl Draft {
    /// Empty value for every given key.
    pub fn empty<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            id: None,
            enabled: None,
            values: keys
                .into_iter()
                .map(|k| (k.to_string(), String::new()))
                .collect(),
        }
    }

    /// Independent copy of an existing record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id,
            enabled: Some(record.enabled),
            values: record.fields.clone(),
        }
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Lenient wire shape: any JSON scalar is accepted as a field value.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

fn stringify(fields: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    fields
        .into_iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, text)
        })
        .collect()
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Self {
            id: wire.id,
            enabled: wire.enabled.unwrap_or(true),
            fields: stringify(wire.fields),
        }
    }
}

impl From<WireRecord> for Draft {
    fn from(wire: WireRecord) -> Self {
        Self {
            id: wire.id,
            enabled: wire.enabled,
            values: stringify(wire.fields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_id_is_one_for_empty_collection() {
        assert_eq!(next_id(&[]), Some(1));
    }

    #[test]
    fn next_id_follows_the_highest_id_not_the_length() {
        let items = vec![Record::new(2), Record::new(7), Record::new(3)];
        assert_eq!(next_id(&items), Some(8));
    }

    #[test]
    fn next_id_is_none_after_the_largest_id() {
        assert_eq!(next_id(&[Record::new(1), Record::new(u64::MAX)]), None);
    }

    #[test]
    fn record_accepts_non_string_values() {
        let rec: Record =
            serde_json::from_value(json!({"id": 4, "name": "T", "weight": 12, "note": null}))
                .unwrap();
        assert_eq!(rec.id, Some(4));
        assert!(rec.enabled);
        assert_eq!(rec.value("weight"), "12");
        assert_eq!(rec.value("note"), "");
    }

    #[test]
    fn draft_without_id_omits_id_and_enabled() {
        let draft = Draft::empty(["name", "number"]);
        let payload = serde_json::to_value(&draft).unwrap();
        assert_eq!(payload, json!({"name": "", "number": ""}));
    }

    #[test]
    fn draft_from_record_is_a_copy() {
        let rec = Record::new(1).with("name", "Truck-100");
        let mut draft = Draft::from_record(&rec);
        draft.values.insert("name".into(), "changed".into());
        assert_eq!(rec.value("name"), "Truck-100");
        assert_eq!(draft.enabled, Some(true));
    }
}
