use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Prefix of client-assigned identifiers for rows not yet confirmed by the server.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Field that carries the reconciliation key of every record.
pub const ID_FIELD: &str = "id";

// ============================================================================
// ID Type
// ============================================================================

/// Identifier of a record as seen by the client.
///
/// Server ids arrive either as JSON numbers or strings. Comparison uses the
/// string form, so `12` and `"12"` address the same row, while the JSON kind
/// is kept and written back unchanged (`"007"` stays a string).
#[derive(Debug, Clone)]
pub struct RecordId {
    key: String,
    numeric: bool,
}

impl RecordId {
    /// String id.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            key: value.into(),
            numeric: false,
        }
    }

    /// New client-local id, distinguishable from anything the server assigns.
    pub fn temporary() -> Self {
        Self::new(format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4()))
    }

    pub fn is_temporary(&self) -> bool {
        self.key.starts_with(TEMP_ID_PREFIX)
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Reads an id out of a JSON value. Only strings and numbers qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::new(s.clone())),
            Value::Number(n) => Some(Self {
                key: n.to_string(),
                numeric: true,
            }),
            _ => None,
        }
    }

    /// JSON form written back into a record, in the kind the id was read as.
    pub fn to_value(&self) -> Value {
        if self.numeric {
            if let Ok(n) = serde_json::from_str::<serde_json::Number>(&self.key) {
                return Value::Number(n);
            }
        }
        Value::String(self.key.clone())
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| de::Error::custom("record id must be a string or a number"))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self {
            key: value.to_string(),
            numeric: true,
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// One row of server data (program, credential, ASN, RDAP entry ...).
///
/// The shape is owned by the page that renders it; the table core only needs
/// field lookup and the `id` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a record from a JSON object. Any other JSON kind yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.0.get(ID_FIELD).and_then(RecordId::from_value)
    }

    pub fn set_id(&mut self, id: &RecordId) {
        self.0.insert(ID_FIELD.to_string(), id.to_value());
    }

    pub fn with_id(mut self, id: &RecordId) -> Self {
        self.set_id(id);
        self
    }

    pub fn has_id(&self, id: &RecordId) -> bool {
        self.id().as_ref() == Some(id)
    }

    /// Raw field value. `None` means the field is absent, which is distinct from JSON `null`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Truthiness used by status columns: `true`, `1` and `"1"` are on.
    pub fn get_flag(&self, field: &str) -> bool {
        match self.0.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Shallow merge: every field of `patch` overwrites the same field here.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in patch.0.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_normalizes_numbers_and_strings() {
        let a = Record::from_value(json!({"id": 12, "name": "x"})).unwrap();
        let b = Record::from_value(json!({"id": "12"})).unwrap();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.id().unwrap().as_str(), "12");
    }

    #[test]
    fn test_temporary_ids() {
        let id = RecordId::temporary();
        assert!(id.is_temporary());
        assert!(!RecordId::from(5).is_temporary());
        assert_ne!(RecordId::temporary(), RecordId::temporary());
    }

    #[test]
    fn test_set_id_keeps_numeric_ids_numeric() {
        let mut record = Record::new();
        record.set_id(&RecordId::from(7));
        assert_eq!(record.get("id"), Some(&json!(7)));

        let temp = RecordId::temporary();
        record.set_id(&temp);
        assert_eq!(record.get_str("id"), Some(temp.as_str()));
    }

    #[test]
    fn test_set_id_keeps_string_ids_strings() {
        let source = Record::from_value(json!({"id": "007"})).unwrap();
        let id = source.id().unwrap();
        assert!(!id.is_numeric());

        let mut record = Record::new();
        record.set_id(&id);
        assert_eq!(record.get("id"), Some(&json!("007")));
        assert!(record.has_id(&id));

        let twelve = Record::from_value(json!({"id": "12"})).unwrap().id().unwrap();
        assert_eq!(twelve.to_value(), json!("12"));
        assert_eq!(RecordId::from(12).to_value(), json!(12));
        assert_eq!(twelve, RecordId::from(12));
    }

    #[test]
    fn test_id_serde_keeps_kind() {
        let id: RecordId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("42"));
        let id: RecordId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(42));
        assert!(serde_json::from_value::<RecordId>(json!(null)).is_err());
    }

    #[test]
    fn test_merge_overwrites_fields() {
        let mut record = Record::from_value(json!({"id": 5, "name": "A", "type": "orgs"})).unwrap();
        let patch = Record::from_value(json!({"name": "B"})).unwrap();
        record.merge(&patch);
        assert_eq!(record.get_str("name"), Some("B"));
        assert_eq!(record.get_str("type"), Some("orgs"));
    }

    #[test]
    fn test_missing_and_null_are_distinct() {
        let record = Record::from_value(json!({"v": null})).unwrap();
        assert_eq!(record.get("v"), Some(&Value::Null));
        assert_eq!(record.get("w"), None);
    }

    #[test]
    fn test_flags() {
        let record = Record::from_value(json!({"a": 1, "b": true, "c": 0, "d": "1"})).unwrap();
        assert!(record.get_flag("a"));
        assert!(record.get_flag("b"));
        assert!(!record.get_flag("c"));
        assert!(record.get_flag("d"));
        assert!(!record.get_flag("missing"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("x")).is_none());
    }
}
