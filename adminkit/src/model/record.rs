//! Dynamic record

use std::collections::HashMap;

use super::Editable;
use super::Row;
use super::Value;

/// A dynamic record keyed by attribute name.
///
/// Records are the default row type for pages that load their data as
/// loosely typed maps (JSON lists, query results). Typed getters return
/// `None` when the attribute is missing or holds another type.
///
/// # Example
///
/// ```
/// use adminkit::model::Record;
///
/// let portfolio = Record::new("p-1")
///     .set("cityName", "Abilene")
///     .set("accounts", 12i64);
///
/// assert_eq!(portfolio.get_str("cityName"), Some("Abilene"));
/// assert_eq!(portfolio.get_i64("accounts"), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The unique identifier of the record.
    pub(crate) id: String,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Builds a record from a JSON object.
    ///
    /// The `id` attribute becomes the record id; numbers are stringified.
    /// Returns `None` when the value is not an object or has no usable id.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        let object = json.as_object()?;
        let id = match object.get("id")? {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), Value::from_json(value)))
            .collect();
        Some(Self { id, fields })
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the record id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value, consuming and returning the record.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    /// Returns the field as a string slice.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns the field as an integer.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the field as a boolean.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }
}

impl Row for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, key: &str) -> Value {
        if key == "id" {
            return Value::Text(self.id.clone());
        }
        self.fields.get(key).cloned().unwrap_or_default()
    }
}

impl Editable for Record {
    fn blank(id: String) -> Self {
        Self::new(id)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        if key == "id" {
            self.id = value.to_display_string();
            return;
        }
        self.fields.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_reads_id_and_missing_fields() {
        let record = Record::new("7").set("name", "Zed");
        assert_eq!(record.value("id"), Value::from("7"));
        assert_eq!(record.value("name"), Value::from("Zed"));
        assert_eq!(record.value("missing"), Value::Null);
    }

    #[test]
    fn test_from_json_object() {
        let json = serde_json::json!({"id": 3, "cityName": "Abilene", "score": 1.5});
        let record = Record::from_json(&json).unwrap();
        assert_eq!(record.id(), "3");
        assert_eq!(record.get_str("cityName"), Some("Abilene"));
        assert_eq!(record.get("score"), Some(&Value::Float(1.5)));
        assert!(!record.contains("id"));
    }

    #[test]
    fn test_from_json_rejects_missing_id() {
        assert!(Record::from_json(&serde_json::json!({"name": "x"})).is_none());
        assert!(Record::from_json(&serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Record::new("1").set("name", "Amy");
        let mut copy = original.clone();
        copy.set_value("name", Value::from("Zed"));
        assert_eq!(original.get_str("name"), Some("Amy"));
        assert_eq!(copy.get_str("name"), Some("Zed"));
    }
}
