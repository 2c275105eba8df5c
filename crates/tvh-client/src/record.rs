use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity returned by the upstream API: a network, mux, service, channel,
/// subscription, connection, input or DVR entry.
///
/// Fields are read by name and every accessor returns `None` when the key is
/// missing or holds a value that cannot be read as the requested shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Field rendered as label text. Numbers and booleans are formatted,
    /// null, arrays and objects are treated as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(value) => value.as_f64(),
            Value::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Value::String(value) => value.trim().parse::<f64>().ok(),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Record;

    fn record(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn text_formats_scalars_and_rejects_containers() {
        let entry = record(json!({
            "name": "BBC One",
            "number": 101,
            "enabled": true,
            "services": ["a", "b"],
            "icon": null,
        }));

        assert_eq!(entry.text("name").as_deref(), Some("BBC One"));
        assert_eq!(entry.text("number").as_deref(), Some("101"));
        assert_eq!(entry.text("enabled").as_deref(), Some("true"));
        assert_eq!(entry.text("services"), None);
        assert_eq!(entry.text("icon"), None);
        assert_eq!(entry.text("missing"), None);
    }

    #[test]
    fn number_accepts_bools_and_numeric_strings() {
        let entry = record(json!({
            "start": 1_700_000_000,
            "enabled": false,
            "snr": "21.5",
            "name": "not a number",
        }));

        assert_eq!(entry.number("start"), Some(1_700_000_000.0));
        assert_eq!(entry.number("enabled"), Some(0.0));
        assert_eq!(entry.number("snr"), Some(21.5));
        assert_eq!(entry.number("name"), None);
        assert_eq!(entry.number("missing"), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let entry = record(json!({ "username": null, "hostname": "" }));
        assert_eq!(entry.text("username"), None);
        assert_eq!(entry.number("username"), None);
        assert_eq!(entry.text("hostname").as_deref(), Some(""));
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(Record::try_from(json!([1, 2, 3])).is_err());
    }
}
