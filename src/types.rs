//! Shared value types used across doc-template.
//! `DynamicValue` is the closed set of values a template can see, and
//! `DataContext` is the mapping bound to a template at render time.
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

/// Data bound to a template: top-level variable name to value.
pub type DataContext = BTreeMap<String, DynamicValue>;

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum DynamicValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    List(Vec<DynamicValue>),
    Map(BTreeMap<String, DynamicValue>),
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DynamicValue::Null,
            Value::Bool(b) => DynamicValue::Bool(b),
            Value::Number(n) => DynamicValue::Number(n),
            Value::String(s) => DynamicValue::String(s),
            Value::Array(items) => {
                DynamicValue::List(items.into_iter().map(DynamicValue::from).collect())
            }
            Value::Object(fields) => DynamicValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, DynamicValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&DynamicValue> for Value {
    fn from(value: &DynamicValue) -> Self {
        match value {
            DynamicValue::String(s) => Value::String(s.clone()),
            DynamicValue::Number(n) => Value::Number(n.clone()),
            DynamicValue::Bool(b) => Value::Bool(*b),
            DynamicValue::Null => Value::Null,
            DynamicValue::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            DynamicValue::Map(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::String(s)
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<i64> for DynamicValue {
    fn from(n: i64) -> Self {
        DynamicValue::Number(n.into())
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DynamicValue::String(s) => serializer.serialize_str(s),
            DynamicValue::Number(n) => n.serialize(serializer),
            DynamicValue::Bool(b) => serializer.serialize_bool(*b),
            DynamicValue::Null => serializer.serialize_unit(),
            DynamicValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DynamicValue::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Strings print raw; everything else prints as compact JSON.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::String(s) => f.write_str(s),
            other => write!(f, "{}", Value::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_json() {
        let value: DynamicValue =
            serde_json::from_str(r#"{"a": [1, true, null], "b": "x"}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert(
            "a".to_string(),
            DynamicValue::List(vec![
                DynamicValue::from(1_i64),
                DynamicValue::Bool(true),
                DynamicValue::Null,
            ]),
        );
        expected.insert("b".to_string(), DynamicValue::from("x"));
        assert_eq!(value, DynamicValue::Map(expected));
    }

    #[test]
    fn serializes_like_json() {
        let value = DynamicValue::List(vec![DynamicValue::from("s1"), DynamicValue::from(2_i64)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["s1",2]"#);
    }

    #[test]
    fn display_keeps_strings_raw() {
        assert_eq!(DynamicValue::from("plain text").to_string(), "plain text");
        assert_eq!(DynamicValue::Null.to_string(), "null");
        assert_eq!(
            DynamicValue::List(vec![DynamicValue::from("a")]).to_string(),
            r#"["a"]"#
        );
    }
}
