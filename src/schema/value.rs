use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dynamic value carried in placement arguments.
///
/// Untagged so authoring files can write plain literals (`3`, `"grass"`,
/// `true`) in either RON or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Named arguments handed to the consumer with each placement.
///
/// Ordered so serialized commands are stable across runs.
pub type ArgumentMap = BTreeMap<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_literals_from_json() {
        let map: ArgumentMap =
            serde_json::from_str(r#"{"kind": "grass", "count": 3, "scale": 0.5, "solid": true}"#)
                .unwrap();
        assert_eq!(map["kind"], Value::String("grass".to_string()));
        assert_eq!(map["count"], Value::Int(3));
        assert_eq!(map["scale"], Value::Float(0.5));
        assert_eq!(map["solid"], Value::Bool(true));
    }
}
