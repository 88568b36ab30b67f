use crate::utils::format_number;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single habit value stored in a daily log.
///
/// JSON form is untagged: `true`, `5`, `2.5`, `"good"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view used by the aggregator: flags count as 1/0, text has none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            // interi senza ".0"
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(true) => write!(f, "yes"),
            FieldValue::Bool(false) => write!(f, "no"),
            FieldValue::Number(n) => write!(f, "{}", format_number(*n)),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}
