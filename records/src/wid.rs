//! The `wid` location field and its wire representations.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Every shape the client has been seen to send for `wid`.
///
/// The same logical identifier arrives as a string in some messages and as
/// a JSON number (integer or float) in others.
#[derive(Debug, Clone, PartialEq)]
pub enum WidRepr {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Other(Value),
}

impl WidRepr {
    /// Classifies a raw JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::Integer(int)
                } else if let Some(uint) = number.as_u64() {
                    Self::Unsigned(uint)
                } else if let Some(float) = number.as_f64() {
                    Self::Float(float)
                } else {
                    Self::Other(Value::Number(number))
                }
            }
            other => Self::Other(other),
        }
    }

    /// Renders the canonical text form.
    ///
    /// Numbers become decimal integer text (floats truncate toward zero),
    /// strings pass through, and anything else falls back to its compact JSON
    /// text (`[1,2]`, `true`). `null` renders as the empty string rather than
    /// a placeholder, so an absent location never matches a real one.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(int) => int.to_string(),
            Self::Unsigned(uint) => uint.to_string(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(float) => (float.trunc() as i64).to_string(),
            Self::Other(Value::Null) => String::new(),
            Self::Other(value) => value.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for WidRepr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// `deserialize_with` adapter that stores `wid` in canonical form.
pub fn deserialize_wid<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    WidRepr::deserialize(deserializer).map(|wid| wid.canonical())
}
