//! JSON request bodies built from optional fields.
//!
//! Fields whose value is null, `false`, zero, an empty string, an empty array
//! or an empty object are left out of the body entirely. A `badge` of 0 is
//! therefore never sent.

use serde::Serialize;
use serde_json::{Map, Value};

use ua_core::error::{AirshipError, AirshipResult};

/// Whether a value counts as absent and must be omitted from a body.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

/// A JSON object body assembled field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBody {
    fields: Map<String, Value>,
}

impl JsonBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a caller-supplied payload, kept verbatim. The payload must be
    /// a JSON object; `null` is treated as an empty one.
    pub fn from_payload(payload: Value) -> AirshipResult<Self> {
        match payload {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::new()),
            other => Err(AirshipError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Set `name` to `value` unless the value is empty. An empty value leaves
    /// any existing entry for `name` untouched.
    pub fn field<T: Serialize>(mut self, name: &str, value: T) -> AirshipResult<Self> {
        let value = serde_json::to_value(value)?;
        if !is_empty_value(&value) {
            self.fields.insert(name.to_string(), value);
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Encode the body, even when it has no fields.
    pub fn encode(&self) -> AirshipResult<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Encode the body, or `None` when no field survived. Used by endpoints
    /// that send no body at all when every optional field is absent.
    pub fn encode_if_present(&self) -> AirshipResult<Option<String>> {
        if self.is_empty() {
            Ok(None)
        } else {
            self.encode().map(Some)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
