//! Tool call arguments as delivered by the model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments attached to a tool call.
///
/// Some providers send a decoded JSON object, others a JSON-encoded string.
/// The variant is resolved once, at the executor boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Structured(Map<String, Value>),
    Raw(String),
}

impl Default for ToolArguments {
    fn default() -> Self {
        ToolArguments::Structured(Map::new())
    }
}

impl ToolArguments {
    /// Build from any JSON value the model produced.
    ///
    /// `null` becomes an empty mapping; other non-object, non-string values
    /// are kept as raw text so that resolution reports them.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => ToolArguments::Structured(map),
            Value::String(text) => ToolArguments::Raw(text),
            Value::Null => ToolArguments::default(),
            other => ToolArguments::Raw(other.to_string()),
        }
    }

    /// Decode into a JSON object.
    pub fn resolve(&self) -> Result<Map<String, Value>, String> {
        match self {
            ToolArguments::Structured(map) => Ok(map.clone()),
            ToolArguments::Raw(text) if text.trim().is_empty() => Ok(Map::new()),
            ToolArguments::Raw(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Err("Parameters must be a JSON object".to_string()),
                Err(e) => Err(format!("Invalid JSON arguments: {}", e)),
            },
        }
    }

    /// Best-effort JSON view for logging and result envelopes
    pub fn to_value(&self) -> Value {
        match self {
            ToolArguments::Structured(map) => Value::Object(map.clone()),
            ToolArguments::Raw(text) => serde_json::from_str(text)
                .unwrap_or_else(|_| Value::String(text.clone())),
        }
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(map: Map<String, Value>) -> Self {
        ToolArguments::Structured(map)
    }
}
