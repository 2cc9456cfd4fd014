//! Tool domain value objects: the error taxonomy and the result envelope
//!
//! Every attempt to run a tool, successful or not, produces a
//! [`ToolExecution`]. The envelope is serialized to JSON and appended to
//! the conversation as a tool-role message so the model can react to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why a tool call did not produce a result.
///
/// | Kind | Meaning |
/// |------|---------|
/// | `unknown_tool` | No tool registered under the requested name |
/// | `invalid_arguments` | Arguments could not be decoded into an object |
/// | `schema_violation` | Arguments do not match the parameter schema |
/// | `permission_denied` | Blocked by policy or refused by the user |
/// | `execution_failed` | The handler returned an error or panicked |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownTool,
    InvalidArguments,
    SchemaViolation,
    PermissionDenied,
    ExecutionFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownTool => "unknown_tool",
            ErrorKind::InvalidArguments => "invalid_arguments",
            ErrorKind::SchemaViolation => "schema_violation",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::ExecutionFailed => "execution_failed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error that stopped a tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::UnknownTool,
            format!("Unknown tool: {}", name.as_ref()),
        )
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArguments, message)
    }

    pub fn schema_violation(message: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::SchemaViolation,
            format!("Invalid parameters: {}", message.as_ref()),
        )
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExecutionFailed, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result envelope of one tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    pub ok: bool,
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ToolExecution {
    /// Wrap a handler payload.
    ///
    /// The payload may veto success itself: `"ok": false` or
    /// `"success": false` marks the envelope failed and lifts its `error`.
    pub fn completed(tool: impl Into<String>, input: Value, result: Value) -> Self {
        let declared = result
            .get("ok")
            .or_else(|| result.get("success"))
            .and_then(Value::as_bool)
            .unwrap_or(true);

        let (error, error_kind) = if declared {
            (None, None)
        } else {
            let message = result
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Tool reported failure")
                .to_string();
            (Some(message), Some(ErrorKind::ExecutionFailed))
        };

        Self {
            ok: declared,
            tool: tool.into(),
            input: Some(input),
            result: Some(result),
            error,
            error_kind,
        }
    }

    pub fn failed(tool: impl Into<String>, input: Option<Value>, error: ToolError) -> Self {
        Self {
            ok: false,
            tool: tool.into(),
            input,
            result: None,
            error: Some(error.message),
            error_kind: Some(error.kind),
        }
    }

    pub fn is_unknown_tool(&self) -> bool {
        self.error_kind == Some(ErrorKind::UnknownTool)
    }

    /// JSON text appended to the conversation
    pub fn to_message_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"ok":false,"tool":{:?},"error":"unserializable result: {}"}}"#,
                self.tool, e
            )
        })
    }
}
