//! Tool handler port
//!
//! A handler is the concrete body of one tool. It receives arguments that
//! already passed schema validation and policy gating.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Expected failure of a tool body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFault {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Failed(String),
}

impl From<std::io::Error> for ToolFault {
    fn from(err: std::io::Error) -> Self {
        ToolFault::Io(err.to_string())
    }
}

/// Concrete implementation bound to a tool definition.
///
/// Return `Err` for expected failures; a panic is caught by the executor
/// and reported like an error.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFault>;
}

/// Adapter turning a synchronous closure into a [`ToolHandler`]
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, ToolFault> + Send + Sync,
{
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFault> {
        (self.0)(arguments)
    }
}

/// Read a required string argument
pub fn require_str<'a>(arguments: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolFault> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolFault::InvalidInput(format!("Missing required argument: {}", key)))
}
