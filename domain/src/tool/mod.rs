//! Tool domain module
//!
//! Defines what a tool is to the rest of the system: a named, schema-described
//! operation with a declared [`RiskLevel`]. Everything here is pure data and
//! validation; handlers and I/O live in outer layers.
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌───────────────┐
//! │ToolDefinition│───▶│ ToolCall      │───▶│ ToolExecution │
//! │ (schema)     │    │ (model asks)  │    │ (envelope)    │
//! └──────────────┘    └───────────────┘    └───────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDefinition`] / [`ToolParameter`]: name, description, parameters, risk
//! - [`ToolCall`]: an invocation request with [`ToolArguments`]
//! - [`ToolValidator`]: schema validation that also applies defaults
//! - [`ToolExecution`]: result envelope with an [`ErrorKind`] on failure

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::ToolArguments;
pub use entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ErrorKind, ToolError, ToolExecution};
