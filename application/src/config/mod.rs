//! Application-level configuration.
//!
//! - [`ExecutionParams`]: loop control (model, iteration cap, system prompt)

pub mod execution_params;

pub use execution_params::{
    DEFAULT_MAX_TOOL_ITERATIONS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, ExecutionParams,
};
