//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use wolf_application::ExecutionParams;
use wolf_application::config::{DEFAULT_MAX_TOOL_ITERATIONS, DEFAULT_SYSTEM_PROMPT};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_tool_iterations = 6
/// system_prompt = "You are Wolf..."   # "" disables the system message
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model calls per run
    pub max_tool_iterations: usize,
    /// System prompt; `None` uses the built-in prompt
    pub system_prompt: Option<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
            system_prompt: None,
        }
    }
}

impl FileAgentConfig {
    /// Loop parameters for `model`
    pub fn to_execution_params(&self, model: impl Into<String>) -> ExecutionParams {
        let system_prompt = match &self.system_prompt {
            Some(prompt) if prompt.trim().is_empty() => None,
            Some(prompt) => Some(prompt.clone()),
            None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        };
        ExecutionParams::default()
            .with_model(model)
            .with_max_tool_iterations(self.max_tool_iterations)
            .with_system_prompt(system_prompt)
    }
}
