//! Execution parameters: loop control for a single run.
//!
//! [`ExecutionParams`] groups the static parameters that control the
//! loop in [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Default cap on model calls per run
pub const DEFAULT_MAX_TOOL_ITERATIONS: usize = 6;

/// Default model served by Ollama
pub const DEFAULT_MODEL: &str = "granite3.1-moe:3b";

/// System prompt used when configuration does not provide one
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are Wolf, a helpful command-line assistant.

You have tools for file operations and command execution. Use them ONLY when the user explicitly asks for an action on files or commands.

For casual conversation, greetings, questions about your capabilities or general help, answer conversationally WITHOUT calling any tool.

Examples:

User: "hey there"
Assistant: Hi! I'm Wolf, your command-line assistant. I can work with files and run commands for you. What can I do?

User: "list files"
Assistant: [calls list_directory]

User: "create a file called test.txt"
Assistant: [calls create_file with path="test.txt"]

Remember: tools are for explicit file or command requests, not for conversation.
"#;

/// Execution loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Model name passed to the gateway.
    pub model: String,
    /// Maximum number of model calls before the run gives up.
    pub max_tool_iterations: usize,
    /// System message placed first in the conversation, if any.
    pub system_prompt: Option<String>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = max;
        self
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_tool_iterations, 6);
        assert_eq!(params.model, "granite3.1-moe:3b");
        assert!(params.system_prompt.as_deref().unwrap().starts_with("You are Wolf"));
    }

    #[test]
    fn test_builders() {
        let params = ExecutionParams::default()
            .with_model("llama3.2")
            .with_max_tool_iterations(0)
            .with_system_prompt(None);
        assert_eq!(params.model, "llama3.2");
        assert_eq!(params.max_tool_iterations, 0);
        assert!(params.system_prompt.is_none());
    }
}
