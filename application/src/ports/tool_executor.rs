//! Tool Executor port
//!
//! Defines the interface the orchestrator uses to run tool calls.

use async_trait::async_trait;
use wolf_domain::{ToolCall, ToolDefinition, ToolExecution};

/// Port for tool execution
///
/// `execute` never fails: every outcome, including unknown tools and
/// refusals, comes back as a [`ToolExecution`] envelope.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of all available tools, sorted by name
    fn definitions(&self) -> Vec<&ToolDefinition>;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.definitions().iter().any(|d| d.name == name)
    }

    /// Validate, gate and run one tool call
    async fn execute(&self, call: &ToolCall) -> ToolExecution;
}
