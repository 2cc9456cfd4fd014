//! Tool schema conversion port.
//!
//! Separates "which tools exist" (catalog) from "how to serialize them for
//! the model API" (infrastructure).

use wolf_domain::ToolDefinition;

/// Port for converting tool definitions to the provider's function-calling format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert several tools, sorted by name so exports are stable.
    fn all_tools_schema(&self, tools: &[&ToolDefinition]) -> Vec<serde_json::Value> {
        let mut sorted: Vec<&ToolDefinition> = tools.to_vec();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
