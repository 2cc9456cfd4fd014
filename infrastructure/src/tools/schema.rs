//! Function-calling schema converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{"type": "function", "function": {...}}` entries understood by Ollama
//! and OpenAI-compatible chat APIs.

use serde_json::{Map, Value, json};
use wolf_application::ToolSchemaPort;
use wolf_domain::{ToolDefinition, ToolParameter};

/// Converter producing function-calling JSON Schema.
///
/// Parameter constraints map onto JSON Schema keywords:
/// - `minimum` / `maximum` → `minimum` / `maximum`
/// - `min_length` / `max_length` → `minLength` / `maxLength`
/// - `enum_values` → `enum`
/// - `default` → `default`
pub struct FunctionSchemaConverter;

impl FunctionSchemaConverter {
    fn parameter_schema(param: &ToolParameter) -> Value {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(param.param_type.as_str()));
        prop.insert("description".to_string(), json!(param.description));
        if let Some(default) = &param.default {
            prop.insert("default".to_string(), default.clone());
        }
        if let Some(min) = param.minimum {
            prop.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = param.maximum {
            prop.insert("maximum".to_string(), json!(max));
        }
        if let Some(min) = param.min_length {
            prop.insert("minLength".to_string(), json!(min));
        }
        if let Some(max) = param.max_length {
            prop.insert("maxLength".to_string(), json!(max));
        }
        if let Some(values) = &param.enum_values {
            prop.insert("enum".to_string(), Value::Array(values.clone()));
        }
        Value::Object(prop)
    }
}

impl ToolSchemaPort for FunctionSchemaConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(param.name.clone(), Self::parameter_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolf_domain::{ParamType, RiskLevel};

    #[test]
    fn test_tool_to_schema() {
        let tool = ToolDefinition::new("list_directory", "List a directory", RiskLevel::Safe)
            .with_parameter(ToolParameter::new("path", "Directory", true))
            .with_parameter(
                ToolParameter::new("depth", "Depth", false)
                    .with_type(ParamType::Integer)
                    .with_range(0.0, 5.0)
                    .with_default(1),
            )
            .with_parameter(ToolParameter::new("mode", "Mode", false).with_enum(["short", "long"]));

        let schema = FunctionSchemaConverter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        let function = &schema["function"];
        assert_eq!(function["name"], "list_directory");
        assert_eq!(function["description"], "List a directory");
        assert_eq!(function["parameters"]["type"], "object");

        let props = &function["parameters"]["properties"];
        assert_eq!(props["path"]["type"], "string");
        assert_eq!(props["depth"]["type"], "integer");
        assert_eq!(props["depth"]["minimum"], json!(0.0));
        assert_eq!(props["depth"]["maximum"], json!(5.0));
        assert_eq!(props["depth"]["default"], json!(1));
        assert_eq!(props["mode"]["enum"], json!(["short", "long"]));
        assert_eq!(function["parameters"]["required"], json!(["path"]));
    }

    #[test]
    fn test_all_tools_schema_sorted_and_stable() {
        let write = ToolDefinition::new("write_file", "Write", RiskLevel::Modifying);
        let read = ToolDefinition::new("read_file", "Read", RiskLevel::Safe);

        let first = FunctionSchemaConverter.all_tools_schema(&[&write, &read]);
        let second = FunctionSchemaConverter.all_tools_schema(&[&read, &write]);

        assert_eq!(first[0]["function"]["name"], "read_file");
        assert_eq!(first[1]["function"]["name"], "write_file");
        assert_eq!(first, second);
    }
}
