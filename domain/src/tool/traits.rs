//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolDefinition, ToolParameter};
use serde_json::{Map, Value};

/// Validator for tool arguments
///
/// This is a pure domain trait that validates decoded arguments
/// against a definition without any I/O operations.
pub trait ToolValidator {
    /// Validate arguments, returning them with declared defaults applied
    fn validate(
        &self,
        arguments: Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<Map<String, Value>, String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        mut arguments: Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<Map<String, Value>, String> {
        // Check that all provided arguments are valid parameters
        for arg_name in arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        for param in &definition.parameters {
            // An explicit null counts as absent
            if let Some(value) = arguments.get(&param.name).filter(|v| !v.is_null()) {
                check_value(param, value)?;
                continue;
            }
            if param.required {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
            arguments.remove(&param.name);
            if let Some(default) = &param.default {
                arguments.insert(param.name.clone(), default.clone());
            }
        }

        Ok(arguments)
    }
}

fn check_value(param: &ToolParameter, value: &Value) -> Result<(), String> {
    if !param.param_type.accepts(value) {
        return Err(format!(
            "Parameter '{}' must be of type {}",
            param.name, param.param_type
        ));
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = param.minimum
            && number < min
        {
            return Err(format!("Parameter '{}' must be >= {}", param.name, min));
        }
        if let Some(max) = param.maximum
            && number > max
        {
            return Err(format!("Parameter '{}' must be <= {}", param.name, max));
        }
    }

    if let Some(text) = value.as_str() {
        let len = text.chars().count();
        if let Some(min) = param.min_length
            && len < min
        {
            return Err(format!(
                "Parameter '{}' must be at least {} characters",
                param.name, min
            ));
        }
        if let Some(max) = param.max_length
            && len > max
        {
            return Err(format!(
                "Parameter '{}' must be at most {} characters",
                param.name, max
            ));
        }
    }

    if let Some(allowed) = &param.enum_values
        && !allowed.contains(value)
    {
        let options: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
        return Err(format!(
            "Parameter '{}' must be one of: {}",
            param.name,
            options.join(", ")
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, RiskLevel};
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn command_tool() -> ToolDefinition {
        ToolDefinition::new("execute_command", "Run a command", RiskLevel::Modifying)
            .with_parameter(
                ToolParameter::new("command", "Command line", true).with_length(Some(1), None),
            )
            .with_parameter(
                ToolParameter::new("timeout_secs", "Timeout", false)
                    .with_type(ParamType::Integer)
                    .with_range(1.0, 600.0)
                    .with_default(120),
            )
            .with_parameter(
                ToolParameter::new("shell", "Shell to use", false).with_enum(["sh", "bash"]),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let result = validator.validate(Map::new(), &command_tool());
        assert!(result.unwrap_err().contains("Missing required parameter 'command'"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let result = validator.validate(args(json!({"command": "ls", "cwd": "/"})), &command_tool());
        assert!(result.unwrap_err().contains("Unknown parameter 'cwd'"));
    }

    #[test]
    fn test_validator_applies_defaults() {
        let validator = DefaultToolValidator;
        let validated = validator
            .validate(args(json!({"command": "ls"})), &command_tool())
            .unwrap();
        assert_eq!(validated["timeout_secs"], json!(120));
        assert!(!validated.contains_key("shell"));
    }

    #[test]
    fn test_validator_type_mismatch() {
        let validator = DefaultToolValidator;
        let result = validator.validate(
            args(json!({"command": "ls", "timeout_secs": "fast"})),
            &command_tool(),
        );
        assert!(result.unwrap_err().contains("must be of type integer"));
    }

    #[test]
    fn test_validator_bounds() {
        let validator = DefaultToolValidator;
        let too_big = validator.validate(
            args(json!({"command": "ls", "timeout_secs": 601})),
            &command_tool(),
        );
        assert!(too_big.unwrap_err().contains("<= 600"));

        let too_small = validator.validate(
            args(json!({"command": "ls", "timeout_secs": 0})),
            &command_tool(),
        );
        assert!(too_small.unwrap_err().contains(">= 1"));
    }

    #[test]
    fn test_validator_length_and_enum() {
        let validator = DefaultToolValidator;
        let empty = validator.validate(args(json!({"command": ""})), &command_tool());
        assert!(empty.unwrap_err().contains("at least 1"));

        let bad_shell = validator.validate(
            args(json!({"command": "ls", "shell": "fish"})),
            &command_tool(),
        );
        assert!(bad_shell.unwrap_err().contains("must be one of"));
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let result = validator.validate(
            args(json!({"command": "ls -la", "timeout_secs": 30, "shell": "bash"})),
            &command_tool(),
        );
        assert!(result.is_ok());
    }
}
