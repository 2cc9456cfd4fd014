//! Model response types for function calling.
//!
//! The gateway normalizes every provider into the chat-completion shape:
//! a list of choices, each carrying an assistant message. Tool calls come
//! in one of two shapes, a `tool_calls` list or a single legacy
//! `function_call`. Neither present means the message is a final answer.

use super::entities::Message;
use crate::tool::arguments::ToolArguments;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized response of one model call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message as sent by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<WireFunction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub function: WireFunction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Either a JSON object or a JSON-encoded string
    #[serde(default)]
    pub arguments: Value,
}

impl WireFunction {
    fn into_tool_call(self, id: Option<String>) -> ToolCall {
        ToolCall {
            id,
            name: self.name.unwrap_or_default(),
            arguments: ToolArguments::from_value(self.arguments),
        }
    }
}

impl ChatResponse {
    /// Single-choice response with plain text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: Some(text.into()),
                    ..Default::default()
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    /// Single-choice response requesting tools
    pub fn from_tool_calls(calls: Vec<ToolCall>) -> Self {
        let wire = calls
            .into_iter()
            .map(|call| WireToolCall {
                id: call.id,
                function: WireFunction {
                    name: Some(call.name),
                    arguments: call.arguments.to_value(),
                },
            })
            .collect();
        Self {
            choices: vec![Choice {
                message: AssistantMessage {
                    content: None,
                    tool_calls: Some(wire),
                    function_call: None,
                },
                finish_reason: Some("tool_calls".to_string()),
            }],
        }
    }

    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    pub fn into_first_choice(self) -> Option<Choice> {
        self.choices.into_iter().next()
    }
}

impl AssistantMessage {
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Extract requested tool calls, in the order the model emitted them.
    ///
    /// A non-empty `tool_calls` list wins over a legacy `function_call`.
    pub fn extract_tool_calls(&self) -> Vec<ToolCall> {
        if let Some(calls) = self.tool_calls.as_ref().filter(|c| !c.is_empty()) {
            return calls
                .iter()
                .cloned()
                .map(|call| call.function.into_tool_call(call.id))
                .collect();
        }
        match &self.function_call {
            Some(function) => vec![function.clone().into_tool_call(None)],
            None => Vec::new(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.extract_tool_calls().is_empty()
    }

    /// Conversation entry preserving the tool-call metadata
    pub fn to_message(&self) -> Message {
        Message::assistant_with_tool_calls(self.text(), self.extract_tool_calls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_final_answer_has_no_calls() {
        let response = ChatResponse::from_text("Hello!");
        let message = &response.first_choice().unwrap().message;
        assert_eq!(message.text(), "Hello!");
        assert!(message.extract_tool_calls().is_empty());
    }

    #[test]
    fn test_extract_structured_tool_calls_in_order() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": "",
                    "tool_calls": [
                        {"id": "a", "function": {"name": "read_file", "arguments": {"path": "x"}}},
                        {"id": "b", "function": {"name": "list_directory", "arguments": "{\"path\":\".\"}"}}
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let calls = response.first_choice().unwrap().message.extract_tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "read_file");
        assert_eq!(calls[0].id.as_deref(), Some("a"));
        assert!(matches!(calls[1].arguments, ToolArguments::Raw(_)));
        assert_eq!(calls[1].arguments.resolve().unwrap()["path"], ".");
    }

    #[test]
    fn test_extract_legacy_function_call() {
        let message: AssistantMessage = serde_json::from_value(json!({
            "content": null,
            "function_call": {"name": "get_system_info", "arguments": "{}"}
        }))
        .unwrap();
        let calls = message.extract_tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "get_system_info");
        assert!(calls[0].id.is_none());
    }

    #[test]
    fn test_missing_name_becomes_nameless_call() {
        let message: AssistantMessage = serde_json::from_value(json!({
            "tool_calls": [{"function": {"arguments": {}}}]
        }))
        .unwrap();
        let calls = message.extract_tool_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_nameless());
    }

    #[test]
    fn test_empty_choices() {
        let response: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_choice().is_none());
    }

    #[test]
    fn test_to_message_preserves_calls() {
        let call = ToolCall::new("list_directory", ToolArguments::from_value(json!({"path": "."})))
            .with_id("call_9");
        let response = ChatResponse::from_tool_calls(vec![call.clone()]);
        let message = response.first_choice().unwrap().message.to_message();
        assert_eq!(message.tool_calls, vec![call]);
        assert_eq!(message.content, "");
    }
}
