//! Ollama gateway
//!
//! Talks to a local Ollama server through `POST {base_url}/api/chat` with
//! `stream: false`, and normalizes its single `message` into a one-choice
//! [`ChatResponse`].

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};
use wolf_application::{ChatRequest, GatewayError, LlmGateway};
use wolf_domain::{AssistantMessage, ChatResponse, Choice, Message, Role};

/// Default Ollama endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Body of a non-streaming `/api/chat` response
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: AssistantMessage,
}

/// [`LlmGateway`] backed by an Ollama server
#[derive(Clone)]
pub struct OllamaGateway {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs.max(1)),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request body for `/api/chat`.
    ///
    /// Encoded images go on the last user message.
    fn build_payload(&self, request: &ChatRequest) -> Value {
        let mut messages: Vec<Value> = request.messages.iter().map(wire_message).collect();

        let images = encode_images(&request.images);
        if !images.is_empty()
            && let Some(last_user) = messages
                .iter_mut()
                .rev()
                .find(|m| m["role"] == Role::User.as_str())
        {
            last_user["images"] = json!(images);
        }

        let mut payload = json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
        });
        if !request.tools.is_empty() {
            payload["tools"] = Value::Array(request.tools.clone());
        }
        payload
    }
}

impl Default for OllamaGateway {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = self.build_payload(&request);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            images = request.images.len(),
            "Ollama request"
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Ollama returned an error status");
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        debug!(tool_calls = body.message.has_tool_calls(), "Ollama response received");

        Ok(into_chat_response(body.message))
    }
}

/// Wrap Ollama's message into a single OpenAI-style choice
fn into_chat_response(message: AssistantMessage) -> ChatResponse {
    let finish_reason = if message.has_tool_calls() {
        "tool_calls"
    } else {
        "stop"
    };
    ChatResponse {
        choices: vec![Choice {
            message,
            finish_reason: Some(finish_reason.to_string()),
        }],
    }
}

/// Conversation message in Ollama's wire format
fn wire_message(message: &Message) -> Value {
    let mut wire = json!({
        "role": message.role.as_str(),
        "content": message.content,
    });
    if !message.tool_calls.is_empty() {
        wire["tool_calls"] = message
            .tool_calls
            .iter()
            .map(|call| {
                let mut wire_call = json!({
                    "type": "function",
                    "function": {
                        "name": call.name,
                        "arguments": call.arguments.to_value(),
                    }
                });
                if let Some(id) = &call.id {
                    wire_call["id"] = json!(id);
                }
                wire_call
            })
            .collect();
    }
    if let Some(name) = &message.name {
        wire["name"] = json!(name);
    }
    if let Some(id) = &message.tool_call_id {
        wire["tool_call_id"] = json!(id);
    }
    wire
}

/// Base64 contents of the given image files; unreadable files are skipped
fn encode_images(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| match std::fs::read(path) {
            Ok(bytes) => Some(STANDARD.encode(bytes)),
            Err(e) => {
                warn!(path = %path, error = %e, "Skipping unreadable image");
                None
            }
        })
        .collect()
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolf_domain::{ToolArguments, ToolCall};

    #[test]
    fn test_payload_shape() {
        let gateway = OllamaGateway::new("http://example:11434/", 30);
        assert_eq!(gateway.base_url(), "http://example:11434");

        let request = ChatRequest::new(
            "llama3.1",
            vec![Message::system("sys"), Message::user("hello")],
        )
        .with_tools(vec![json!({"type": "function"})]);
        let payload = gateway.build_payload(&request);

        assert_eq!(payload["model"], "llama3.1");
        assert_eq!(payload["stream"], json!(false));
        assert_eq!(payload["messages"][1]["role"], "user");
        assert_eq!(payload["messages"][1]["content"], "hello");
        assert_eq!(payload["tools"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_payload_without_tools_omits_key() {
        let request = ChatRequest::new("m", vec![Message::user("hi")]);
        let payload = OllamaGateway::default().build_payload(&request);
        assert!(payload.get("tools").is_none());
    }

    #[test]
    fn test_images_attached_to_last_user_message() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("pixel.png");
        std::fs::write(&image, [1u8, 2, 3]).unwrap();

        let request = ChatRequest::new(
            "llava",
            vec![
                Message::user("first"),
                Message::assistant("ok"),
                Message::user("what is this?"),
            ],
        )
        .with_images(vec![
            image.to_string_lossy().into_owned(),
            dir.path().join("missing.png").to_string_lossy().into_owned(),
        ]);
        let payload = OllamaGateway::default().build_payload(&request);

        assert!(payload["messages"][0].get("images").is_none());
        assert_eq!(payload["messages"][2]["images"], json!([STANDARD.encode([1u8, 2, 3])]));
    }

    #[test]
    fn test_wire_message_for_tool_turns() {
        let call = ToolCall::new("read_file", ToolArguments::from_value(json!({"path": "a"})))
            .with_id("c1");
        let unnamed = ToolCall::new("get_system_info", ToolArguments::default());
        let assistant = wire_message(&Message::assistant_with_tool_calls("", vec![call, unnamed]));
        assert_eq!(assistant["tool_calls"][0]["id"], "c1");
        assert_eq!(assistant["tool_calls"][0]["type"], "function");
        assert_eq!(assistant["tool_calls"][0]["function"]["name"], "read_file");
        assert_eq!(assistant["tool_calls"][0]["function"]["arguments"]["path"], "a");
        assert!(assistant["tool_calls"][1].get("id").is_none());

        let tool = wire_message(&Message::tool("read_file", "{}", Some("c1".to_string())));
        assert_eq!(tool["role"], "tool");
        assert_eq!(tool["name"], "read_file");
        assert_eq!(tool["tool_call_id"], "c1");
    }

    #[test]
    fn test_response_normalization() {
        let body: OllamaChatResponse = serde_json::from_value(json!({
            "model": "llama3.1",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [{"function": {"name": "list_directory", "arguments": {"path": "."}}}]
            },
            "done": true
        }))
        .unwrap();
        let response = into_chat_response(body.message);
        let choice = response.first_choice().unwrap();
        assert_eq!(choice.finish_reason.as_deref(), Some("tool_calls"));
        assert_eq!(choice.message.extract_tool_calls()[0].name, "list_directory");

        let text = into_chat_response(AssistantMessage {
            content: Some("hi".to_string()),
            ..Default::default()
        });
        assert_eq!(text.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let gateway = OllamaGateway::new("http://127.0.0.1:1", 5);
        let result = gateway
            .chat(ChatRequest::new("m", vec![Message::user("hi")]))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::ConnectionError(_)) | Err(GatewayError::RequestFailed(_))
        ));
    }
}
