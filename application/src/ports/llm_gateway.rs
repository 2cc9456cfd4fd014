//! LLM Gateway port
//!
//! Defines the interface for communicating with chat-completion providers.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use wolf_domain::{ChatResponse, Message};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider not supported: {0}")]
    Unsupported(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One model call: the full conversation plus the tools it may use
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    /// Function-calling schemas, as produced by a `ToolSchemaPort`
    pub tools: Vec<Value>,
    /// Image file paths to attach to the last user message
    pub images: Vec<String>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to a model provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Short provider name for logs (e.g. "ollama")
    fn provider_name(&self) -> &str;

    /// Send one chat request and wait for the complete response
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError>;
}
