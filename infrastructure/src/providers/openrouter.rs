//! OpenRouter gateway
//!
//! Placeholder adapter: the provider is recognized in configuration but
//! every call fails with [`GatewayError::Unsupported`].

use async_trait::async_trait;
use wolf_application::{ChatRequest, GatewayError, LlmGateway};
use wolf_domain::ChatResponse;

#[derive(Debug, Clone, Default)]
pub struct OpenRouterGateway {
    api_key: Option<String>,
}

impl OpenRouterGateway {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        Err(GatewayError::Unsupported(
            "OpenRouter provider is not implemented yet; use provider 'ollama'".to_string(),
        ))
    }
}
