//! Model gateways
//!
//! | Provider | Adapter |
//! |----------|---------|
//! | `ollama` | [`OllamaGateway`] |
//! | `openrouter` | [`OpenRouterGateway`] (not implemented) |

pub mod ollama;
pub mod openrouter;

pub use ollama::OllamaGateway;
pub use openrouter::OpenRouterGateway;

use crate::config::FileProviderConfig;
use std::sync::Arc;
use tracing::info;
use wolf_application::LlmGateway;
use wolf_domain::Provider;

/// Gateway for the configured provider
///
/// An unknown provider falls back to Ollama, as `FileProviderConfig::validate` reports.
pub fn build_gateway(config: &FileProviderConfig) -> Arc<dyn LlmGateway> {
    match config.parse_kind().0 {
        Provider::Ollama => {
            info!(base_url = %config.ollama_base_url, "Using Ollama gateway");
            Arc::new(OllamaGateway::new(
                config.ollama_base_url.clone(),
                config.timeout_sec,
            ))
        }
        Provider::OpenRouter => {
            info!("Using OpenRouter gateway");
            Arc::new(OpenRouterGateway::new(config.openrouter_api_key.clone()))
        }
    }
}
