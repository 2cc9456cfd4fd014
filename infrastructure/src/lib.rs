//! Infrastructure layer for wolf
//!
//! Adapters implementing the ports of the application layer: model
//! gateways, tool handlers, the schema converter, configuration loading
//! and the conversation log.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig,
    FilePermissionsConfig, FileProviderConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{OllamaGateway, OpenRouterGateway, build_gateway};
pub use tools::{CommandHandler, FunctionSchemaConverter, default_catalog};
