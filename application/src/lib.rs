//! Application layer for wolf
//!
//! Use cases, port definitions, the tool catalog and execution parameters.
//! It depends only on the domain layer.

pub mod catalog;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use catalog::{ToolCatalog, ToolCatalogBuilder, ToolCategory, ToolEntry};
pub use config::ExecutionParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    confirmation::{
        ApproveAllConfirmation, ConfirmationError, ConfirmationPort, ConfirmationRequest,
        DenyAllConfirmation,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
    tool_executor::ToolExecutorPort,
    tool_handler::{FnHandler, ToolFault, ToolHandler, require_str},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::execute_tool::{ToolExecutor, USER_DENIED_MESSAGE};
pub use use_cases::run_agent::{
    RunAgentError, RunAgentInput, RunAgentOutput, RunAgentUseCase, RunErrorKind,
};
