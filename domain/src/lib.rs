//! Domain layer for wolf
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named operation the model may request. Each one declares a
//! parameter schema and a [`RiskLevel`] (`Safe`, `Modifying`, `Destructive`).
//!
//! ## Trust and risk
//!
//! The [`RiskPolicy`] combines the run's [`TrustLevel`] with the tool's risk
//! and, for shell commands, deny/allow patterns, to decide whether a call
//! runs, needs confirmation, or is refused.
//!
//! ## Conversation
//!
//! An append-only [`Conversation`] of system, user, assistant and tool
//! messages drives each model turn.

pub mod agent;
pub mod config;
pub mod core;
pub mod policy;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::LoopPhase;
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, provider::Provider, string::truncate};
pub use policy::{
    CommandCheck, CommandRules, ConfirmationMode, ConfirmationOutcome, PolicyDecision, RiskPolicy,
    TrustLevel,
};
pub use session::{AssistantMessage, ChatResponse, Choice, Conversation, Message, Role};
pub use tool::{
    DefaultToolValidator, ErrorKind, ParamType, RiskLevel, ToolArguments, ToolCall,
    ToolDefinition, ToolError, ToolExecution, ToolParameter, ToolValidator,
};
