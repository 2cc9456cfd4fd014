//! Confirmation port for gating tool calls on a human decision.
//!
//! # Architecture
//!
//! - **Port**: [`ConfirmationPort`], defined here in the application layer
//! - **Adapter**: `TerminalConfirmation`, implemented in the presentation layer
//!
//! # Built-in Implementations
//!
//! - [`DenyAllConfirmation`]: refuses every prompt (non-interactive runs)
//! - [`ApproveAllConfirmation`]: accepts every prompt (tests, sandboxes)
//!
//! Whatever the adapter, an error is treated as a refusal by the executor.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use wolf_domain::policy::{ConfirmationMode, ConfirmationOutcome, display_parameters};
use wolf_domain::{RiskLevel, ToolDefinition};

/// Failure while asking the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("No interactive terminal available")]
    NotInteractive,

    #[error("Timed out waiting for confirmation")]
    Timeout,

    #[error("I/O error: {0}")]
    IoError(String),
}

/// Everything an adapter needs to render a confirmation prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    pub tool: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub mode: ConfirmationMode,
    /// Why the policy asks (deny-list match, allow-list note)
    pub reason: Option<String>,
    /// Parameters with long values already shortened
    pub parameters: Vec<(String, String)>,
}

impl ConfirmationRequest {
    pub fn new(
        definition: &ToolDefinition,
        mode: ConfirmationMode,
        reason: Option<String>,
        arguments: &Map<String, Value>,
    ) -> Self {
        Self {
            tool: definition.name.clone(),
            description: definition.description.clone(),
            risk_level: definition.risk_level,
            mode,
            reason,
            parameters: display_parameters(arguments),
        }
    }
}

/// Port for asking a human to approve a tool call.
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    /// Ask for a decision. Only called for `Simple` and `Strong` modes.
    async fn confirm(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<ConfirmationOutcome, ConfirmationError>;

    /// Tell the user a call was refused without asking
    fn notify_blocked(&self, _tool: &str, _reason: &str) {}
}

/// Refuses every confirmation. The fail-closed choice for unattended runs.
pub struct DenyAllConfirmation;

#[async_trait]
impl ConfirmationPort for DenyAllConfirmation {
    async fn confirm(
        &self,
        _request: &ConfirmationRequest,
    ) -> Result<ConfirmationOutcome, ConfirmationError> {
        Ok(ConfirmationOutcome::Denied)
    }
}

/// Accepts every confirmation, including strong ones.
///
/// # Warning
///
/// Deny-listed commands run unattended with this adapter. Only use it in
/// tests or a disposable sandbox.
pub struct ApproveAllConfirmation;

#[async_trait]
impl ConfirmationPort for ApproveAllConfirmation {
    async fn confirm(
        &self,
        _request: &ConfirmationRequest,
    ) -> Result<ConfirmationOutcome, ConfirmationError> {
        Ok(ConfirmationOutcome::Allowed)
    }
}
