//! Type definitions for the RunAgent use case.

use crate::ports::llm_gateway::GatewayError;
use serde::Serialize;
use thiserror::Error;
use wolf_domain::Message;

/// Errors that end a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunAgentError {
    #[error("LLM error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("No response choices from LLM")]
    EmptyResponse,

    #[error("Max tool iterations ({0}) reached without final answer")]
    MaxIterations(usize),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`RunAgentError`] for exit codes and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunErrorKind {
    Transport,
    EmptyResponse,
    MaxIterations,
    Cancelled,
    Internal,
}

impl RunAgentError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunAgentError::Cancelled)
    }

    pub fn kind(&self) -> RunErrorKind {
        match self {
            RunAgentError::Gateway(_) => RunErrorKind::Transport,
            RunAgentError::EmptyResponse => RunErrorKind::EmptyResponse,
            RunAgentError::MaxIterations(_) => RunErrorKind::MaxIterations,
            RunAgentError::Cancelled => RunErrorKind::Cancelled,
            RunAgentError::Internal(_) => RunErrorKind::Internal,
        }
    }
}

/// Input for the RunAgent use case
#[derive(Debug, Clone, Default)]
pub struct RunAgentInput {
    /// The user's request
    pub prompt: String,
    /// Image file paths attached to the request
    pub images: Vec<String>,
}

impl RunAgentInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

/// Output from the RunAgent use case
///
/// Always carries the full message history, whether the run succeeded or not.
#[derive(Debug, Clone)]
pub struct RunAgentOutput {
    pub ok: bool,
    /// Final answer, when `ok`
    pub text: Option<String>,
    /// Why the run ended, when not `ok`
    pub error: Option<RunAgentError>,
    pub messages: Vec<Message>,
    /// Number of model calls made
    pub iterations: usize,
}

impl RunAgentOutput {
    pub(super) fn success(text: String, messages: Vec<Message>, iterations: usize) -> Self {
        Self {
            ok: true,
            text: Some(text),
            error: None,
            messages,
            iterations,
        }
    }

    pub(super) fn failure(error: RunAgentError, messages: Vec<Message>, iterations: usize) -> Self {
        Self {
            ok: false,
            text: None,
            error: Some(error),
            messages,
            iterations,
        }
    }

    pub fn error_kind(&self) -> Option<RunErrorKind> {
        self.error.as_ref().map(RunAgentError::kind)
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn is_cancelled(&self) -> bool {
        self.error.as_ref().is_some_and(RunAgentError::is_cancelled)
    }
}
