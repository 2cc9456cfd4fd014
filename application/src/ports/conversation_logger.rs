//! Port for structured conversation logging.
//!
//! Records the transcript of a run (prompt, model answers, tool calls and
//! their results) in a machine-readable form, separate from `tracing`
//! diagnostics.
//!
//! Event types written by the orchestrator:
//!
//! | Type | Payload |
//! |------|---------|
//! | `user_prompt` | `prompt`, `images`, `model` |
//! | `llm_response` | `iteration`, `content`, `finish_reason`, `tool_calls` |
//! | `tool_call` | `tool`, `id`, `arguments` |
//! | `tool_result` | the result envelope |
//! | `run_finished` | `ok`, `error`, `iterations`, `message_count` |

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "llm_response", "tool_call").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write errors so logging never interrupts a run.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
