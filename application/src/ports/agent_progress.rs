//! Agent execution progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to show what the loop is doing while it runs.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use wolf_domain::{LoopPhase, ToolExecution};

/// Progress notifier for the tool-calling loop.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called when the loop moves to a new phase
    fn on_phase_change(&self, _phase: LoopPhase) {}

    /// Called before each model call (1-based iteration)
    fn on_iteration(&self, _iteration: usize, _max_iterations: usize) {}

    /// Called when the model asked for tools, with the number of calls
    fn on_tool_calls_requested(&self, _count: usize) {}

    /// Called before a tool runs, with its arguments as JSON text
    fn on_tool_call(&self, _tool_name: &str, _args: &str) {}

    /// Called with the envelope of a finished tool call
    fn on_tool_result(&self, _tool_name: &str, _execution: &ToolExecution) {}

    /// Called when a requested call was dropped without running
    fn on_tool_skipped(&self, _reason: &str) {}

    /// Called once with the final answer
    fn on_final_answer(&self, _text: &str) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
