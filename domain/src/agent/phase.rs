//! Phases of the tool-calling loop

use serde::{Deserialize, Serialize};

/// Where a run currently is.
///
/// ```text
/// Init → AwaitModel → ProcessToolCalls → AwaitModel → … → Done
///             │                                 │
///             └──────────────► Failed ◄─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPhase {
    /// Building the initial conversation
    Init,
    /// Waiting for the model to answer
    AwaitModel,
    /// Executing the tool calls of the last answer
    ProcessToolCalls,
    /// Final answer received
    Done,
    /// Run ended with an error
    Failed,
}

impl LoopPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopPhase::Init => "init",
            LoopPhase::AwaitModel => "await_model",
            LoopPhase::ProcessToolCalls => "process_tool_calls",
            LoopPhase::Done => "done",
            LoopPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopPhase::Done | LoopPhase::Failed)
    }

    /// Whether the loop may move from `self` to `next`
    pub fn can_transition_to(&self, next: LoopPhase) -> bool {
        use LoopPhase::*;
        matches!(
            (self, next),
            (Init, AwaitModel)
                | (Init, Failed)
                | (AwaitModel, ProcessToolCalls)
                | (AwaitModel, Done)
                | (AwaitModel, Failed)
                | (ProcessToolCalls, AwaitModel)
                | (ProcessToolCalls, Failed)
        )
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(LoopPhase::Init.can_transition_to(LoopPhase::AwaitModel));
        assert!(LoopPhase::AwaitModel.can_transition_to(LoopPhase::ProcessToolCalls));
        assert!(LoopPhase::ProcessToolCalls.can_transition_to(LoopPhase::AwaitModel));
        assert!(LoopPhase::AwaitModel.can_transition_to(LoopPhase::Done));
    }

    #[test]
    fn test_terminal_phases_are_final() {
        for next in [LoopPhase::Init, LoopPhase::AwaitModel, LoopPhase::Done] {
            assert!(!LoopPhase::Done.can_transition_to(next));
            assert!(!LoopPhase::Failed.can_transition_to(next));
        }
        assert!(LoopPhase::Done.is_terminal());
        assert!(!LoopPhase::ProcessToolCalls.is_terminal());
        // tool results always go back to the model before finishing
        assert!(!LoopPhase::ProcessToolCalls.can_transition_to(LoopPhase::Done));
    }
}
