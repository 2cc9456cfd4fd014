//! Risk & trust policy: decides how a tool call is gated
//!
//! A pure function of the trust level, the tool's declared risk and, for the
//! generic command tool, the command text. No I/O happens here.
//!
//! Decision order:
//!
//! 1. Command tool only: deny list first, then allow list (advisory)
//! 2. `SafeOnly` + non-safe tool → [`PolicyDecision::Block`]
//! 3. Deny-list match → strong confirmation, at every other trust level
//! 4. `Auto` → allow without prompting
//! 5. `Interactive` → by risk: safe allows, modifying asks, destructive asks strongly

use super::confirmation::ConfirmationMode;
use super::rules::{CommandCheck, CommandRules};
use super::trust::TrustLevel;
use crate::tool::entities::RiskLevel;
use serde_json::{Map, Value};

/// Default name of the generic "run an arbitrary command" tool
pub const DEFAULT_COMMAND_TOOL: &str = "execute_command";

/// Argument holding the command line for the command tool
pub const COMMAND_ARGUMENT: &str = "command";

/// How a single tool call must be gated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    /// Allowed without prompting, with a note worth logging
    AllowWithNotice(String),
    Confirm {
        mode: ConfirmationMode,
        reason: Option<String>,
    },
    Block(String),
}

impl PolicyDecision {
    pub fn confirmation_mode(&self) -> ConfirmationMode {
        match self {
            PolicyDecision::Allow | PolicyDecision::AllowWithNotice(_) => ConfirmationMode::None,
            PolicyDecision::Confirm { mode, .. } => *mode,
            PolicyDecision::Block(_) => ConfirmationMode::Blocked,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            PolicyDecision::Allow => None,
            PolicyDecision::AllowWithNotice(reason) | PolicyDecision::Block(reason) => {
                Some(reason)
            }
            PolicyDecision::Confirm { reason, .. } => reason.as_deref(),
        }
    }
}

/// Trust level plus command rules for one run.
///
/// Stateless after construction and safe to share between runs.
#[derive(Debug, Clone)]
pub struct RiskPolicy {
    trust_level: TrustLevel,
    rules: CommandRules,
    command_tool: String,
}

impl RiskPolicy {
    pub fn new(trust_level: TrustLevel, rules: CommandRules) -> Self {
        Self {
            trust_level,
            rules,
            command_tool: DEFAULT_COMMAND_TOOL.to_string(),
        }
    }

    pub fn with_command_tool(mut self, name: impl Into<String>) -> Self {
        self.command_tool = name.into();
        self
    }

    pub fn trust_level(&self) -> TrustLevel {
        self.trust_level
    }

    pub fn rules(&self) -> &CommandRules {
        &self.rules
    }

    /// Classify the command text if `tool` is the command tool
    pub fn check_command(&self, tool: &str, arguments: &Map<String, Value>) -> CommandCheck {
        if tool != self.command_tool {
            return CommandCheck::Unlisted;
        }
        arguments
            .get(COMMAND_ARGUMENT)
            .and_then(Value::as_str)
            .map(|command| self.rules.check(command))
            .unwrap_or(CommandCheck::Unlisted)
    }

    /// Gate one call.
    ///
    /// `SafeOnly` never offers the typed-YES override: a deny-listed command
    /// is blocked there like any other non-safe call.
    pub fn evaluate(
        &self,
        tool: &str,
        risk: RiskLevel,
        arguments: &Map<String, Value>,
    ) -> PolicyDecision {
        let check = self.check_command(tool, arguments);

        if self.trust_level == TrustLevel::SafeOnly && !risk.is_safe() {
            return PolicyDecision::Block(format!("Tool '{}' is blocked in safe-only mode", tool));
        }

        if let CommandCheck::Denied(pattern) = &check {
            return PolicyDecision::Confirm {
                mode: ConfirmationMode::Strong,
                reason: Some(format!("Command matches deny-list pattern: {}", pattern)),
            };
        }

        let allow_note = match &check {
            CommandCheck::Allowed(pattern) => {
                Some(format!("Command matches allow-list pattern: {}", pattern))
            }
            _ => None,
        };

        match self.trust_level {
            TrustLevel::Auto => match allow_note {
                Some(note) => PolicyDecision::AllowWithNotice(note),
                None if !risk.is_safe() => {
                    PolicyDecision::AllowWithNotice(format!("Auto-approved {} operation", risk))
                }
                None => PolicyDecision::Allow,
            },
            // SafeOnly only reaches this point for safe tools
            TrustLevel::SafeOnly | TrustLevel::Interactive => match risk {
                RiskLevel::Safe => PolicyDecision::Allow,
                RiskLevel::Modifying => PolicyDecision::Confirm {
                    mode: ConfirmationMode::Simple,
                    reason: allow_note,
                },
                RiskLevel::Destructive => PolicyDecision::Confirm {
                    mode: ConfirmationMode::Strong,
                    reason: allow_note,
                },
            },
        }
    }
}
