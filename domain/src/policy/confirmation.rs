//! Confirmation protocol: modes, outcomes and response interpretation
//!
//! Rendering and reading input is an adapter concern. This module only
//! decides what a typed answer means, so every adapter agrees on it.

use crate::core::string::truncate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Phrase the user must type to approve a destructive operation
pub const STRONG_CONFIRMATION_PHRASE: &str = "YES";

/// Parameter values longer than this are shortened in prompts
pub const PARAM_DISPLAY_LIMIT: usize = 100;

/// Warning shown before a strong confirmation
pub const DESTRUCTIVE_WARNING: &str = "This action is DESTRUCTIVE and cannot be undone!";

/// Kind of human gate required before a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationMode {
    /// Pass through without asking
    None,
    /// Yes/no question, defaulting to yes
    Simple,
    /// The user must type the confirmation phrase
    Strong,
    /// Refused outright, never prompts
    Blocked,
}

impl ConfirmationMode {
    pub fn needs_prompt(&self) -> bool {
        matches!(self, ConfirmationMode::Simple | ConfirmationMode::Strong)
    }
}

/// Result of one confirmation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationOutcome {
    Allowed,
    Denied,
    Blocked,
}

impl ConfirmationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ConfirmationOutcome::Allowed)
    }
}

/// Interpret what the user typed for a given mode.
///
/// - `Simple`: anything but an explicit `n`/`no` approves, including empty input
/// - `Strong`: only the confirmation phrase approves (case-insensitive)
pub fn interpret_response(mode: ConfirmationMode, input: &str) -> ConfirmationOutcome {
    let answer = input.trim();
    match mode {
        ConfirmationMode::None => ConfirmationOutcome::Allowed,
        ConfirmationMode::Blocked => ConfirmationOutcome::Blocked,
        ConfirmationMode::Simple => {
            let lowered = answer.to_lowercase();
            if lowered == "n" || lowered == "no" {
                ConfirmationOutcome::Denied
            } else {
                ConfirmationOutcome::Allowed
            }
        }
        ConfirmationMode::Strong => {
            if answer.eq_ignore_ascii_case(STRONG_CONFIRMATION_PHRASE) {
                ConfirmationOutcome::Allowed
            } else {
                ConfirmationOutcome::Denied
            }
        }
    }
}

/// Parameters formatted for a prompt, in argument order.
///
/// Strings are shown bare, other values as JSON.
pub fn display_parameters(arguments: &Map<String, Value>) -> Vec<(String, String)> {
    arguments
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), truncate(&text, PARAM_DISPLAY_LIMIT))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_defaults_to_yes() {
        assert_eq!(interpret_response(ConfirmationMode::Simple, ""), ConfirmationOutcome::Allowed);
        assert_eq!(interpret_response(ConfirmationMode::Simple, "y\n"), ConfirmationOutcome::Allowed);
        assert_eq!(interpret_response(ConfirmationMode::Simple, "maybe"), ConfirmationOutcome::Allowed);
    }

    #[test]
    fn test_simple_explicit_negative() {
        for input in ["n", "N", "no", " NO \n"] {
            assert_eq!(
                interpret_response(ConfirmationMode::Simple, input),
                ConfirmationOutcome::Denied
            );
        }
    }

    #[test]
    fn test_strong_requires_phrase() {
        assert_eq!(interpret_response(ConfirmationMode::Strong, "YES"), ConfirmationOutcome::Allowed);
        assert_eq!(interpret_response(ConfirmationMode::Strong, "yes\n"), ConfirmationOutcome::Allowed);
        for input in ["", "y", "Y", "ok", "YES!", "yes please"] {
            assert_eq!(
                interpret_response(ConfirmationMode::Strong, input),
                ConfirmationOutcome::Denied,
                "input {input:?} must deny"
            );
        }
    }

    #[test]
    fn test_blocked_and_none() {
        assert_eq!(interpret_response(ConfirmationMode::Blocked, "YES"), ConfirmationOutcome::Blocked);
        assert_eq!(interpret_response(ConfirmationMode::None, "no"), ConfirmationOutcome::Allowed);
        assert!(!ConfirmationMode::Blocked.needs_prompt());
        assert!(ConfirmationMode::Strong.needs_prompt());
    }

    #[test]
    fn test_display_parameters_truncates() {
        let long = "x".repeat(150);
        let args = json!({"content": long, "recursive": true}).as_object().cloned().unwrap();
        let shown = display_parameters(&args);

        let content = shown.iter().find(|(k, _)| k == "content").unwrap();
        assert_eq!(content.1.chars().count(), PARAM_DISPLAY_LIMIT);
        assert!(content.1.ends_with("..."));

        let recursive = shown.iter().find(|(k, _)| k == "recursive").unwrap();
        assert_eq!(recursive.1, "true");
    }
}
