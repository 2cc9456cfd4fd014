//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Invalid command pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid trust level: {0} (expected safe-only, interactive or auto)")]
    InvalidTrustLevel(String),

    #[error("Invalid risk level: {0} (expected safe, modifying or destructive)")]
    InvalidRiskLevel(String),

    #[error("Unknown provider: {0} (expected ollama or openrouter)")]
    UnknownProvider(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::DuplicateTool("read_file".to_string()).is_cancelled());
        assert!(!DomainError::InvalidTrustLevel("yolo".to_string()).is_cancelled());
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = DomainError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(error.to_string().contains("'('"));
        assert!(error.to_string().contains("unclosed group"));
    }
}
