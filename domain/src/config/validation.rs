//! Structured configuration issues.
//!
//! Config parsing never fails hard on a bad value: it falls back to a
//! default and records a [`ConfigIssue`] so the caller can warn about it.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a fallback value is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `permissions.default_trust_level` is not a known trust level
    InvalidTrustLevel,
    /// `provider.kind` is not a known provider
    UnknownProvider,
    /// A custom allow/deny pattern does not compile
    InvalidPattern,
    /// A timeout of zero seconds
    ZeroTimeout,
    /// An empty model name
    EmptyModelName,
    /// The selected provider is a stub
    ProviderNotImplemented,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
