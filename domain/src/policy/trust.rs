//! Process-wide trust level

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How permissive tool execution is for one run.
///
/// Chosen once from CLI flags or configuration and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustLevel {
    /// Only `Safe` tools run; everything else is refused without prompting
    #[serde(alias = "safe_only", alias = "safe")]
    SafeOnly,
    /// Safe tools run, others ask the user first
    #[default]
    Interactive,
    /// Everything runs without prompting, except deny-listed commands
    Auto,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::SafeOnly => "safe-only",
            TrustLevel::Interactive => "interactive",
            TrustLevel::Auto => "auto",
        }
    }
}

impl std::fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrustLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safe-only" | "safe_only" | "safeonly" | "safe" => Ok(TrustLevel::SafeOnly),
            "interactive" => Ok(TrustLevel::Interactive),
            "auto" => Ok(TrustLevel::Auto),
            other => Err(DomainError::InvalidTrustLevel(other.to_string())),
        }
    }
}
