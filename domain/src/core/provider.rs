//! Model provider value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Backend that serves chat completions.
///
/// Only Ollama is implemented end to end; OpenRouter is reserved and
/// answers every request with an "unsupported" error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Ollama,
    OpenRouter,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openrouter" | "open-router" => Ok(Provider::OpenRouter),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}
