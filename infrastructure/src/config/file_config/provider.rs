//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use wolf_domain::{ConfigIssue, ConfigIssueCode, Provider};

/// Raw provider configuration from TOML
///
/// # Example
///
/// ```toml
/// [provider]
/// kind = "ollama"                          # "ollama" or "openrouter"
/// ollama_model = "granite3.1-moe:3b"
/// vision_model = "qwen3-vl:8b"             # used when images are attached
/// ollama_base_url = "http://localhost:11434"
/// openrouter_model = "openrouter/auto"
/// openrouter_api_key = ""
/// timeout_sec = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider name: "ollama" or "openrouter"
    pub kind: String,
    pub ollama_model: String,
    /// Model used instead of `ollama_model` when the prompt carries images
    pub vision_model: Option<String>,
    pub ollama_base_url: String,
    pub openrouter_model: String,
    pub openrouter_api_key: Option<String>,
    /// Per-request timeout for model calls
    pub timeout_sec: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: "ollama".to_string(),
            ollama_model: "granite3.1-moe:3b".to_string(),
            vision_model: Some("qwen3-vl:8b".to_string()),
            ollama_base_url: "http://localhost:11434".to_string(),
            openrouter_model: "openrouter/auto".to_string(),
            openrouter_api_key: None,
            timeout_sec: 120,
        }
    }
}

impl FileProviderConfig {
    /// Parse `kind`, falling back to Ollama with a warning.
    pub fn parse_kind(&self) -> (Provider, Vec<ConfigIssue>) {
        match self.kind.parse::<Provider>() {
            Ok(provider) => (provider, vec![]),
            Err(_) => (
                Provider::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "provider.kind: unknown value '{}', falling back to 'ollama'",
                        self.kind
                    ),
                )],
            ),
        }
    }

    /// Model configured for `provider`
    pub fn model_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Ollama => &self.ollama_model,
            Provider::OpenRouter => &self.openrouter_model,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (provider, mut issues) = self.parse_kind();

        if self.model_for(provider).trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                format!("provider: no model configured for '{}'", provider),
            ));
        }
        if self.timeout_sec == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "provider.timeout_sec is 0; requests would fail immediately, using 1 second",
            ));
        }
        if provider == Provider::OpenRouter {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ProviderNotImplemented,
                "provider.kind = 'openrouter' is not implemented yet; model calls will fail",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        let mut config = FileProviderConfig::default();
        assert_eq!(config.parse_kind().0, Provider::Ollama);

        config.kind = "OpenRouter".to_string();
        assert_eq!(config.parse_kind().0, Provider::OpenRouter);

        config.kind = "claude".to_string();
        let (provider, issues) = config.parse_kind();
        assert_eq!(provider, Provider::Ollama);
        assert_eq!(issues[0].code, ConfigIssueCode::UnknownProvider);
    }

    #[test]
    fn test_validate_flags_problems() {
        let config = FileProviderConfig {
            ollama_model: " ".to_string(),
            timeout_sec: 0,
            ..Default::default()
        };
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();
        assert!(codes.contains(&ConfigIssueCode::EmptyModelName));
        assert!(codes.contains(&ConfigIssueCode::ZeroTimeout));
    }

    #[test]
    fn test_openrouter_is_flagged_as_stub() {
        let config = FileProviderConfig {
            kind: "openrouter".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::ProviderNotImplemented)
        );
    }
}
