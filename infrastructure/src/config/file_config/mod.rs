//! Raw TOML configuration data types
//!
//! These structs mirror the config file. Values that need parsing stay as
//! strings here and are parsed with a fallback, so a typo produces a
//! warning instead of a hard failure.

mod agent;
mod logging;
mod permissions;
mod provider;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use permissions::FilePermissionsConfig;
pub use provider::FileProviderConfig;

use serde::{Deserialize, Serialize};
use wolf_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model provider settings
    pub provider: FileProviderConfig,
    /// Loop settings
    pub agent: FileAgentConfig,
    /// Trust level and command rules
    pub permissions: FilePermissionsConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.provider.validate();
        issues.extend(self.permissions.validate());
        issues
    }

    /// Render as TOML for `--show-config`
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "ollama"
ollama_model = "llama3.1"
timeout_sec = 30

[agent]
max_tool_iterations = 10

[permissions]
default_trust_level = "auto"
custom_denylist = ["^shutdown"]

[logging]
enabled = false
conversation_log = "run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.ollama_model, "llama3.1");
        assert_eq!(config.provider.timeout_sec, 30);
        assert_eq!(config.agent.max_tool_iterations, 10);
        assert_eq!(config.permissions.default_trust_level, "auto");
        assert_eq!(config.permissions.custom_denylist, vec!["^shutdown"]);
        assert!(!config.logging.enabled);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("run.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[agent]\nmax_tool_iterations = 2\n").unwrap();
        assert_eq!(config.agent.max_tool_iterations, 2);
        // Defaults should apply
        assert_eq!(config.provider, FileProviderConfig::default());
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_sections() {
        let mut config = FileConfig::default();
        config.provider.kind = "nope".to_string();
        config.permissions.default_trust_level = "nope".to_string();
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = FileConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[provider]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, FileConfig::default());
    }
}
