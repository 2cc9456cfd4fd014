//! Permission configuration from TOML (`[permissions]` section)

use serde::{Deserialize, Serialize};
use wolf_domain::{CommandRules, ConfigIssue, ConfigIssueCode, DomainError, TrustLevel};

/// Raw permission configuration from TOML
///
/// # Example
///
/// ```toml
/// [permissions]
/// default_trust_level = "interactive"   # "safe-only", "interactive", "auto"
/// custom_allowlist = ["^cargo\\s+test"]
/// custom_denylist = ["^shutdown"]
/// confirmation_timeout_sec = 60         # omit to wait forever
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePermissionsConfig {
    pub default_trust_level: String,
    /// Extra allow-list regexes, checked after the built-in ones
    pub custom_allowlist: Vec<String>,
    /// Extra deny-list regexes, checked after the built-in ones
    pub custom_denylist: Vec<String>,
    /// Seconds to wait for a confirmation answer before denying
    pub confirmation_timeout_sec: Option<u64>,
}

impl Default for FilePermissionsConfig {
    fn default() -> Self {
        Self {
            default_trust_level: TrustLevel::default().to_string(),
            custom_allowlist: Vec::new(),
            custom_denylist: Vec::new(),
            confirmation_timeout_sec: None,
        }
    }
}

impl FilePermissionsConfig {
    /// Parse the trust level, falling back to interactive with a warning.
    pub fn parse_trust_level(&self) -> (TrustLevel, Vec<ConfigIssue>) {
        match self.default_trust_level.parse::<TrustLevel>() {
            Ok(level) => (level, vec![]),
            Err(_) => (
                TrustLevel::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidTrustLevel,
                    format!(
                        "permissions.default_trust_level: unknown value '{}', falling back to 'interactive'",
                        self.default_trust_level
                    ),
                )],
            ),
        }
    }

    /// Compile platform defaults plus the custom patterns
    pub fn command_rules(&self) -> Result<CommandRules, DomainError> {
        CommandRules::with_custom(&self.custom_denylist, &self.custom_allowlist)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_trust_level().1;

        let lists = [
            ("custom_denylist", &self.custom_denylist),
            ("custom_allowlist", &self.custom_allowlist),
        ];
        for (field, patterns) in lists {
            for pattern in patterns {
                if let Err(e) = regex::Regex::new(pattern) {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidPattern,
                        format!("permissions.{}: invalid pattern '{}': {}", field, pattern, e),
                    ));
                }
            }
        }

        if self.confirmation_timeout_sec == Some(0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "permissions.confirmation_timeout_sec is 0; every confirmation would be denied",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolf_domain::CommandCheck;

    #[test]
    fn test_parse_trust_level_variants() {
        let mut config = FilePermissionsConfig::default();
        assert_eq!(config.parse_trust_level().0, TrustLevel::Interactive);

        config.default_trust_level = "safe_only".to_string();
        assert_eq!(config.parse_trust_level().0, TrustLevel::SafeOnly);

        config.default_trust_level = "yolo".to_string();
        let (level, issues) = config.parse_trust_level();
        assert_eq!(level, TrustLevel::Interactive);
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidTrustLevel);
    }

    #[test]
    fn test_custom_rules_are_appended() {
        let config = FilePermissionsConfig {
            custom_denylist: vec!["^shutdown".to_string()],
            ..Default::default()
        };
        let rules = config.command_rules().unwrap();
        assert!(matches!(rules.check("shutdown now"), CommandCheck::Denied(_)));
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let config = FilePermissionsConfig {
            custom_allowlist: vec!["(unclosed".to_string()],
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidPattern);
        assert!(config.command_rules().is_err());
    }
}
