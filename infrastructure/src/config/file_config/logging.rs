//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// enabled = true
/// log_file = "wolf-cli.log"
/// conversation_log = "conversation.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostics to `log_file`
    pub enabled: bool,
    pub log_file: PathBuf,
    /// JSONL transcript of each run; disabled when absent
    pub conversation_log: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("wolf-cli.log"),
            conversation_log: None,
        }
    }
}
