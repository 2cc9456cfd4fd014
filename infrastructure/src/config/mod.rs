//! Configuration file loading for wolf
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `WOLF_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./wolf.toml` or `./.wolf.toml`
//! 4. Global: `$XDG_CONFIG_HOME/wolf-cli/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAgentConfig, FileConfig, FileLoggingConfig, FilePermissionsConfig, FileProviderConfig,
};
pub use loader::{ConfigError, ConfigLoader};
