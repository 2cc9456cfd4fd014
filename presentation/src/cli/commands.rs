//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use wolf_domain::{Provider, TrustLevel};

/// CLI arguments for wolf
#[derive(Parser, Debug)]
#[command(name = "wolf")]
#[command(author, version, about = "Command-line assistant that can work with files and run commands")]
#[command(long_about = r#"
Wolf sends your prompt to a local model and lets it call tools (file
operations, shell commands, system info) until it has an answer.

Every tool call is gated by the trust level:
  --safe    only read-only tools run, everything else is blocked
  (default) modifying tools ask y/n, destructive ones require typing YES
  --auto    tools run without asking; deny-listed commands still ask

Configuration files are loaded from (in priority order):
1. WOLF_* environment variables (e.g. WOLF_PROVIDER__OLLAMA_MODEL)
2. --config <path>     Explicit config file
3. ./wolf.toml         Project-level config
4. ~/.config/wolf-cli/config.toml   Global config

Example:
  wolf "create a file named test.txt with hello world"
  wolf --image screenshot.png "what's in this image?"
  wolf --auto "list all rust files in the current directory"
  wolf --safe "show me system information"
"#)]
pub struct Cli {
    /// The prompt (words are joined with spaces)
    pub prompt: Vec<String>,

    /// Only allow read-only tools
    #[arg(long, conflicts_with = "auto")]
    pub safe: bool,

    /// Run tools without asking (deny-listed commands still ask)
    #[arg(long)]
    pub auto: bool,

    /// Image to attach to the prompt (can be specified multiple times)
    #[arg(short, long = "image", value_name = "PATH", value_parser = existing_file)]
    pub images: Vec<PathBuf>,

    /// Model provider (overrides config)
    #[arg(long, value_name = "PROVIDER", value_parser = parse_provider)]
    pub provider: Option<Provider>,

    /// Model to use (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum number of model calls (overrides config)
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Trust level forced by `--safe` / `--auto`, if any
    pub fn trust_override(&self) -> Option<TrustLevel> {
        if self.safe {
            Some(TrustLevel::SafeOnly)
        } else if self.auto {
            Some(TrustLevel::Auto)
        } else {
            None
        }
    }

    /// The prompt words joined, or `None` when empty
    pub fn prompt_text(&self) -> Option<String> {
        let text = self.prompt.join(" ");
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Attached images as strings
    pub fn image_paths(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}

fn parse_provider(value: &str) -> Result<Provider, String> {
    value.parse::<Provider>().map_err(|e| e.to_string())
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("image not found: {}", value))
    }
}
