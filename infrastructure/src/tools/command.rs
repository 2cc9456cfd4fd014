//! Command execution tool: execute_command
//!
//! Runs one command line through the platform shell. Allow/deny checks
//! happen in the risk policy before the handler is reached.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};
use wolf_application::{ToolFault, ToolHandler, require_str};
use wolf_domain::policy::normalize_command;
use wolf_domain::{ParamType, RiskLevel, ToolDefinition, ToolParameter};

/// Tool name constant
pub const EXECUTE_COMMAND: &str = "execute_command";

/// Default timeout for command execution
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Upper bound accepted for `timeout_secs`
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Maximum captured bytes per stream (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub fn execute_command_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXECUTE_COMMAND,
        "Execute a shell command and return its stdout, stderr and exit code",
        RiskLevel::Modifying,
    )
    .with_parameter(
        ToolParameter::new("command", "The command line to execute", true)
            .with_length(Some(1), None),
    )
    .with_parameter(
        ToolParameter::new("timeout_secs", "Timeout in seconds (default: 120)", false)
            .with_type(ParamType::Integer)
            .with_range(1.0, MAX_TIMEOUT_SECS as f64)
            .with_default(DEFAULT_TIMEOUT_SECS),
    )
    .with_returns("command, stdout, stderr, exit_code, success and shell")
}

/// Shell used to interpret command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: &'static str,
    flags: &'static [&'static str],
    name: &'static str,
}

impl Shell {
    /// Detect the best available shell on this platform
    pub fn detect() -> Self {
        let available = |program: &str| which::which(program).is_ok();
        if cfg!(windows) {
            if available("pwsh") {
                Self::powershell("pwsh")
            } else if available("powershell") {
                Self::powershell("powershell")
            } else {
                Self {
                    program: "cmd",
                    flags: &["/C"],
                    name: "cmd",
                }
            }
        } else if available("bash") {
            Self {
                program: "bash",
                flags: &["-c"],
                name: "Bash",
            }
        } else {
            Self {
                program: "sh",
                flags: &["-c"],
                name: "sh",
            }
        }
    }

    fn powershell(program: &'static str) -> Self {
        Self {
            program,
            flags: &["-NoProfile", "-NonInteractive", "-Command"],
            name: "PowerShell",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.flags).arg(line);
        cmd
    }
}

/// Handler for `execute_command`
pub struct CommandHandler {
    shell: Shell,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            shell: Shell::detect(),
        }
    }

    pub fn with_shell(shell: Shell) -> Self {
        Self { shell }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for CommandHandler {
    async fn call(&self, arguments: &Map<String, Value>) -> Result<Value, ToolFault> {
        let line = normalize_command(require_str(arguments, "command")?);
        if line.is_empty() {
            return Err(ToolFault::InvalidInput("Command is empty".to_string()));
        }
        let timeout_secs = arguments
            .get("timeout_secs")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, MAX_TIMEOUT_SECS);

        info!(tool = EXECUTE_COMMAND, shell = self.shell.name, command = %line, "Running command");

        let child = self
            .shell
            .command(&line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolFault::Failed(format!("{} not available: {}", self.shell.name, e)))?;

        let output =
            match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output())
                .await
            {
                Ok(result) => result?,
                Err(_) => {
                    warn!(command = %line, timeout_secs, "Command timed out");
                    return Err(ToolFault::Timeout(timeout_secs));
                }
            };

        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();
        debug!(exit_code, "Command finished");

        let mut payload = json!({
            "command": line,
            "stdout": capture(&output.stdout),
            "stderr": capture(&output.stderr),
            "exit_code": exit_code,
            "success": success,
            "shell": self.shell.name,
        });
        if !success && let Some(map) = payload.as_object_mut() {
            map.insert(
                "error".to_string(),
                json!(format!("Command exited with code {}", exit_code)),
            );
        }
        Ok(payload)
    }
}

fn capture(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > MAX_OUTPUT_SIZE {
        let mut cut = MAX_OUTPUT_SIZE;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n... (output truncated)");
    }
    text
}
