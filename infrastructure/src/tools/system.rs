//! System information tool: get_system_info

use super::command::Shell;
use super::paths::display;
use serde_json::{Map, Value, json};
use tracing::debug;
use wolf_application::ToolFault;
use wolf_domain::{RiskLevel, ToolDefinition};

/// Tool name constant
pub const GET_SYSTEM_INFO: &str = "get_system_info";

pub fn get_system_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_SYSTEM_INFO,
        "Get information about the host: platform, architecture, CPU count, shell and directories",
        RiskLevel::Safe,
    )
    .with_returns("platform, os, arch, cpu.count, shell, hostname, current_dir, home_dir and temp_dir")
}

pub fn get_system_info(_args: &Map<String, Value>) -> Result<Value, ToolFault> {
    debug!(tool = GET_SYSTEM_INFO, "Collecting system info");
    let cpu_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let current_dir = std::env::current_dir()?;

    Ok(json!({
        "platform": platform_name(),
        "os": std::env::consts::OS,
        "family": std::env::consts::FAMILY,
        "arch": std::env::consts::ARCH,
        "cpu": { "count": cpu_count },
        "shell": Shell::detect().name(),
        "hostname": hostname(),
        "current_dir": display(&current_dir),
        "home_dir": dirs::home_dir().map(|p| display(&p)),
        "temp_dir": display(&std::env::temp_dir()),
    }))
}

fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "macos" => "macOS",
        other => other,
    }
}

fn hostname() -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|s| s.trim().to_string())
        })
        .filter(|s| !s.is_empty())
}
