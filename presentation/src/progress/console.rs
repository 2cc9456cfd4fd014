//! Progress reporting for the tool-calling loop

use colored::Colorize;
use wolf_application::AgentProgressNotifier;
use wolf_domain::{LoopPhase, ToolExecution, truncate};

/// How much the reporter prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressLevel {
    /// Nothing
    Quiet,
    /// Tool calls and their outcome
    #[default]
    Normal,
    /// Also iterations, phases and arguments
    Verbose,
}

/// Reports loop progress on stderr, keeping stdout for the answer
pub struct ConsoleProgress {
    level: ProgressLevel,
}

impl ConsoleProgress {
    pub fn new(level: ProgressLevel) -> Self {
        Self { level }
    }

    fn shows(&self, level: ProgressLevel) -> bool {
        match self.level {
            ProgressLevel::Quiet => false,
            ProgressLevel::Normal => level == ProgressLevel::Normal,
            ProgressLevel::Verbose => true,
        }
    }

    fn tool_call_line(&self, tool_name: &str, args: &str) -> String {
        if self.level == ProgressLevel::Verbose {
            format!("{} {} {}", "→".blue(), tool_name.cyan(), truncate(args, 80).dimmed())
        } else {
            format!("{} {}", "→".blue(), tool_name.cyan())
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new(ProgressLevel::default())
    }
}

/// One-line outcome of a tool call
pub fn tool_result_line(tool_name: &str, execution: &ToolExecution) -> String {
    if execution.ok {
        format!("{} {} {}", "✓".green(), tool_name.green(), "OK".dimmed())
    } else {
        let error = execution.error.as_deref().unwrap_or("failed");
        let kind = execution
            .error_kind
            .map(|k| format!("[{}] ", k))
            .unwrap_or_default();
        format!("{} {} {}{}", "✗".red(), tool_name.red(), kind.dimmed(), truncate(error, 120))
    }
}

impl AgentProgressNotifier for ConsoleProgress {
    fn on_phase_change(&self, phase: LoopPhase) {
        if self.shows(ProgressLevel::Verbose) {
            eprintln!("{}", format!("[{}]", phase.as_str()).dimmed());
        }
    }

    fn on_iteration(&self, iteration: usize, max_iterations: usize) {
        if self.shows(ProgressLevel::Verbose) {
            eprintln!(
                "{} {}",
                "●".cyan(),
                format!("Model call {}/{}", iteration, max_iterations).dimmed()
            );
        }
    }

    fn on_tool_calls_requested(&self, count: usize) {
        if self.shows(ProgressLevel::Verbose) {
            eprintln!("  {} tool call(s) requested", count);
        }
    }

    fn on_tool_call(&self, tool_name: &str, args: &str) {
        if self.level != ProgressLevel::Quiet {
            eprintln!("{}", self.tool_call_line(tool_name, args));
        }
    }

    fn on_tool_result(&self, tool_name: &str, execution: &ToolExecution) {
        if self.level != ProgressLevel::Quiet {
            eprintln!("{}", tool_result_line(tool_name, execution));
        }
    }

    fn on_tool_skipped(&self, reason: &str) {
        if self.shows(ProgressLevel::Normal) {
            eprintln!("{} {}", "⚠".yellow(), reason.yellow());
        }
    }
}
