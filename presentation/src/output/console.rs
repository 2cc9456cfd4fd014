//! Console output for runs, tool listings and configuration reports

use colored::Colorize;
use wolf_application::ToolCatalog;
use wolf_domain::{ConfigIssue, Provider, RiskLevel, Severity, truncate};

/// Descriptions in the tool table are cut to this many characters
pub const DESCRIPTION_WIDTH: usize = 80;

/// Formats wolf output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Run header, e.g. `[Wolf CLI] - Provider: ollama, Model: llama3.1`
    pub fn header(provider: Provider, model: &str) -> String {
        format!(
            "{} - Provider: {}, Model: {}",
            "[Wolf CLI]".cyan().bold(),
            provider,
            model.bold()
        )
    }

    /// The final answer block
    pub fn answer(text: Option<&str>) -> String {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => format!("\n{}\n{}\n", "Assistant:".green().bold(), text),
            None => format!("\n{}\n", "Assistant provided no text response.".dimmed()),
        }
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    pub fn interrupted() -> String {
        format!("\n{}", "Interrupted by user".yellow())
    }

    /// Configuration issues, one per line, errors before warnings
    pub fn config_issues(issues: &[ConfigIssue]) -> String {
        let mut sorted: Vec<&ConfigIssue> = issues.iter().collect();
        sorted.sort_by_key(|i| i.severity != Severity::Error);
        sorted
            .into_iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "config error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "config warning:".yellow(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Table of registered tools grouped by category
    pub fn tools_table(catalog: &ToolCatalog) -> String {
        let name_width = catalog
            .names()
            .map(|n| n.chars().count())
            .chain(std::iter::once("Tool Name".len()))
            .max()
            .unwrap_or(0);
        let rule = "─".repeat(name_width + DESCRIPTION_WIDTH + 16);

        let mut out = String::new();
        out.push_str(&format!("{}\n", "Wolf CLI - Available Tools".cyan().bold()));
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!(
            "{:<nw$}  {:<dw$}  {}\n",
            "Tool Name",
            "Description",
            "Risk Level",
            nw = name_width,
            dw = DESCRIPTION_WIDTH
        ));
        out.push_str(&format!("{}\n", rule));

        for (category, definitions) in catalog.by_category() {
            out.push_str(&format!("{}\n", category.display_name().bold()));
            for def in definitions {
                out.push_str(&format!(
                    "{:<nw$}  {:<dw$}  {}\n",
                    def.name,
                    truncate(&def.description, DESCRIPTION_WIDTH),
                    Self::risk(def.risk_level),
                    nw = name_width,
                    dw = DESCRIPTION_WIDTH
                ));
            }
        }

        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("Total tools: {}\n", catalog.len()));
        out
    }

    fn risk(level: RiskLevel) -> String {
        match level {
            RiskLevel::Safe => level.as_str().green().to_string(),
            RiskLevel::Modifying => level.as_str().yellow().to_string(),
            RiskLevel::Destructive => level.as_str().red().bold().to_string(),
        }
    }

    /// Shown when wolf is started without a prompt
    pub fn usage() -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n\n", "Usage: wolf [OPTIONS] <PROMPT>...".bold()));
        out.push_str("Examples:\n");
        for example in [
            r#"wolf "create a file named test.txt with hello world""#,
            r#"wolf --image screenshot.png "what's in this image?""#,
            r#"wolf --auto "list all rust files in the current directory""#,
            r#"wolf --safe "show me system information""#,
            "wolf --list-tools",
        ] {
            out.push_str(&format!("  {}\n", example));
        }
        out.push_str("\nRun 'wolf --help' for all options.\n");
        out
    }
}
