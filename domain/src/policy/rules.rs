//! Allow/deny pattern lists for free-form shell commands

use crate::core::error::DomainError;
use regex::{Regex, RegexBuilder};

/// Commands that always need a typed confirmation (Linux/Unix shells)
pub const UNIX_DENY_PATTERNS: &[&str] = &[
    r"\brm\s+.*-rf?\s+/",
    r"\brm\s+.*-rf?.*\*",
    r"\bdd\s+if=.*of=/dev/",
    r"\bmkfs\b",
    r"\b(fdisk|parted|gparted)\b",
    r"\bchmod\s+777\s+-R\s+/",
    r":\(\)\{\s*:\|:&\s*\};:",
    r"\bcurl.*\|\s*(bash|sh)",
    r"\bwget.*\|\s*(bash|sh)",
    r"\b(shutdown|reboot|init\s+[06])\b",
];

/// Read-only commands recognized as pre-vetted (Linux/Unix shells)
pub const UNIX_ALLOW_PATTERNS: &[&str] = &[
    r"^(ls|dir)\b",
    r"^(cat|less|more|head|tail)\b",
    r"^(grep|egrep|fgrep)\b",
    r"^(find|locate)\b",
    r"^(pwd|cd)\b",
    r"^(echo|printf)\b",
    r"^(ps|top|htop)\b",
    r"^(df|du)\b",
    r"^(uname|hostname)\b",
    r"^(which|whereis)\b",
];

/// Commands that always need a typed confirmation (PowerShell / cmd)
pub const WINDOWS_DENY_PATTERNS: &[&str] = &[
    r"\b(remove-item|ri)\b.*-recurse",
    r"\b(del|erase|rd|rmdir)\b.*(/s|/q)",
    r"\b(format-?volume|diskpart|bcdedit|cipher\s+/w:|takeown|icacls)\b",
    r"\b(invoke-expression|iex)\b",
    r"(invoke-webrequest|curl|wget).*\|.*(iex|invoke-expression)",
    r"\breg(?:\.exe)?\s+delete\b",
    r"\b(get-credential|convertto-securestring)\b.*-asplaintext",
];

/// Read-only commands recognized as pre-vetted (PowerShell / cmd)
pub const WINDOWS_ALLOW_PATTERNS: &[&str] = &[
    r"^get-process\b",
    r"^get-service\b",
    r"^get-help\b",
    r"^(get-childitem|gci|dir|ls)\b",
    r"^(get-content|gc|cat|type)\b",
    r"^(select-string|findstr|grep)\b",
    r"^(get-location|pwd|gl)\b",
    r"^(get-item|gi)\b",
    r"^(where-object|where|\?)\b",
];

/// Which list, if any, a command matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandCheck {
    /// Matched a deny pattern (the pattern text)
    Denied(String),
    /// Matched an allow pattern (the pattern text)
    Allowed(String),
    Unlisted,
}

/// Compiled deny and allow lists, matched case-insensitively.
///
/// Order matters: the first matching pattern is reported.
#[derive(Debug, Clone)]
pub struct CommandRules {
    deny: Vec<Regex>,
    allow: Vec<Regex>,
}

impl CommandRules {
    /// Build from explicit pattern lists.
    pub fn new<S: AsRef<str>>(deny: &[S], allow: &[S]) -> Result<Self, DomainError> {
        Ok(Self {
            deny: compile_all(deny)?,
            allow: compile_all(allow)?,
        })
    }

    /// Platform defaults followed by custom entries from configuration.
    pub fn with_custom<S: AsRef<str>>(
        custom_deny: &[S],
        custom_allow: &[S],
    ) -> Result<Self, DomainError> {
        let (deny, allow) = platform_patterns();
        let mut rules = Self::new(deny, allow)?;
        rules.deny.extend(compile_all(custom_deny)?);
        rules.allow.extend(compile_all(custom_allow)?);
        Ok(rules)
    }

    /// No patterns at all
    pub fn empty() -> Self {
        Self {
            deny: Vec::new(),
            allow: Vec::new(),
        }
    }

    /// Test a command: deny list first, then allow list.
    ///
    /// Patterns see the [`normalize_command`] form, which is what the shell runs.
    pub fn check(&self, command: &str) -> CommandCheck {
        let command = normalize_command(command);
        if let Some(re) = self.deny.iter().find(|re| re.is_match(&command)) {
            return CommandCheck::Denied(re.as_str().to_string());
        }
        if let Some(re) = self.allow.iter().find(|re| re.is_match(&command)) {
            return CommandCheck::Allowed(re.as_str().to_string());
        }
        CommandCheck::Unlisted
    }

    pub fn deny_count(&self) -> usize {
        self.deny.len()
    }

    pub fn allow_count(&self) -> usize {
        self.allow.len()
    }
}

impl Default for CommandRules {
    fn default() -> Self {
        let no_custom: &[&str] = &[];
        // Built-in patterns are covered by tests, so this cannot fail in practice
        Self::with_custom(no_custom, no_custom).unwrap_or_else(|_| Self::empty())
    }
}

/// The command line as it is executed: NUL bytes removed, surrounding
/// whitespace trimmed.
///
/// Rule matching and the command tool must both go through this so a
/// pattern always sees the exact text handed to the shell.
pub fn normalize_command(command: &str) -> String {
    command.replace('\0', "").trim().to_string()
}

fn platform_patterns() -> (&'static [&'static str], &'static [&'static str]) {
    if cfg!(windows) {
        (WINDOWS_DENY_PATTERNS, WINDOWS_ALLOW_PATTERNS)
    } else {
        (UNIX_DENY_PATTERNS, UNIX_ALLOW_PATTERNS)
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, DomainError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p.as_ref())
                .case_insensitive(true)
                .build()
                .map_err(|e| DomainError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}
