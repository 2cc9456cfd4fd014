//! Path and metadata helpers shared by the file tools

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Expand a leading `~` and make the path absolute against the working directory.
///
/// The path is not canonicalized, so it may name something that does not
/// exist yet.
pub fn normalize_path(raw: &str) -> PathBuf {
    let expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(raw),
            }
        }
        _ => PathBuf::from(raw),
    };
    std::path::absolute(&expanded).unwrap_or(expanded)
}

/// Create missing parent directories of `path`
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Human-readable size, e.g. `1.5 KB`
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Local RFC 3339 timestamp
pub fn timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339()
}

/// Display form of a path
pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_normalize_relative_path_is_absolute() {
        let path = normalize_path("some/file.txt");
        assert!(path.is_absolute());
        assert!(path.ends_with("some/file.txt"));
    }

    #[test]
    fn test_normalize_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(normalize_path("~/notes.txt"), home.join("notes.txt"));
        }
        // only a bare leading tilde is expanded
        assert!(normalize_path("~other/x").ends_with("~other/x"));
    }

    #[test]
    fn test_ensure_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c.txt");
        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }
}
