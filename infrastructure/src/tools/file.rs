//! File operation tools
//!
//! `create_file`, `read_file`, `write_file`, `delete_file`, `list_directory`,
//! `get_file_info`, `move_file`, `copy_file`.
//!
//! Every handler receives arguments that already passed validation, so
//! defaults are present. Paths are normalized with [`normalize_path`].

use super::paths::{display, ensure_parent_dir, human_size, normalize_path, timestamp};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use wolf_application::{ToolFault, require_str};
use wolf_domain::{ParamType, RiskLevel, ToolDefinition, ToolParameter};

/// Tool name constants
pub const CREATE_FILE: &str = "create_file";
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const DELETE_FILE: &str = "delete_file";
pub const LIST_DIRECTORY: &str = "list_directory";
pub const GET_FILE_INFO: &str = "get_file_info";
pub const MOVE_FILE: &str = "move_file";
pub const COPY_FILE: &str = "copy_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

type Args = Map<String, Value>;

// ==================== Definitions ====================

pub fn create_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        CREATE_FILE,
        "Create a new file with optional content. Fails if the file already exists.",
        RiskLevel::Modifying,
    )
    .with_parameter(ToolParameter::new("path", "Path of the file to create", true))
    .with_parameter(
        ToolParameter::new("content", "Initial file content", false).with_default(""),
    )
    .with_returns("path and bytes_written")
}

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(READ_FILE, "Read the text content of a file", RiskLevel::Safe)
        .with_parameter(ToolParameter::new("path", "Path of the file to read", true))
        .with_returns("path, content and size in bytes")
}

pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file, overwriting it. An existing file is backed up to <name>.bak first.",
        RiskLevel::Modifying,
    )
    .with_parameter(ToolParameter::new("path", "Path of the file to write", true))
    .with_parameter(ToolParameter::new("content", "Content to write", true))
    .with_returns("path, bytes_written and whether a backup was made")
}

pub fn delete_file_definition() -> ToolDefinition {
    ToolDefinition::new(DELETE_FILE, "Permanently delete a file", RiskLevel::Destructive)
        .with_parameter(ToolParameter::new("path", "Path of the file to delete", true))
        .with_returns("path and deleted flag")
}

pub fn list_directory_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_DIRECTORY,
        "List the files and directories inside a directory",
        RiskLevel::Safe,
    )
    .with_parameter(ToolParameter::new("path", "Directory to list", false).with_default("."))
    .with_parameter(
        ToolParameter::new("recursive", "Include subdirectories", false)
            .with_type(ParamType::Boolean)
            .with_default(false),
    )
    .with_returns("items with name, path, type, size and modified time, plus a count")
}

pub fn get_file_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_FILE_INFO,
        "Get size, timestamps and type of a file or directory",
        RiskLevel::Safe,
    )
    .with_parameter(ToolParameter::new("path", "Path to inspect", true))
    .with_returns("name, size, modified, created, is_file and is_dir")
}

pub fn move_file_definition() -> ToolDefinition {
    ToolDefinition::new(MOVE_FILE, "Move or rename a file", RiskLevel::Modifying)
        .with_parameter(ToolParameter::new("source", "Current path", true))
        .with_parameter(ToolParameter::new("destination", "New path", true))
        .with_returns("source and destination")
}

pub fn copy_file_definition() -> ToolDefinition {
    ToolDefinition::new(COPY_FILE, "Copy a file", RiskLevel::Modifying)
        .with_parameter(ToolParameter::new("source", "File to copy", true))
        .with_parameter(ToolParameter::new("destination", "Path of the copy", true))
        .with_returns("source, destination and bytes_copied")
}

// ==================== Handlers ====================

pub fn create_file(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(require_str(args, "path")?);
    let content = args.get("content").and_then(Value::as_str).unwrap_or("");
    info!(tool = CREATE_FILE, path = %path.display(), "Creating file");

    if path.exists() {
        return Err(ToolFault::AlreadyExists(format!(
            "{}. Use write_file to overwrite.",
            path.display()
        )));
    }
    ensure_parent_dir(&path)?;
    fs::write(&path, content)?;

    Ok(json!({
        "path": display(&path),
        "bytes_written": content.len(),
    }))
}

pub fn read_file(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(require_str(args, "path")?);
    info!(tool = READ_FILE, path = %path.display(), "Reading file");

    if !path.exists() {
        return Err(ToolFault::NotFound(display(&path)));
    }
    if !path.is_file() {
        return Err(ToolFault::InvalidInput(format!(
            "Path is not a file: {}",
            path.display()
        )));
    }
    let size = fs::metadata(&path)?.len();
    if size > MAX_READ_SIZE {
        return Err(ToolFault::InvalidInput(format!(
            "File too large ({} bytes). Maximum size is {} bytes",
            size, MAX_READ_SIZE
        )));
    }
    let content = fs::read_to_string(&path)?;

    Ok(json!({
        "path": display(&path),
        "content": content,
        "size": size,
    }))
}

pub fn write_file(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(require_str(args, "path")?);
    let content = require_str(args, "content")?;
    info!(tool = WRITE_FILE, path = %path.display(), "Writing file");

    let mut backup = None;
    if path.is_file() {
        let mut name = path.as_os_str().to_os_string();
        name.push(".bak");
        fs::copy(&path, &name)?;
        debug!(backup = ?name, "Backed up existing file");
        backup = Some(display(Path::new(&name)));
    }
    ensure_parent_dir(&path)?;
    fs::write(&path, content)?;

    Ok(json!({
        "path": display(&path),
        "bytes_written": content.len(),
        "backed_up": backup.is_some(),
        "backup_path": backup,
    }))
}

pub fn delete_file(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(require_str(args, "path")?);
    info!(tool = DELETE_FILE, path = %path.display(), "Deleting file");

    if !path.exists() {
        return Err(ToolFault::NotFound(display(&path)));
    }
    if path.is_dir() {
        return Err(ToolFault::InvalidInput(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }
    fs::remove_file(&path)?;

    Ok(json!({
        "path": display(&path),
        "deleted": true,
    }))
}

pub fn list_directory(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(args.get("path").and_then(Value::as_str).unwrap_or("."));
    let recursive = args
        .get("recursive")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    info!(tool = LIST_DIRECTORY, path = %path.display(), recursive, "Listing directory");

    if !path.exists() {
        return Err(ToolFault::NotFound(display(&path)));
    }
    if !path.is_dir() {
        return Err(ToolFault::InvalidInput(format!(
            "Path is not a directory: {}",
            path.display()
        )));
    }

    let mut items = Vec::new();
    collect_entries(&path, recursive, &mut items)?;
    items.sort_by(|a, b| a["path"].as_str().cmp(&b["path"].as_str()));
    debug!(count = items.len(), "Directory listed");

    Ok(json!({
        "path": display(&path),
        "count": items.len(),
        "items": items,
    }))
}

/// Entries we cannot stat are skipped
fn collect_entries(dir: &Path, recursive: bool, items: &mut Vec<Value>) -> Result<(), ToolFault> {
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let entry_path = entry.path();
        let is_file = metadata.is_file();
        let size = if is_file { metadata.len() } else { 0 };

        items.push(json!({
            "name": entry.file_name().to_string_lossy(),
            "path": display(&entry_path),
            "type": if is_file { "file" } else { "directory" },
            "size": size,
            "size_human": if is_file { human_size(size) } else { "-".to_string() },
            "modified": metadata.modified().ok().map(timestamp),
        }));

        if recursive && metadata.is_dir() {
            collect_entries(&entry_path, true, items)?;
        }
    }
    Ok(())
}

pub fn get_file_info(args: &Args) -> Result<Value, ToolFault> {
    let path = normalize_path(require_str(args, "path")?);
    debug!(tool = GET_FILE_INFO, path = %path.display(), "Inspecting path");

    if !path.exists() {
        return Err(ToolFault::NotFound(display(&path)));
    }
    let metadata = fs::metadata(&path)?;

    Ok(json!({
        "path": display(&path),
        "name": path.file_name().map(|n| n.to_string_lossy().into_owned()),
        "size": metadata.len(),
        "size_human": human_size(metadata.len()),
        "modified": metadata.modified().ok().map(timestamp),
        "created": metadata.created().ok().map(timestamp),
        "is_file": metadata.is_file(),
        "is_dir": metadata.is_dir(),
    }))
}

pub fn move_file(args: &Args) -> Result<Value, ToolFault> {
    let source = normalize_path(require_str(args, "source")?);
    let destination = normalize_path(require_str(args, "destination")?);
    info!(tool = MOVE_FILE, source = %source.display(), destination = %destination.display(), "Moving file");

    if !source.exists() {
        return Err(ToolFault::NotFound(display(&source)));
    }
    ensure_parent_dir(&destination)?;
    if fs::rename(&source, &destination).is_err() {
        // rename cannot cross filesystems
        fs::copy(&source, &destination)?;
        fs::remove_file(&source)?;
    }

    Ok(json!({
        "source": display(&source),
        "destination": display(&destination),
    }))
}

pub fn copy_file(args: &Args) -> Result<Value, ToolFault> {
    let source = normalize_path(require_str(args, "source")?);
    let destination = normalize_path(require_str(args, "destination")?);
    info!(tool = COPY_FILE, source = %source.display(), destination = %destination.display(), "Copying file");

    if !source.exists() {
        return Err(ToolFault::NotFound(display(&source)));
    }
    if !source.is_file() {
        return Err(ToolFault::InvalidInput(format!(
            "Source is not a file: {}",
            source.display()
        )));
    }
    ensure_parent_dir(&destination)?;
    let bytes_copied = fs::copy(&source, &destination)?;

    Ok(json!({
        "source": display(&source),
        "destination": display(&destination),
        "bytes_copied": bytes_copied,
    }))
}
