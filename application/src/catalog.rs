//! Tool Catalog
//!
//! The [`ToolCatalog`] is the build-once table of tools: each entry pairs a
//! [`ToolDefinition`] with the [`ToolHandler`] that implements it.
//!
//! # Usage
//!
//! ```ignore
//! let catalog = ToolCatalog::builder()
//!     .register(read_file_definition(), Arc::new(ReadFileHandler))?
//!     .register(write_file_definition(), Arc::new(WriteFileHandler))?
//!     .build();
//!
//! assert!(catalog.get("read_file").is_some());
//! let schemas = catalog.export_schemas(&converter);
//! ```
//!
//! Registering the same name twice is an error. Use
//! [`ToolCatalogBuilder::replace`] to override an entry on purpose.
//! After [`build`](ToolCatalogBuilder::build) the catalog is immutable.

use crate::ports::tool_handler::ToolHandler;
use crate::ports::tool_schema::ToolSchemaPort;
use std::collections::BTreeMap;
use std::sync::Arc;
use wolf_domain::{DomainError, ToolDefinition};

/// A registered tool
#[derive(Clone)]
pub struct ToolEntry {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Display grouping for tool listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCategory {
    FileOperations,
    ShellAndSystem,
    Other,
}

impl ToolCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolCategory::FileOperations => "File Operations",
            ToolCategory::ShellAndSystem => "Shell & System",
            ToolCategory::Other => "Other",
        }
    }

    /// Derive the category from the tool's name prefix
    pub fn of(tool_name: &str) -> Self {
        const FILE_PREFIXES: &[&str] = &[
            "create_", "read_", "write_", "delete_", "move_", "copy_", "list_", "get_file_",
        ];
        const SHELL_PREFIXES: &[&str] = &["execute_", "get_command_", "get_system_"];

        if FILE_PREFIXES.iter().any(|p| tool_name.starts_with(p)) {
            ToolCategory::FileOperations
        } else if SHELL_PREFIXES.iter().any(|p| tool_name.starts_with(p)) {
            ToolCategory::ShellAndSystem
        } else {
            ToolCategory::Other
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable table of tools, indexed by name
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: BTreeMap<String, ToolEntry>,
}

/// Builder collecting entries before the catalog is frozen
#[derive(Debug, Default)]
pub struct ToolCatalogBuilder {
    entries: BTreeMap<String, ToolEntry>,
}

impl ToolCatalogBuilder {
    /// Add a tool; fails if the name is already taken
    pub fn register(
        mut self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<Self, DomainError> {
        if self.entries.contains_key(&definition.name) {
            return Err(DomainError::DuplicateTool(definition.name));
        }
        self.entries.insert(
            definition.name.clone(),
            ToolEntry {
                definition,
                handler,
            },
        );
        Ok(self)
    }

    /// Add or overwrite a tool
    pub fn replace(mut self, definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        if self.entries.contains_key(&definition.name) {
            tracing::debug!(tool = %definition.name, "Replacing registered tool");
        }
        self.entries.insert(
            definition.name.clone(),
            ToolEntry {
                definition,
                handler,
            },
        );
        self
    }

    pub fn build(self) -> ToolCatalog {
        ToolCatalog {
            entries: self.entries,
        }
    }
}

impl ToolCatalog {
    pub fn builder() -> ToolCatalogBuilder {
        ToolCatalogBuilder::default()
    }

    /// Look up a tool; `None` for unknown names
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries, sorted by name
    pub fn list(&self) -> impl Iterator<Item = &ToolEntry> {
        self.entries.values()
    }

    /// All definitions, sorted by name
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.entries.values().map(|e| &e.definition).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Function-calling schemas for the model, sorted by name.
    ///
    /// A read-only snapshot: calling it twice yields identical output.
    pub fn export_schemas(&self, converter: &dyn ToolSchemaPort) -> Vec<serde_json::Value> {
        converter.all_tools_schema(&self.definitions())
    }

    /// Definitions grouped by category, categories in display order
    pub fn by_category(&self) -> Vec<(ToolCategory, Vec<&ToolDefinition>)> {
        let mut groups: BTreeMap<ToolCategory, Vec<&ToolDefinition>> = BTreeMap::new();
        for entry in self.entries.values() {
            groups
                .entry(ToolCategory::of(&entry.definition.name))
                .or_default()
                .push(&entry.definition);
        }
        groups.into_iter().collect()
    }
}
