//! Tool implementations for the agent
//!
//! Concrete handlers for the built-in tools plus the schema converter
//! that exports their definitions to the model.
//!
//! | Module | Tools |
//! |--------|-------|
//! | [`file`] | create, read, write, delete, list, info, move, copy |
//! | [`command`] | `execute_command` |
//! | [`system`] | `get_system_info` |

pub mod command;
pub mod file;
pub mod paths;
pub mod schema;
pub mod system;

pub use command::{CommandHandler, Shell};
pub use schema::FunctionSchemaConverter;

use std::sync::Arc;
use wolf_application::{FnHandler, ToolCatalog};
use wolf_domain::DomainError;

/// Build the catalog of all built-in tools
pub fn default_catalog() -> Result<ToolCatalog, DomainError> {
    Ok(ToolCatalog::builder()
        .register(file::create_file_definition(), Arc::new(FnHandler(file::create_file)))?
        .register(file::read_file_definition(), Arc::new(FnHandler(file::read_file)))?
        .register(file::write_file_definition(), Arc::new(FnHandler(file::write_file)))?
        .register(file::delete_file_definition(), Arc::new(FnHandler(file::delete_file)))?
        .register(file::list_directory_definition(), Arc::new(FnHandler(file::list_directory)))?
        .register(file::get_file_info_definition(), Arc::new(FnHandler(file::get_file_info)))?
        .register(file::move_file_definition(), Arc::new(FnHandler(file::move_file)))?
        .register(file::copy_file_definition(), Arc::new(FnHandler(file::copy_file)))?
        .register(command::execute_command_definition(), Arc::new(CommandHandler::new()))?
        .register(system::get_system_info_definition(), Arc::new(FnHandler(system::get_system_info)))?
        .build())
}
