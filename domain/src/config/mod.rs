//! Configuration value objects shared by the config layer

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
