//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`] — which model backend serves the conversation
//! - [`error::DomainError`] — domain-level errors
//! - [`string::truncate`] — UTF-8 safe truncation for prompts and tables

pub mod error;
pub mod provider;
pub mod string;
