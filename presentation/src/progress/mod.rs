//! Progress display

pub mod console;

pub use console::{ConsoleProgress, ProgressLevel};
