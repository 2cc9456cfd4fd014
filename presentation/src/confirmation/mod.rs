//! Human confirmation adapters

pub mod terminal;

pub use terminal::TerminalConfirmation;
