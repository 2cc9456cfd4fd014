//! Agent domain module
//!
//! The tool-calling loop itself lives in the application layer; the domain
//! only names its phases.

pub mod phase;

pub use phase::LoopPhase;
