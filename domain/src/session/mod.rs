//! Conversation state and model responses

pub mod entities;
pub mod response;

pub use entities::{Conversation, Message, Role};
pub use response::{AssistantMessage, ChatResponse, Choice, WireFunction, WireToolCall};
