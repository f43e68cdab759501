//! Provider adapters for the completion gateway port.

pub mod openai_chat;

pub use openai_chat::OpenAiChatGateway;
