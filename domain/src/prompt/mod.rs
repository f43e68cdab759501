//! Prompt construction for the solver strategies.

pub mod template;

pub use template::PromptTemplate;
