//! Few-shot example retrieval

pub mod lexical;

pub use lexical::LexicalRetriever;
