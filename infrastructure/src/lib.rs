//! Infrastructure layer for tally
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP completion gateway, dataset loading,
//! prediction/trace writers, configuration loading, and few-shot retrieval.

pub mod config;
pub mod dataset;
pub mod output;
pub mod providers;
pub mod retrieval;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileConfigError, FilePathsConfig, FileProviderConfig,
    FileSamplingConfig,
};
pub use dataset::{DatasetError, TrainingExample, extract_gold, load_problems, load_training};
pub use output::{OutputError, JsonlTraceSink, write_predictions};
pub use providers::OpenAiChatGateway;
pub use retrieval::LexicalRetriever;
