//! CSV dataset loading

pub mod loader;

pub use loader::{DatasetError, TrainingExample, extract_gold, load_problems, load_training};
