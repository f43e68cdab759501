//! Prediction and trace writers

pub mod predictions;
pub mod trace;

pub use predictions::{OutputError, write_predictions};
pub use trace::JsonlTraceSink;
