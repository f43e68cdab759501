//! Answer handling: normalized keys and best-effort extraction.

pub mod extract;
pub mod key;
