//! Ports: interfaces the use cases depend on, implemented by adapters
//! in the infrastructure and presentation layers.

pub mod completion;
pub mod progress;
pub mod retriever;
pub mod trace_sink;
