//! Configuration loading and file formats

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileConfig, FileConfigError, FileFewShotConfig, FilePathsConfig, FileProviderConfig,
    FileSamplingConfig, FileVerificationConfig,
};
pub use loader::ConfigLoader;
