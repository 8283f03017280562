//! Deterministic serialization for dataset files.
//!
//! Output keeps record and key order, uses 2-space indentation for JSON and
//! always ends with a newline so rewritten files diff cleanly.

mod format;
mod json;
mod yaml;

pub use format::DataFormat;
pub use json::*;
pub use yaml::*;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
