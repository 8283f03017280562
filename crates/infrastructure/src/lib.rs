//! Varflat Infrastructure - Adapters and implementations
//!
//! This crate provides the file-backed implementations of the ports
//! defined in the application layer.

pub mod persistence;
pub mod serialization;

pub use persistence::{FileDatasetRepository, SettingsError, TokioFileSystem, load_settings};
pub use serialization::{
    DataFormat, SerializationError, from_json_bytes, from_yaml_bytes, to_json_stable,
    to_json_stable_bytes, to_yaml,
};
