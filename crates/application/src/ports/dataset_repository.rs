//! Dataset repository port
//!
//! Defines the interface for loading and storing datasets.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use varflat_domain::Dataset;

/// Errors that can occur during dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file not found.
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    /// The file extension does not name a supported format.
    #[error("Unsupported dataset format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for dataset persistence.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Loads a dataset.
    ///
    /// # Arguments
    /// * `path` - Path to the dataset file
    ///
    /// # Errors
    /// Returns `DatasetError::NotFound` if the file doesn't exist.
    async fn load(&self, path: &Path) -> Result<Dataset, DatasetError>;

    /// Saves a dataset, replacing any existing file.
    ///
    /// # Arguments
    /// * `path` - Destination path; its extension selects the format
    /// * `dataset` - The dataset to save
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    async fn save(&self, path: &Path, dataset: &Dataset) -> Result<(), DatasetError>;

    /// Checks if a dataset exists and can be loaded.
    ///
    /// # Arguments
    /// * `path` - Path to the dataset file
    async fn exists(&self, path: &Path) -> Result<bool, DatasetError> {
        match self.load(path).await {
            Ok(_) => Ok(true),
            Err(DatasetError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
