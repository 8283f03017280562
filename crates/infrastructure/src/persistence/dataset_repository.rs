//! File-based dataset repository implementation.
//!
//! A dataset file holds a top-level array of flat string-to-string objects,
//! written as JSON or YAML depending on the file extension.

use std::path::Path;

use async_trait::async_trait;
use varflat_application::ports::{DatasetError, DatasetRepository, FileSystem, FileSystemError};
use varflat_domain::Dataset;

use crate::serialization::{
    DataFormat, SerializationError, from_json_bytes, from_yaml_bytes, to_json_stable_bytes,
    to_yaml,
};

/// Converts `FileSystemError` to `DatasetError`, keeping not-found distinct.
fn to_dataset_error(e: FileSystemError) -> DatasetError {
    match e {
        FileSystemError::NotFound(path) => DatasetError::NotFound(path),
        FileSystemError::PermissionDenied(path) => DatasetError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            path.display().to_string(),
        )),
        FileSystemError::Io(io_err) => DatasetError::Io(io_err),
    }
}

fn to_serialization_error(e: &SerializationError) -> DatasetError {
    DatasetError::Serialization(e.to_string())
}

fn format_of(path: &Path) -> Result<DataFormat, DatasetError> {
    DataFormat::from_path(path).ok_or_else(|| DatasetError::UnsupportedFormat(path.to_path_buf()))
}

/// Dataset repository backed by a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct FileDatasetRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileDatasetRepository<F> {
    /// Creates a new file-based dataset repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Encodes a dataset in the format selected by `path`.
    ///
    /// # Errors
    /// Returns an error if the extension is unsupported or encoding fails.
    pub fn encode(path: &Path, dataset: &Dataset) -> Result<Vec<u8>, DatasetError> {
        match format_of(path)? {
            DataFormat::Json => to_json_stable_bytes(dataset),
            DataFormat::Yaml => to_yaml(dataset).map(String::into_bytes),
        }
        .map_err(|e| to_serialization_error(&e))
    }
}

#[async_trait]
impl<F: FileSystem> DatasetRepository for FileDatasetRepository<F> {
    async fn load(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let format = format_of(path)?;
        let content = self.fs.read_file(path).await.map_err(to_dataset_error)?;

        let dataset: Dataset = match format {
            DataFormat::Json => from_json_bytes(&content),
            DataFormat::Yaml => from_yaml_bytes(&content),
        }
        .map_err(|e| to_serialization_error(&e))?;

        tracing::debug!(
            path = %path.display(),
            ?format,
            records = dataset.len(),
            "dataset decoded"
        );
        Ok(dataset)
    }

    async fn save(&self, path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
        let content = Self::encode(path, dataset)?;
        self.fs
            .write_file(path, &content)
            .await
            .map_err(to_dataset_error)
    }

    async fn exists(&self, path: &Path) -> Result<bool, DatasetError> {
        format_of(path)?;
        Ok(self.fs.exists(path).await)
    }
}
