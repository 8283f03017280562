//! Settings file loading.
//!
//! A settings file is a JSON or YAML object with the [`ResolveSettings`]
//! fields; missing fields take their defaults.

use std::path::{Path, PathBuf};

use varflat_application::ports::{FileSystem, FileSystemError};
use varflat_domain::ResolveSettings;

use crate::serialization::{DataFormat, SerializationError, from_json_bytes, from_yaml_bytes};

/// Errors that can occur while loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file extension does not name a supported format.
    #[error("Unsupported settings format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    /// The file could not be read.
    #[error("Failed to read settings: {0}")]
    FileSystem(#[from] FileSystemError),

    /// The file content is not valid settings.
    #[error("Invalid settings in {path}: {source}")]
    Invalid {
        /// Settings file path.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: SerializationError,
    },
}

/// Loads [`ResolveSettings`] from a JSON or YAML file.
///
/// # Errors
/// Returns an error if the file is missing, has an unsupported extension or
/// does not decode.
pub async fn load_settings<F: FileSystem>(
    fs: &F,
    path: &Path,
) -> Result<ResolveSettings, SettingsError> {
    let format = DataFormat::from_path(path)
        .ok_or_else(|| SettingsError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs.read_file(path).await?;

    let settings = match format {
        DataFormat::Json => from_json_bytes(&content),
        DataFormat::Yaml => from_yaml_bytes(&content),
    }
    .map_err(|source| SettingsError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?settings, "settings loaded");
    Ok(settings)
}
