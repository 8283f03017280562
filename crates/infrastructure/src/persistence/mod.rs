//! File-backed implementations of the application ports.

mod dataset_repository;
mod file_system;
mod settings_loader;

pub use dataset_repository::FileDatasetRepository;
pub use file_system::TokioFileSystem;
pub use settings_loader::{SettingsError, load_settings};
