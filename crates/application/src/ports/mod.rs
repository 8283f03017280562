//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the resolution core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod dataset_repository;
mod file_system;

pub use dataset_repository::{DatasetError, DatasetRepository};
pub use file_system::{FileSystem, FileSystemError};
