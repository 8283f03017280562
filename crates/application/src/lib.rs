//! Varflat Application - Resolution engine, use cases and ports
//!
//! This crate defines the application layer with:
//! - The value-resolution engine (`variable_resolver`)
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    FlattenDatasetFile, FlattenDatasetFileInput, FlattenDatasetFileOutput, FlattenTarget,
    RecordReport, ResolveDataset, ResolveDatasetOutput,
};
pub use variable_resolver::{RecordResolver, UnresolvedKeys, resolve_all_values};
