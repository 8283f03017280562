//! Application use cases (business logic orchestration).

mod flatten_dataset_file;
mod resolve_dataset;

pub use flatten_dataset_file::{
    FlattenDatasetFile, FlattenDatasetFileInput, FlattenDatasetFileOutput, FlattenTarget,
};
pub use resolve_dataset::{RecordReport, ResolveDataset, ResolveDatasetOutput};
