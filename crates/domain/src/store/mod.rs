//! Record and dataset storage types

mod dataset;
mod record;
mod value;

pub use dataset::Dataset;
pub use record::Record;
pub use value::{DIRECTIVE_PREFIX, REFERENCE_CLOSE, REFERENCE_OPEN, ValueState, is_resolved};
