//! Application error types

use thiserror::Error;
use varflat_domain::ResolveError;

use crate::ports::DatasetError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A directive failed while resolving a record.
    #[error("record #{record}: {source}")]
    Resolve {
        /// Position of the record in the dataset.
        record: usize,
        /// The underlying resolution error.
        #[source]
        source: ResolveError,
    },

    /// A record kept unresolved keys and the settings forbid that.
    #[error("record #{record} has unresolved keys: {}", keys.join(", "))]
    Unresolved {
        /// Position of the record in the dataset.
        record: usize,
        /// Keys still unresolved, in record order.
        keys: Vec<String>,
    },

    /// Loading or saving a dataset failed.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
