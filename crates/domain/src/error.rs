//! Domain error types

use thiserror::Error;

/// Errors raised while evaluating a directive during record resolution.
///
/// All variants abort the current resolution run. Values already committed
/// to the record stay committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A directive or one of its parts is malformed.
    #[error("incorrect syntax in {directive}: {message}")]
    Syntax {
        /// The directive or fragment that failed to parse.
        directive: String,
        /// What was wrong with it.
        message: String,
    },

    /// A `$varbookref` constraint names a key the candidate record lacks.
    #[error("no such key `{key}` while matching `{constraints}`")]
    MissingKey {
        /// The constraint key that was not found.
        key: String,
        /// The full constraint list, as written.
        constraints: String,
    },

    /// The field requested by `$varbookref` is absent from the matched record.
    #[error("no such field `{field}` in the matched record")]
    MissingField {
        /// The requested field name.
        field: String,
    },

    /// More than one record satisfies a `$varbookref` constraint list.
    #[error("matched more than one record for `{constraints}`")]
    AmbiguousMatch {
        /// The full constraint list, as written.
        constraints: String,
    },
}

impl ResolveError {
    /// Creates a syntax error for the given directive text.
    #[must_use]
    pub fn syntax(directive: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            directive: directive.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is a syntax error.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

/// Result type alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
