//! Value classification

/// Opening token of an embedded key reference.
pub const REFERENCE_OPEN: &str = "${";

/// Closing token of an embedded key reference.
pub const REFERENCE_CLOSE: char = '}';

/// Prefix shared by every directive (`$vareq`, `$varif`, `$varbookref`).
pub const DIRECTIVE_PREFIX: &str = "$var";

/// Whether a raw value still needs work before it is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueState {
    /// No `${...}` reference and no pending directive.
    Resolved,
    /// Contains a reference or starts with a directive prefix.
    Unresolved,
}

impl ValueState {
    /// Classifies a raw value.
    #[must_use]
    pub fn of(value: &str) -> Self {
        if value.contains(REFERENCE_OPEN) || value.starts_with(DIRECTIVE_PREFIX) {
            Self::Unresolved
        } else {
            Self::Resolved
        }
    }

    /// Returns true for [`ValueState::Resolved`].
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// Returns true if the value contains no reference and no pending directive.
#[must_use]
pub fn is_resolved(value: &str) -> bool {
    ValueState::of(value).is_resolved()
}
