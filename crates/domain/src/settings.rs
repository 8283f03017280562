//! Resolution settings
//!
//! Options that control how a whole dataset is flattened.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What cross-record lookups see while a dataset is resolved record by record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotPolicy {
    /// Every record sees the others' raw values (default).
    #[default]
    Raw,
    /// Records already processed are seen in their resolved form.
    Progressive,
}

impl SnapshotPolicy {
    /// Returns the policy name as used in settings files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Progressive => "progressive",
        }
    }
}

impl fmt::Display for SnapshotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapshotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "progressive" => Ok(Self::Progressive),
            other => Err(format!(
                "unknown snapshot policy '{other}', expected 'raw' or 'progressive'"
            )),
        }
    }
}

/// Dataset resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolveSettings {
    /// Snapshot policy for cross-record lookups.
    pub snapshot_policy: SnapshotPolicy,

    /// Treat keys left unresolved at fixpoint as a failure.
    pub fail_on_unresolved: bool,
}

impl ResolveSettings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the snapshot policy.
    #[must_use]
    pub const fn with_snapshot_policy(mut self, policy: SnapshotPolicy) -> Self {
        self.snapshot_policy = policy;
        self
    }

    /// Sets whether unresolved keys fail the run.
    #[must_use]
    pub const fn with_fail_on_unresolved(mut self, fail: bool) -> Self {
        self.fail_on_unresolved = fail;
        self
    }
}
