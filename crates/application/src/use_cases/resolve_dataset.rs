//! Resolve dataset use case

use varflat_domain::{Dataset, ResolveSettings, SnapshotPolicy};

use crate::error::{ApplicationError, ApplicationResult};
use crate::variable_resolver::RecordResolver;

/// Resolution details for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    /// Position of the record in the dataset.
    pub index: usize,
    /// Number of committed resolution steps.
    pub steps: usize,
    /// Keys still unresolved at fixpoint, in record order.
    pub unresolved_keys: Vec<String>,
}

impl RecordReport {
    /// Returns true if every value in the record is final.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved_keys.is_empty()
    }
}

/// Output containing per-record resolution details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveDatasetOutput {
    /// One report per record, in dataset order.
    pub reports: Vec<RecordReport>,
}

impl ResolveDatasetOutput {
    /// Reports of records that kept unresolved keys.
    pub fn incomplete(&self) -> impl Iterator<Item = &RecordReport> {
        self.reports.iter().filter(|r| !r.is_complete())
    }

    /// Total unresolved keys across all records.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.reports.iter().map(|r| r.unresolved_keys.len()).sum()
    }

    /// Returns true if every record is fully resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.reports.iter().all(RecordReport::is_complete)
    }
}

/// Resolves every record of a dataset in order.
///
/// Each record gets its own resolution run. Cross-record lookups read a
/// snapshot taken before the first record; with
/// [`SnapshotPolicy::Progressive`] each finished record replaces its entry
/// in that snapshot.
#[derive(Debug, Clone, Default)]
pub struct ResolveDataset {
    settings: ResolveSettings,
}

impl ResolveDataset {
    /// Creates a new `ResolveDataset` use case.
    #[must_use]
    pub const fn new(settings: ResolveSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &ResolveSettings {
        &self.settings
    }

    /// Executes the use case, resolving `dataset` in place.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Resolve`] as soon as a directive fails. Records
    ///   before it stay resolved.
    /// - [`ApplicationError::Unresolved`] if `fail_on_unresolved` is set and
    ///   some record kept unresolved keys.
    pub fn execute(&self, dataset: &mut Dataset) -> ApplicationResult<ResolveDatasetOutput> {
        let policy = self.settings.snapshot_policy;
        let mut snapshot = dataset.clone();
        let mut reports = Vec::with_capacity(dataset.len());

        for (index, record) in dataset.iter_mut().enumerate() {
            let _span = tracing::debug_span!("record", index).entered();

            let resolution = RecordResolver::new(&snapshot)
                .resolve_record(record)
                .map_err(|source| ApplicationError::Resolve {
                    record: index,
                    source,
                })?;

            if policy == SnapshotPolicy::Progressive {
                snapshot.replace(index, record.clone());
            }

            if !resolution.is_complete() {
                tracing::warn!(
                    record = index,
                    keys = ?resolution.unresolved,
                    "record has unresolved keys"
                );
            }

            reports.push(RecordReport {
                index,
                steps: resolution.steps,
                unresolved_keys: resolution.unresolved,
            });
        }

        let output = ResolveDatasetOutput { reports };
        tracing::info!(
            records = output.reports.len(),
            unresolved = output.unresolved_count(),
            policy = %policy,
            "dataset resolved"
        );

        if self.settings.fail_on_unresolved
            && let Some(report) = output.incomplete().next()
        {
            return Err(ApplicationError::Unresolved {
                record: report.index,
                keys: report.unresolved_keys.clone(),
            });
        }

        Ok(output)
    }
}
