//! Fixpoint resolution engine
//!
//! Resolves one record's `${key}` references and directives in place by
//! repeating single-key substitution steps until nothing changes.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use varflat_domain::{Dataset, Record, ResolveResult, is_resolved};

use super::evaluator::Evaluator;
use super::parser::{extract_reference_names, placeholder};

/// Keys left unresolved once a record reaches its fixpoint.
pub type UnresolvedKeys = IndexSet<String>;

/// Outcome of resolving one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordResolution {
    /// Number of steps that committed a change.
    pub steps: usize,

    /// Keys whose values still hold a reference or a directive, in record order.
    pub unresolved: Vec<String>,
}

impl RecordResolution {
    /// Returns true if every value in the record is final.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// A value change found by one step.
struct Change {
    key: String,
    value: String,
    /// Names substituted into the value by this step.
    substituted: Vec<String>,
    evaluated: bool,
}

/// Resolution state of one record.
///
/// Each pending key remembers the names already substituted into it. A name
/// is never substituted twice into the same key, so every partial step
/// expands a new name and the loop ends even when a committed value
/// reintroduces its own placeholder.
struct Progress {
    resolved: HashSet<String>,
    pending: IndexMap<String, Vec<String>>,
}

impl Progress {
    fn new(record: &Record) -> Self {
        let mut resolved = HashSet::new();
        let mut pending = IndexMap::new();
        for (key, value) in record.iter() {
            if is_resolved(value) {
                resolved.insert(key.to_string());
            } else {
                pending.insert(key.to_string(), Vec::new());
            }
        }
        Self { resolved, pending }
    }

    fn commit(&mut self, record: &mut Record, change: Change) {
        record.set(change.key.clone(), change.value);
        if change.evaluated {
            self.pending.shift_remove(&change.key);
            self.resolved.insert(change.key);
        } else if let Some(expanded) = self.pending.get_mut(&change.key) {
            expanded.extend(change.substituted);
        }
    }
}

/// The fixpoint resolver.
///
/// Holds a read-only dataset for `$varbookref` lookups; the record being
/// resolved is passed to each call and mutated in place.
///
/// # Example
///
/// ```
/// use varflat_application::variable_resolver::RecordResolver;
/// use varflat_domain::{Dataset, Record};
///
/// let dataset = Dataset::new();
/// let mut record = Record::from([("x", "10"), ("y", "$vareq ${x} == 10")]);
///
/// let resolution = RecordResolver::new(&dataset).resolve_record(&mut record).unwrap();
/// assert_eq!(record.get("y"), Some("true"));
/// assert!(resolution.is_complete());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecordResolver<'a> {
    evaluator: Evaluator<'a>,
}

impl<'a> RecordResolver<'a> {
    /// Creates a resolver whose lookups read `dataset`.
    #[must_use]
    pub const fn new(dataset: &'a Dataset) -> Self {
        Self {
            evaluator: Evaluator::new(dataset),
        }
    }

    /// Resolves `record` in place and returns it.
    ///
    /// If `unresolved_keys` is given, every key still unresolved at the
    /// fixpoint is added to it.
    ///
    /// # Errors
    ///
    /// Any directive error, as soon as it occurs. Values committed before the
    /// error stay in the record.
    pub fn resolve<'r>(
        &self,
        record: &'r mut Record,
        unresolved_keys: Option<&mut UnresolvedKeys>,
    ) -> ResolveResult<&'r mut Record> {
        let resolution = self.resolve_record(record)?;
        if let Some(out) = unresolved_keys {
            out.extend(resolution.unresolved);
        }
        Ok(record)
    }

    /// Resolves `record` in place, reporting step count and leftover keys.
    ///
    /// # Errors
    ///
    /// Any directive error, as soon as it occurs.
    pub fn resolve_record(&self, record: &mut Record) -> ResolveResult<RecordResolution> {
        let mut progress = Progress::new(record);

        let mut steps = 0;
        while let Some(change) = self.step(record, &progress)? {
            steps += 1;
            tracing::debug!(
                key = %change.key,
                evaluated = change.evaluated,
                substituted = ?change.substituted,
                "committed value"
            );
            progress.commit(record, change);
        }

        let unresolved: Vec<String> = record
            .unresolved_keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        tracing::trace!(steps, unresolved = unresolved.len(), "record reached fixpoint");

        Ok(RecordResolution { steps, unresolved })
    }

    /// Finds the first pending key, in record order, whose value would change.
    ///
    /// References are scanned from the current value, so names brought in by
    /// an earlier substitution are picked up. Only one key changes per step
    /// so the record is never mutated while being scanned.
    fn step(&self, record: &Record, progress: &Progress) -> ResolveResult<Option<Change>> {
        for (key, expanded) in &progress.pending {
            let Some(current) = record.get(key) else {
                continue;
            };

            let mut text = current.to_string();
            let mut substituted: Vec<String> = Vec::new();
            let mut waiting = false;
            for name in extract_reference_names(current) {
                if expanded.contains(&name) || substituted.contains(&name) {
                    continue;
                }
                match record.get(&name) {
                    Some(value) if progress.resolved.contains(&name) => {
                        text = text.replace(&placeholder(&name), value);
                        substituted.push(name);
                    }
                    _ => waiting = true,
                }
            }

            let evaluated = !waiting;
            if evaluated {
                text = self.evaluator.evaluate_str(&text)?;
            }

            if text == current {
                tracing::trace!(key = %key, "no progress");
                continue;
            }

            return Ok(Some(Change {
                key: key.clone(),
                value: text,
                substituted,
                evaluated,
            }));
        }
        Ok(None)
    }
}

/// Resolves every value of `record` against `dataset`.
///
/// Convenience wrapper around [`RecordResolver::resolve`].
///
/// # Errors
///
/// Any directive error, as soon as it occurs.
pub fn resolve_all_values<'r>(
    record: &'r mut Record,
    unresolved_keys: Option<&mut UnresolvedKeys>,
    dataset: &Dataset,
) -> ResolveResult<&'r mut Record> {
    RecordResolver::new(dataset).resolve(record, unresolved_keys)
}
