//! Cross-record matcher
//!
//! Finds the single record in a dataset satisfying a conjunction of
//! `key == value` constraints and reads one field from it.

use varflat_domain::{BookRef, Constraint, Dataset, Record, ResolveError, ResolveResult};

const CLAUSE_SEPARATOR: &str = "&&";
const EQUALS: &str = "==";

/// Parses a constraint list such as `name == Clara && lang == RU`.
///
/// `||` is not supported; each `&&`-separated clause must contain exactly one `==`.
///
/// # Errors
///
/// Returns [`ResolveError::Syntax`] for a clause without exactly one `==`.
pub fn parse_constraints(input: &str) -> ResolveResult<Vec<Constraint>> {
    input
        .split(CLAUSE_SEPARATOR)
        .map(|clause| {
            let parts: Vec<&str> = clause.trim().split(EQUALS).collect();
            match parts.as_slice() {
                [key, value] => Ok(Constraint::new(key.trim(), value.trim())),
                _ => Err(ResolveError::syntax(
                    clause.trim(),
                    "search key must have exactly one `==`",
                )),
            }
        })
        .collect()
}

/// Read-only lookups over a dataset snapshot.
///
/// Matched values are returned exactly as stored; the matched record is
/// never resolved first.
#[derive(Debug, Clone, Copy)]
pub struct RecordMatcher<'a> {
    dataset: &'a Dataset,
}

impl<'a> RecordMatcher<'a> {
    /// Creates a matcher over the given dataset.
    #[must_use]
    pub const fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Finds the only record satisfying every constraint.
    ///
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MissingKey`] if a record agrees with every constraint
    ///   key it has but lacks one of them.
    /// - [`ResolveError::AmbiguousMatch`] if a second record matches.
    pub fn find_unique(
        &self,
        constraints: &[Constraint],
        source: &str,
    ) -> ResolveResult<Option<&'a Record>> {
        let mut matched = None;
        for record in self.dataset {
            if !record_matches(record, constraints, source)? {
                continue;
            }
            if matched.is_some() {
                return Err(ResolveError::AmbiguousMatch {
                    constraints: source.to_string(),
                });
            }
            matched = Some(record);
        }
        Ok(matched)
    }

    /// Performs a `$varbookref` lookup.
    ///
    /// Returns `Ok(None)` when no record matches.
    ///
    /// # Errors
    ///
    /// Everything [`Self::find_unique`] returns, plus
    /// [`ResolveError::MissingField`] if the matched record lacks the field.
    pub fn lookup(&self, lookup: &BookRef) -> ResolveResult<Option<&'a str>> {
        let Some(record) = self.find_unique(&lookup.constraints, &lookup.source)? else {
            return Ok(None);
        };

        record
            .get(&lookup.field)
            .map(Some)
            .ok_or_else(|| ResolveError::MissingField {
                field: lookup.field.clone(),
            })
    }
}

/// A mismatch on any present key rules the record out. Only a record that
/// agrees on every key it has is reported for the keys it lacks.
fn record_matches(
    record: &Record,
    constraints: &[Constraint],
    source: &str,
) -> ResolveResult<bool> {
    let mut missing = None;
    for constraint in constraints {
        match record.get(&constraint.key) {
            None => {
                missing.get_or_insert(&constraint.key);
            }
            Some(value) if value != constraint.value => return Ok(false),
            Some(_) => {}
        }
    }

    match missing {
        Some(key) => Err(ResolveError::MissingKey {
            key: key.clone(),
            constraints: source.to_string(),
        }),
        None => Ok(true),
    }
}
