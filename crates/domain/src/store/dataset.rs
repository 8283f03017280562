//! Dataset type

use serde::{Deserialize, Serialize};

use super::record::Record;

/// An ordered collection of records.
///
/// Cross-record lookups scan the dataset in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Returns the records as a slice.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Gets a record by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Gets a mutable record by position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    /// Replaces the record at `index`, returning the old one.
    ///
    /// Returns `None` and leaves the dataset unchanged if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, record: Record) -> Option<Record> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Iterates over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterates mutably over records in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the dataset, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_in_bounds() {
        let mut dataset: Dataset = vec![Record::from([("isbn", "1")])].into();
        let old = dataset.replace(0, Record::from([("isbn", "2")]));

        assert_eq!(old.and_then(|r| r.get("isbn").map(str::to_string)).as_deref(), Some("1"));
        assert_eq!(dataset.get(0).and_then(|r| r.get("isbn")), Some("2"));
    }

    #[test]
    fn test_replace_out_of_bounds_is_noop() {
        let mut dataset = Dataset::new();
        assert!(dataset.replace(3, Record::new()).is_none());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_deserialize_array_of_objects() {
        let json = r#"[{"isbn":"123","name":"Clara"},{"isbn":"456","name":"Dana"}]"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap_or_default();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(1).and_then(|r| r.get("name")), Some("Dana"));
    }
}
