//! Record type

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::is_resolved;

/// One entity's attribute set: an ordered mapping of unique keys to string values.
///
/// Insertion order is preserved and is the order in which the resolver scans keys.
///
/// # Example
///
/// ```
/// use varflat_domain::store::Record;
///
/// let mut record = Record::new();
/// record.set("isbn", "123");
/// record.set("title", "${isbn}-title");
///
/// assert_eq!(record.get("isbn"), Some("123"));
/// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["isbn", "title"]);
/// assert_eq!(record.unresolved_keys(), vec!["title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Sets a value, returning the previous one.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns true if the record contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over keys in stored order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the keys whose values still hold a reference or a directive.
    #[must_use]
    pub fn unresolved_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, value)| !is_resolved(value))
            .map(|(key, _)| key)
            .collect()
    }

    /// Returns true if every value is resolved.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.fields.values().all(|v| is_resolved(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_keeps_position_of_existing_key() {
        let mut record = Record::from([("a", "1"), ("b", "2"), ("c", "3")]);
        let previous = record.set("b", "20");

        assert_eq!(previous.as_deref(), Some("2"));
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "20"), ("c", "3")]
        );
    }

    #[test]
    fn test_unresolved_keys_in_order() {
        let record = Record::from([
            ("y", "$vareq ${x} == 10"),
            ("x", "10"),
            ("z", "${y}"),
        ]);
        assert_eq!(record.unresolved_keys(), vec!["y", "z"]);
        assert!(!record.is_fully_resolved());
    }

    #[test]
    fn test_serde_preserves_order() {
        let json = r#"{"zeta":"1","alpha":"2","mid":"${zeta}"}"#;
        let record: Record = serde_json::from_str(json).unwrap_or_default();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&record).ok().as_deref(), Some(json));
    }
}
