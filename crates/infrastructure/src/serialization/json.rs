//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::SerializationError;

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Map keys in insertion order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Serializes a value to deterministic JSON bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    Ok(to_json_stable(value)?.into_bytes())
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varflat_domain::{Dataset, Record};

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let record = Record::from([("key", "value")]);
        let json = to_json_stable(&record).expect("serialization should work");
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_stable_serialization_uses_two_space_indent() {
        let dataset: Dataset = vec![Record::from([("key", "value")])].into();
        let json = to_json_stable(&dataset).expect("serialization should work");
        assert_eq!(json, "[\n  {\n    \"key\": \"value\"\n  }\n]\n");
    }

    #[test]
    fn test_record_keys_keep_insertion_order() {
        let record = Record::from([("zebra", "1"), ("apple", "2"), ("mango", "3")]);
        let json = to_json_stable(&record).expect("serialization should work");

        let zebra = json.find("zebra").expect("zebra should be in json");
        let apple = json.find("apple").expect("apple should be in json");
        let mango = json.find("mango").expect("mango should be in json");
        assert!(zebra < apple);
        assert!(apple < mango);
    }

    #[test]
    fn test_from_json_bytes_keeps_order() {
        let json = r#"[{"b": "${a}", "a": "1"}]"#;
        let dataset: Dataset = from_json_bytes(json.as_bytes()).expect("should parse");
        let keys: Vec<&str> = dataset.get(0).expect("one record").keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_from_json_bytes_rejects_non_string_values() {
        let json = r#"[{"count": 3}]"#;
        let result: Result<Dataset, _> = from_json_bytes(json.as_bytes());
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
