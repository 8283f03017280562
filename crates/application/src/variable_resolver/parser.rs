//! Reference scanner for `${key}` syntax
//!
//! Scans strings left to right for embedded key references, with positions.

use std::ops::Range;

use varflat_domain::store::{REFERENCE_CLOSE, REFERENCE_OPEN};

/// Represents a scanned key reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    /// The key name (without `${` and `}`), untrimmed.
    pub name: String,

    /// Whether a closing `}` was found. An unclosed reference runs to the end of the input.
    pub closed: bool,

    /// Byte range in the original string covered by this reference.
    pub span: Range<usize>,
}

impl KeyReference {
    /// Returns the exact placeholder text (`${name}`) this reference stands for.
    #[must_use]
    pub fn placeholder(&self) -> String {
        placeholder(&self.name)
    }
}

/// Builds the placeholder text for a key name.
#[must_use]
pub fn placeholder(name: &str) -> String {
    format!("{REFERENCE_OPEN}{name}{REFERENCE_CLOSE}")
}

/// Scans a string and extracts all key references in order.
///
/// After each reference the scan resumes past its closing brace, so
/// references never overlap. A `${` with no closing brace yields a name
/// running to the end of the input; callers simply never find that key.
///
/// # Examples
///
/// ```
/// use varflat_application::variable_resolver::parser::parse_references;
///
/// let refs = parse_references("${name} bought ${count} books");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "name");
/// assert_eq!(refs[1].name, "count");
/// ```
#[must_use]
pub fn parse_references(input: &str) -> Vec<KeyReference> {
    let open = REFERENCE_OPEN.as_bytes();
    let bytes = input.as_bytes();
    let mut references = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == open[0] && bytes[i + 1] == open[1] {
            let start = i;
            let name_start = i + 2;
            // '}' is ASCII, so any position found here is a char boundary.
            let close = input[name_start..]
                .find(REFERENCE_CLOSE)
                .map(|offset| name_start + offset);

            let (name_end, end, closed) = match close {
                Some(pos) => (pos, pos + 1, true),
                None => (bytes.len(), bytes.len(), false),
            };

            references.push(KeyReference {
                name: input[name_start..name_end].to_string(),
                closed,
                span: start..end,
            });
            i = end;
        } else {
            i += 1;
        }
    }

    references
}

/// Returns true if the input contains a `${` reference opener.
#[must_use]
pub fn has_references(input: &str) -> bool {
    input.contains(REFERENCE_OPEN)
}

/// Extracts just the key names, in order, duplicates included.
#[must_use]
pub fn extract_reference_names(input: &str) -> Vec<String> {
    parse_references(input)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_reference() {
        let refs = parse_references("${name}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert!(refs[0].closed);
        assert_eq!(refs[0].span, 0..7);
    }

    #[test]
    fn test_parse_multiple_references() {
        let names = extract_reference_names("${base}/books/${isbn}.${ext}");
        assert_eq!(names, vec!["base", "isbn", "ext"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let names = extract_reference_names("${a}-${a}");
        assert_eq!(names, vec!["a", "a"]);
    }

    #[test]
    fn test_adjacent_references() {
        let names = extract_reference_names("${a}${b}${c}");
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_references() {
        assert!(parse_references("Hello, World!").is_empty());
        assert!(parse_references("{name}").is_empty());
        assert!(parse_references("$name").is_empty());
        assert!(parse_references("").is_empty());
    }

    #[test]
    fn test_unclosed_reference_runs_to_end() {
        let refs = parse_references("title: ${name");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert!(!refs[0].closed);
        assert_eq!(refs[0].span, 7..13);
    }

    #[test]
    fn test_opener_at_end_yields_empty_name() {
        let refs = parse_references("price ${");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "");
        assert!(!refs[0].closed);
    }

    #[test]
    fn test_scan_resumes_after_closing_brace() {
        // The inner opener is swallowed by the first reference's name.
        let names = extract_reference_names("${a${b}c}${d}");
        assert_eq!(names, vec!["a${b", "d"]);
    }

    #[test]
    fn test_names_are_not_trimmed() {
        let names = extract_reference_names("${ name }");
        assert_eq!(names, vec![" name "]);
    }

    #[test]
    fn test_non_ascii_text() {
        let input = "Книга ${название}: ${автор}";
        let refs = parse_references(input);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "название");
        assert_eq!(&input[refs[1].span.clone()], "${автор}");
    }

    #[test]
    fn test_placeholder_round_trip() {
        let input = "x ${key} y";
        let refs = parse_references(input);
        assert_eq!(refs[0].placeholder(), "${key}");
        assert_eq!(&input[refs[0].span.clone()], refs[0].placeholder());
    }

    #[test]
    fn test_has_references() {
        assert!(has_references("${a}"));
        assert!(has_references("${unclosed"));
        assert!(!has_references("{a}"));
    }
}
