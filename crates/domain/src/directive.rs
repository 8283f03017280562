//! Directive types
//!
//! A directive is what a fully substituted value turns into before it is
//! evaluated. Parsing lives in the application layer; the types and the
//! pure boolean evaluation live here.

use std::fmt;

/// The directive keywords recognized at the start of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `$vareq <condition>`
    Eq,
    /// `$varif <condition> ?? <then> :: <else>`
    If,
    /// `$varbookref <constraints> !! <field>`
    BookRef,
}

impl DirectiveKind {
    /// All recognized kinds.
    pub const ALL: [Self; 3] = [Self::Eq, Self::If, Self::BookRef];

    /// The prefix, including its trailing space, that introduces this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Eq => "$vareq ",
            Self::If => "$varif ",
            Self::BookRef => "$varbookref ",
        }
    }

    /// The bare keyword, for messages.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Eq => "$vareq",
            Self::If => "$varif",
            Self::BookRef => "$varbookref",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Equality operators allowed in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualityOperator {
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
}

impl EqualityOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
        }
    }
}

/// A single comparison inside a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// The literal `true` or `false`.
    Literal(bool),
    /// `left == right` or `left != right`, compared as exact strings.
    Compare {
        /// Trimmed left operand.
        left: String,
        /// The operator.
        operator: EqualityOperator,
        /// Trimmed right operand.
        right: String,
    },
}

impl Comparison {
    /// Evaluates the comparison. No numeric coercion: `"0" == "0.0"` is false.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        match self {
            Self::Literal(value) => *value,
            Self::Compare {
                left,
                operator,
                right,
            } => {
                let equal = left == right;
                match operator {
                    EqualityOperator::Equals => equal,
                    EqualityOperator::NotEquals => !equal,
                }
            }
        }
    }
}

/// A boolean condition in disjunctive form: `||` of `&&` groups.
///
/// `a && b || c && d` is held as `[[a, b], [c, d]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    any_of: Vec<Vec<Comparison>>,
}

impl Condition {
    /// Creates a condition from its `||` alternatives, each a list of `&&` terms.
    #[must_use]
    pub const fn new(any_of: Vec<Vec<Comparison>>) -> Self {
        Self { any_of }
    }

    /// A condition made of one comparison.
    #[must_use]
    pub fn single(comparison: Comparison) -> Self {
        Self::new(vec![vec![comparison]])
    }

    /// Returns the `||` alternatives.
    #[must_use]
    pub fn alternatives(&self) -> &[Vec<Comparison>] {
        &self.any_of
    }

    /// Evaluates the condition. `&&` binds tighter than `||`.
    #[must_use]
    pub fn evaluate(&self) -> bool {
        self.any_of
            .iter()
            .any(|group| group.iter().all(Comparison::evaluate))
    }
}

/// One `key == value` clause of a `$varbookref` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Trimmed key name.
    pub key: String,
    /// Trimmed expected value.
    pub value: String,
}

impl Constraint {
    /// Creates a new constraint.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A cross-record lookup: every constraint must hold, then `field` is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRef {
    /// The constraint list as written, kept for error messages.
    pub source: String,
    /// Parsed `key == value` clauses, all of which must match.
    pub constraints: Vec<Constraint>,
    /// The field to read from the matched record.
    pub field: String,
}

/// A fully substituted value, classified by its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// No directive prefix; the text is the final value.
    Template(String),
    /// `$vareq`: evaluates to `"true"` or `"false"`.
    Eq(Condition),
    /// `$varif`: picks one of two verbatim branches.
    If {
        /// The condition to test.
        condition: Condition,
        /// Returned when the condition holds.
        then_value: String,
        /// Returned otherwise.
        else_value: String,
    },
    /// `$varbookref`: reads a field from the single matching record.
    BookRef(BookRef),
}

impl Directive {
    /// Returns the directive kind, or `None` for a plain template.
    #[must_use]
    pub const fn kind(&self) -> Option<DirectiveKind> {
        match self {
            Self::Template(_) => None,
            Self::Eq(_) => Some(DirectiveKind::Eq),
            Self::If { .. } => Some(DirectiveKind::If),
            Self::BookRef(_) => Some(DirectiveKind::BookRef),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(left: &str, operator: EqualityOperator, right: &str) -> Comparison {
        Comparison::Compare {
            left: left.to_string(),
            operator,
            right: right.to_string(),
        }
    }

    #[test]
    fn test_comparison_is_exact_string_equality() {
        assert!(!cmp("0", EqualityOperator::Equals, "1").evaluate());
        assert!(!cmp("0", EqualityOperator::Equals, "0.0").evaluate());
        assert!(cmp("0", EqualityOperator::Equals, "0").evaluate());
        assert!(cmp("Anna", EqualityOperator::NotEquals, "anna").evaluate());
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // true && false || true
        let condition = Condition::new(vec![
            vec![Comparison::Literal(true), Comparison::Literal(false)],
            vec![Comparison::Literal(true)],
        ]);
        assert!(condition.evaluate());

        // false || true && false
        let condition = Condition::new(vec![
            vec![Comparison::Literal(false)],
            vec![Comparison::Literal(true), Comparison::Literal(false)],
        ]);
        assert!(!condition.evaluate());
    }

    #[test]
    fn test_prefixes_carry_trailing_space() {
        for kind in DirectiveKind::ALL {
            assert!(kind.prefix().starts_with("$var"));
            assert!(kind.prefix().ends_with(' '));
            assert_eq!(kind.prefix().trim_end(), kind.keyword());
        }
    }

    #[test]
    fn test_directive_kind() {
        assert_eq!(Directive::Template("x".to_string()).kind(), None);
        assert_eq!(
            Directive::Eq(Condition::single(Comparison::Literal(true))).kind(),
            Some(DirectiveKind::Eq)
        );
    }
}
