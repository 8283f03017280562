//! Directive parsing and evaluation
//!
//! Turns a fully substituted value into a [`Directive`] by its prefix and
//! computes the final value.

use varflat_domain::store::DIRECTIVE_PREFIX;
use varflat_domain::{
    BookRef, Dataset, Directive, DirectiveKind, ResolveError, ResolveResult, is_resolved,
};

use super::condition::parse_condition;
use super::matcher::{RecordMatcher, parse_constraints};

const THEN_MARKER: &str = "??";
const ELSE_MARKER: &str = "::";
const FIELD_MARKER: &str = "!!";

/// Parses a fully substituted value into a directive.
///
/// Values without the `$var` prefix are plain templates. The separators
/// `??`, `::` and `!!` are split at their first occurrence.
///
/// # Errors
///
/// Returns [`ResolveError::Syntax`] for an unknown `$var*` prefix, a missing
/// separator, or a malformed condition or constraint list.
///
/// # Examples
///
/// ```
/// use varflat_application::variable_resolver::evaluator::parse_directive;
/// use varflat_domain::{Directive, DirectiveKind};
///
/// let directive = parse_directive("$varif 5 == 10 ?? yes :: no").unwrap();
/// assert_eq!(directive.kind(), Some(DirectiveKind::If));
///
/// let plain = parse_directive("just text").unwrap();
/// assert_eq!(plain, Directive::Template("just text".to_string()));
/// ```
pub fn parse_directive(input: &str) -> ResolveResult<Directive> {
    if !input.starts_with(DIRECTIVE_PREFIX) {
        return Ok(Directive::Template(input.to_string()));
    }

    let Some((kind, body)) = DirectiveKind::ALL
        .iter()
        .find_map(|kind| input.strip_prefix(kind.prefix()).map(|body| (*kind, body)))
    else {
        return Err(ResolveError::syntax(
            input,
            "unknown directive, expected $vareq, $varif or $varbookref",
        ));
    };

    match kind {
        DirectiveKind::Eq => parse_condition(body).map(Directive::Eq),
        DirectiveKind::If => parse_if(body),
        DirectiveKind::BookRef => parse_book_ref(body).map(Directive::BookRef),
    }
}

fn parse_if(body: &str) -> ResolveResult<Directive> {
    let Some((condition, branches)) = body.split_once(THEN_MARKER) else {
        return Err(ResolveError::syntax(
            format!("{} {body}", DirectiveKind::If),
            "missing `??`",
        ));
    };

    let branches = branches.trim();
    let Some((then_value, else_value)) = branches.split_once(ELSE_MARKER) else {
        return Err(ResolveError::syntax(
            format!("{} {body}", DirectiveKind::If),
            "missing `::` after `??`",
        ));
    };

    Ok(Directive::If {
        condition: parse_condition(condition.trim())?,
        then_value: then_value.trim().to_string(),
        else_value: else_value.trim().to_string(),
    })
}

fn parse_book_ref(body: &str) -> ResolveResult<BookRef> {
    let Some((constraints, field)) = body.split_once(FIELD_MARKER) else {
        return Err(ResolveError::syntax(
            format!("{} {body}", DirectiveKind::BookRef),
            "missing `!!`",
        ));
    };

    let source = constraints.trim();
    Ok(BookRef {
        source: source.to_string(),
        constraints: parse_constraints(source)?,
        field: field.trim().to_string(),
    })
}

/// Evaluates directives against a read-only dataset.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    matcher: RecordMatcher<'a>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator whose `$varbookref` lookups read `dataset`.
    #[must_use]
    pub const fn new(dataset: &'a Dataset) -> Self {
        Self {
            matcher: RecordMatcher::new(dataset),
        }
    }

    /// Parses and evaluates a fully substituted value.
    ///
    /// # Errors
    ///
    /// Any syntax or lookup error from parsing or evaluation.
    pub fn evaluate_str(&self, input: &str) -> ResolveResult<String> {
        let directive = parse_directive(input)?;
        self.evaluate(&directive)
    }

    /// Computes the final value of a directive.
    ///
    /// A `$varbookref` with no matching record yields the empty string.
    ///
    /// # Errors
    ///
    /// Returns lookup errors from `$varbookref`.
    pub fn evaluate(&self, directive: &Directive) -> ResolveResult<String> {
        match directive {
            Directive::Template(text) => Ok(text.clone()),
            Directive::Eq(condition) => Ok(condition.evaluate().to_string()),
            Directive::If {
                condition,
                then_value,
                else_value,
            } => Ok(if condition.evaluate() {
                then_value.clone()
            } else {
                else_value.clone()
            }),
            Directive::BookRef(lookup) => {
                let value = self.matcher.lookup(lookup)?.unwrap_or_default();
                if !is_resolved(value) {
                    tracing::warn!(
                        constraints = %lookup.source,
                        field = %lookup.field,
                        value,
                        "looked-up field is itself unresolved in its own record"
                    );
                }
                Ok(value.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varflat_domain::{Comparison, Condition, Constraint, Record};

    fn books() -> Dataset {
        vec![
            Record::from([("isbn", "123"), ("name", "Clara"), ("lang", "RU")]),
            Record::from([("isbn", "456"), ("name", "Dana"), ("lang", "RU")]),
        ]
        .into()
    }

    fn eval(input: &str) -> ResolveResult<String> {
        let dataset = books();
        Evaluator::new(&dataset).evaluate_str(input)
    }

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(eval("The Book").unwrap(), "The Book");
        assert_eq!(eval("").unwrap(), "");
        assert_eq!(eval(" $vareq not at start").unwrap(), " $vareq not at start");
    }

    #[test]
    fn test_vareq() {
        assert_eq!(eval("$vareq 10 == 10").unwrap(), "true");
        assert_eq!(eval("$vareq 10 == 1").unwrap(), "false");
        assert_eq!(eval("$vareq Anna != Anna || true").unwrap(), "true");
    }

    #[test]
    fn test_varif() {
        assert_eq!(eval("$varif 5 == 10 ?? yes :: no").unwrap(), "no");
        assert_eq!(eval("$varif 100 == 100  ?? 10    :: 20").unwrap(), "10");
    }

    #[test]
    fn test_varif_branches_are_verbatim() {
        assert_eq!(eval("$varif true ?? $vareq 1 == 2 :: x").unwrap(), "$vareq 1 == 2");
        assert_eq!(eval("$varif false ?? a :: b :: c").unwrap(), "b :: c");
    }

    #[test]
    fn test_varif_missing_question_marks() {
        let err = eval("$varif 1 == 1 : yes :: no").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("??"));
    }

    #[test]
    fn test_varif_missing_colons() {
        let err = eval("$varif 1 == 1 ?? yes").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("::"));
    }

    #[test]
    fn test_varif_colons_before_question_marks_do_not_count() {
        assert!(eval("$varif a :: b ?? yes").unwrap_err().is_syntax());
    }

    #[test]
    fn test_varbookref() {
        assert_eq!(eval("$varbookref isbn == 123 !! name").unwrap(), "Clara");
        assert_eq!(eval("$varbookref name == Dana && lang == RU !! isbn").unwrap(), "456");
    }

    #[test]
    fn test_varbookref_no_match_is_empty() {
        assert_eq!(eval("$varbookref isbn == 999 !! name").unwrap(), "");
    }

    #[test]
    fn test_varbookref_ambiguous() {
        let err = eval("$varbookref lang == RU !! name").unwrap_err();
        assert!(matches!(err, ResolveError::AmbiguousMatch { .. }));
    }

    #[test]
    fn test_varbookref_missing_separator() {
        assert!(eval("$varbookref isbn == 123 name").unwrap_err().is_syntax());
    }

    #[test]
    fn test_unknown_directive() {
        let err = eval("$varfoo bar").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.to_string().contains("$varfoo bar"));
    }

    #[test]
    fn test_prefix_requires_trailing_space() {
        assert!(eval("$vareq").unwrap_err().is_syntax());
        assert!(eval("$vareq\t1 == 1").unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_book_ref_shape() {
        let directive =
            parse_directive("$varbookref  name == Clara && lang == RU  !!  title ").unwrap();
        assert_eq!(
            directive,
            Directive::BookRef(BookRef {
                source: "name == Clara && lang == RU".to_string(),
                constraints: vec![Constraint::new("name", "Clara"), Constraint::new("lang", "RU")],
                field: "title".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_eq_shape() {
        let directive = parse_directive("$vareq true").unwrap();
        assert_eq!(directive, Directive::Eq(Condition::single(Comparison::Literal(true))));
    }
}
