//! Condition grammar
//!
//! ```text
//! Condition  := OrTerm ("||" OrTerm)*
//! OrTerm     := Comparison ("&&" Comparison)*
//! Comparison := "true" | "false" | operand ("==" | "!=") operand
//! ```
//!
//! Operands are trimmed and compared as exact strings. The whole condition
//! is parsed before anything is evaluated, so a malformed comparison is an
//! error wherever it appears.

use varflat_domain::{Comparison, Condition, EqualityOperator, ResolveError, ResolveResult};

const OR: &str = "||";
const AND: &str = "&&";

/// Parses a condition into its `||` of `&&` form.
///
/// # Errors
///
/// Returns [`ResolveError::Syntax`] if any comparison has neither `==` nor `!=`
/// and is not a boolean literal.
pub fn parse_condition(input: &str) -> ResolveResult<Condition> {
    let any_of = input
        .split(OR)
        .map(|alternative| {
            alternative
                .split(AND)
                .map(parse_comparison)
                .collect::<ResolveResult<Vec<_>>>()
        })
        .collect::<ResolveResult<Vec<_>>>()?;

    Ok(Condition::new(any_of))
}

/// Parses one comparison.
///
/// `==` is looked for first; only if it is absent is `!=` tried. The operands
/// are the trimmed text on either side of the first occurrence.
///
/// # Errors
///
/// Returns [`ResolveError::Syntax`] if the text is neither a literal nor a comparison.
pub fn parse_comparison(input: &str) -> ResolveResult<Comparison> {
    let text = input.trim();
    match text {
        "true" => return Ok(Comparison::Literal(true)),
        "false" => return Ok(Comparison::Literal(false)),
        _ => {}
    }

    let (operator, split) = if let Some(pos) = text.find(EqualityOperator::Equals.symbol()) {
        (EqualityOperator::Equals, pos)
    } else if let Some(pos) = text.find(EqualityOperator::NotEquals.symbol()) {
        (EqualityOperator::NotEquals, pos)
    } else {
        return Err(ResolveError::syntax(text, "expected `==` or `!=`"));
    };

    let width = operator.symbol().len();
    Ok(Comparison::Compare {
        left: text[..split].trim().to_string(),
        operator,
        right: text[split + width..].trim().to_string(),
    })
}

/// Parses and evaluates a condition in one go.
///
/// # Errors
///
/// Returns [`ResolveError::Syntax`] if the condition is malformed.
pub fn evaluate_condition(input: &str) -> ResolveResult<bool> {
    parse_condition(input).map(|condition| condition.evaluate())
}
