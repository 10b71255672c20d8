//! Value expression evaluation.
//!
//! A value expression is a sequence of terms joined by `+`. Each term is a
//! decimal or hexadecimal literal, or a dotted reference to a member of another
//! enum (`VehicleArea.GLOBAL`, `p.Color.RED`). References are handed to a caller
//! supplied resolver; this module knows nothing about imports or files.
//!
//! Only addition (and a leading `-` on a term) is evaluated. Expressions using
//! other operators are summed term by term, which is approximate; a warning is
//! logged when that happens.

use thiserror::Error;

use crate::parser::{SyntaxKind, Token, tokenize};

/// Evaluation failure, before file/enum/member context is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A dotted reference that names no reachable enum member.
    #[error("unresolved symbol `{0}`")]
    UnresolvedSymbol(String),

    /// A term that is neither a number nor a dotted reference, or a sum that
    /// overflows.
    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),

    /// A dotted reference whose qualifier matches more than one import.
    #[error("ambiguous reference `{symbol}` matches {}", candidates.join(", "))]
    AmbiguousReference {
        symbol: String,
        candidates: Vec<String>,
    },
}

/// One term of a value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Literal(i64),
    Symbol(String),
}

/// A term with its sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTerm {
    pub negated: bool,
    pub term: Term,
}

/// Terms of an expression, plus whether unsupported operators were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terms {
    pub terms: Vec<SignedTerm>,
    pub approximate: bool,
}

/// Split an expression into its terms.
pub fn parse_terms(expression: &str) -> Result<Terms, EvalError> {
    let tokens: Vec<Token<'_>> = tokenize(expression)
        .into_iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != SyntaxKind::DocComment)
        .collect();

    let mut out = Terms::default();
    let mut negated = false;
    let mut pos = 0;

    while let Some(token) = tokens.get(pos) {
        pos += 1;
        match token.kind {
            SyntaxKind::Integer | SyntaxKind::HexInteger => {
                out.terms.push(SignedTerm {
                    negated,
                    term: Term::Literal(parse_literal(token.text)?),
                });
                negated = false;
            }
            SyntaxKind::Ident => {
                let mut symbol = token.text.to_string();
                while let [dot, next, ..] = &tokens[pos..] {
                    if dot.kind != SyntaxKind::Dot || next.kind != SyntaxKind::Ident {
                        break;
                    }
                    symbol.push('.');
                    symbol.push_str(next.text);
                    pos += 2;
                }
                if !symbol.contains('.') {
                    return Err(EvalError::InvalidLiteral(symbol));
                }
                out.terms.push(SignedTerm {
                    negated,
                    term: Term::Symbol(symbol),
                });
                negated = false;
            }
            SyntaxKind::Minus => negated = !negated,
            SyntaxKind::Plus | SyntaxKind::LParen | SyntaxKind::RParen => {}
            SyntaxKind::Operator | SyntaxKind::Colon | SyntaxKind::At => out.approximate = true,
            _ => return Err(EvalError::InvalidLiteral(token.text.to_string())),
        }
    }

    if negated {
        return Err(EvalError::InvalidLiteral(expression.trim().to_string()));
    }
    Ok(out)
}

/// Parse a single integer literal: hex when it starts with `0x`/`0X`, else decimal.
pub fn parse_literal(text: &str) -> Result<i64, EvalError> {
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => text.parse::<i64>(),
    };
    parsed.map_err(|_| EvalError::InvalidLiteral(text.to_string()))
}

/// Evaluate `expression` to an integer.
///
/// An expression with no terms evaluates to `default_if_empty`, which callers
/// use for implicit successor values. Dotted references are passed to
/// `resolve_symbol` verbatim.
pub fn evaluate<F>(
    expression: &str,
    default_if_empty: i64,
    mut resolve_symbol: F,
) -> Result<i64, EvalError>
where
    F: FnMut(&str) -> Result<i64, EvalError>,
{
    let parsed = parse_terms(expression)?;
    if parsed.terms.is_empty() {
        return Ok(default_if_empty);
    }
    if parsed.approximate {
        tracing::warn!(
            expression,
            "unsupported operator in value expression; summing terms"
        );
    }

    let mut total: i64 = 0;
    for SignedTerm { negated, term } in &parsed.terms {
        let value = match term {
            Term::Literal(value) => *value,
            Term::Symbol(symbol) => resolve_symbol(symbol)?,
        };
        let value = if *negated { value.checked_neg() } else { Some(value) };
        total = value
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| EvalError::InvalidLiteral(expression.trim().to_string()))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rstest::rstest;

    fn no_symbols(symbol: &str) -> Result<i64, EvalError> {
        Err(EvalError::UnresolvedSymbol(symbol.to_string()))
    }

    #[rstest]
    #[case("5", 5)]
    #[case("0x10", 16)]
    #[case("0X1f", 31)]
    #[case("0x10 + 2", 18)]
    #[case("-1", -1)]
    #[case("(0x100 + 0x20)", 0x120)]
    #[case("0xFFFFFFFF", 4_294_967_295)]
    fn test_literal_expressions(#[case] expression: &str, #[case] expected: i64) {
        assert_eq!(evaluate(expression, 0, no_symbols).unwrap(), expected);
    }

    #[test]
    fn test_empty_expression_uses_default() {
        assert_eq!(evaluate("", 7, no_symbols).unwrap(), 7);
        assert_eq!(evaluate("  /* nothing */ ", 3, no_symbols).unwrap(), 3);
    }

    #[test]
    fn test_symbols_go_through_resolver() {
        let mut seen = Vec::new();
        let value = evaluate("p.Color.RED + VehicleArea.GLOBAL + 1", 0, |symbol| {
            seen.push(symbol.to_string());
            Ok(match symbol {
                "p.Color.RED" => 1,
                "VehicleArea.GLOBAL" => 0x0100_0000,
                _ => unreachable!(),
            })
        })
        .unwrap();

        assert_eq!(value, 0x0100_0002);
        assert_eq!(seen, vec!["p.Color.RED", "VehicleArea.GLOBAL"]);
    }

    #[test]
    fn test_negated_symbol() {
        let value = evaluate("10 - E.A", 0, |_| Ok(3)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_unresolved_symbol_propagates() {
        let err = evaluate("Missing.X", 0, no_symbols).unwrap_err();
        assert_eq!(err, EvalError::UnresolvedSymbol("Missing.X".to_string()));
    }

    #[test]
    fn test_bare_identifier_is_invalid() {
        let err = evaluate("RED + 1", 0, no_symbols).unwrap_err();
        assert_eq!(err, EvalError::InvalidLiteral("RED".to_string()));
    }

    #[test]
    fn test_unsupported_operators_are_summed() {
        let parsed = parse_terms("1 << 4 | 2").unwrap();
        assert!(parsed.approximate);
        assert_eq!(evaluate("1 << 4 | 2", 0, no_symbols).unwrap(), 7);
    }

    #[test]
    fn test_overflow_is_invalid() {
        assert!(evaluate("0x7FFFFFFFFFFFFFFF + 1", 0, no_symbols).is_err());
        assert!(parse_literal("99999999999999999999").is_err());
    }

    #[test]
    fn test_dangling_minus_is_invalid() {
        assert!(evaluate("1 -", 0, no_symbols).is_err());
    }
}
