//! Restricted payoff expression language.
//!
//! A payoff is a formula over the terminal-price vector `ST`, e.g.
//! `maximum(ST - 100, 0)`. Expressions are parsed into a resolved AST
//! before any evaluation happens, so only the following are reachable:
//!
//! - numeric literals (`100`, `2.5`, `1e-3`)
//! - the variable `ST`
//! - arithmetic `+ - * /`, power `**` / `^`, unary `-` / `+`
//! - comparisons `< <= > >= == !=` yielding `1.0` / `0.0` masks
//! - elementwise logic `&`, `|`, `~` on those masks
//! - functions `maximum`/`max`, `minimum`/`min`, `abs`, `exp`, `log`,
//!   `sqrt`, `pow`, `where`
//!
//! Anything else (other identifiers, attribute access, strings, indexing,
//! assignment) is rejected with [`InvalidExpression`].
//!
//! ## Usage
//!
//! ```
//! use pricer_models::payoff::PayoffExpr;
//!
//! let payoff = PayoffExpr::parse("maximum(ST - 100, 0)").unwrap();
//! assert_eq!(payoff.evaluate(&[90.0, 110.0]), vec![0.0, 10.0]);
//!
//! // Path-independent expressions broadcast to every path.
//! let constant = PayoffExpr::parse("5").unwrap();
//! assert_eq!(constant.evaluate(&[90.0, 110.0]), vec![5.0, 5.0]);
//! ```

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

use std::fmt;
use std::str::FromStr;

pub use ast::{BinOp, Expr, ExprKind, Function, UnaryOp, TERMINAL_PRICE};
pub use error::{ExpressionError, InvalidExpression, Span};
pub use eval::Value;
pub use parser::MAX_DEPTH;

/// A parsed, validated payoff expression.
///
/// Parsing once and evaluating many times is the intended use: the pricer
/// validates the expression before spending any effort on simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffExpr {
    source: String,
    ast: Expr,
}

impl PayoffExpr {
    /// Parses and validates `source`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpression`] if the expression is syntactically
    /// invalid, references a name other than `ST`, calls a function outside
    /// the allow-list, or nests deeper than [`MAX_DEPTH`].
    pub fn parse(source: &str) -> Result<Self, InvalidExpression> {
        let ast = parser::parse(source).map_err(|e| InvalidExpression::new(source, e))?;
        Ok(Self {
            source: source.to_string(),
            ast,
        })
    }

    /// Returns the expression as written.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the resolved syntax tree.
    #[inline]
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Evaluates the payoff on every terminal price.
    ///
    /// The result always has the same length as `terminal_prices`. A
    /// path-independent expression is broadcast; non-finite values are
    /// returned as computed.
    pub fn evaluate(&self, terminal_prices: &[f64]) -> Vec<f64> {
        let value = eval::eval(&self.ast, terminal_prices);
        if value.is_scalar() {
            tracing::debug!(
                expression = %self.source,
                paths = terminal_prices.len(),
                "payoff does not depend on ST; broadcasting scalar result"
            );
        }
        value.into_vec(terminal_prices.len())
    }
}

impl FromStr for PayoffExpr {
    type Err = InvalidExpression;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PayoffExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses `expression` and evaluates it on `terminal_prices` in one step.
///
/// # Errors
///
/// Returns [`InvalidExpression`] under the same conditions as
/// [`PayoffExpr::parse`].
///
/// # Examples
///
/// ```
/// use pricer_models::payoff::evaluate;
///
/// let payoffs = evaluate("(ST > 100) * 10", &[95.0, 105.0]).unwrap();
/// assert_eq!(payoffs, vec![0.0, 10.0]);
///
/// assert!(evaluate("os", &[100.0]).is_err());
/// ```
pub fn evaluate(expression: &str, terminal_prices: &[f64]) -> Result<Vec<f64>, InvalidExpression> {
    Ok(PayoffExpr::parse(expression)?.evaluate(terminal_prices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_and_evaluate() {
        let payoff = PayoffExpr::parse("maximum(ST - 100, 0)").unwrap();
        assert_eq!(payoff.source(), "maximum(ST - 100, 0)");
        assert_eq!(payoff.to_string(), "maximum(ST - 100, 0)");
        assert_eq!(
            payoff.evaluate(&[50.0, 100.0, 150.0]),
            vec![0.0, 0.0, 50.0]
        );
    }

    #[test]
    fn test_from_str() {
        let payoff: PayoffExpr = "ST * 2".parse().unwrap();
        assert_eq!(payoff.evaluate(&[1.5]), vec![3.0]);
        assert!("ST +".parse::<PayoffExpr>().is_err());
    }

    #[test]
    fn test_scalar_broadcast() {
        assert_eq!(evaluate("5", &[1.0, 2.0, 3.0]).unwrap(), vec![5.0; 3]);
        assert_eq!(evaluate("0", &[1.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_unsafe_expressions_rejected() {
        for source in [
            "__import__('os').system('echo hi')",
            "os",
            "ST.real",
            "open('x')",
            "ST[0]",
            "x = 1",
            "lambda: 1",
            "",
            "   ",
        ] {
            let err = evaluate(source, &[100.0]).unwrap_err();
            assert!(
                err.to_string().starts_with("Invalid payoff expression: "),
                "{source}: {err}"
            );
            assert_eq!(err.expression(), source);
        }
    }

    #[test]
    fn test_long_operator_chain_rejected() {
        for terms in [5_000, 200_000] {
            let source = format!("ST{}", " + ST".repeat(terms));
            let err = evaluate(&source, &[1.0, 2.0]).unwrap_err();
            assert!(matches!(err.cause(), ExpressionError::Parse { .. }));
        }

        let short = format!("ST{}", " + ST".repeat(9));
        assert_eq!(evaluate(&short, &[1.0, 2.0]).unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_error_points_at_offender() {
        let err = PayoffExpr::parse("maximum(ST - K, 0)").unwrap_err();
        match err.cause() {
            ExpressionError::UnknownIdentifier { name, span } => {
                assert_eq!(name, "K");
                assert_eq!(*span, Span::new(13, 14));
            }
            other => panic!("unexpected cause {other:?}"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_output_length_matches_input(
            prices in prop::collection::vec(0.01f64..1000.0, 0..64)
        ) {
            for source in ["maximum(ST - 100, 0)", "5", "where(ST > 50, 1, 0)"] {
                let out = evaluate(source, &prices).unwrap();
                prop_assert_eq!(out.len(), prices.len());
            }
        }

        #[test]
        fn prop_call_payoff_non_negative(
            prices in prop::collection::vec(0.01f64..1000.0, 1..64),
            strike in 0.0f64..500.0
        ) {
            let source = format!("maximum(ST - {strike}, 0)");
            let out = evaluate(&source, &prices).unwrap();
            for (payoff, st) in out.iter().zip(&prices) {
                prop_assert!(*payoff >= 0.0);
                prop_assert!((*payoff - (st - strike).max(0.0)).abs() < 1e-9);
            }
        }
    }
}
