//! Error types for payoff expressions with span-based diagnostics.
//!
//! This module provides:
//! - `Span`: Byte range of the offending source text
//! - `ExpressionError`: The underlying lex/parse/resolution failure
//! - `InvalidExpression`: The failure surfaced to callers, wrapping the cause

use std::fmt;
use thiserror::Error;

/// Source span for error reporting (byte offsets, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset.
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Joins two spans into one covering both.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Underlying cause of an invalid payoff expression.
///
/// # Variants
/// - `Lex`: Unexpected character or malformed number
/// - `Parse`: Unexpected token, missing construct or excessive nesting
/// - `UnknownIdentifier`: A name other than `ST` used as a value
/// - `UnknownFunction`: A call to a function outside the allow-list
/// - `Arity`: An allow-listed function called with the wrong argument count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// Lexer error.
    #[error("lex error at {span}: {message}")]
    Lex {
        /// Description of the problem.
        message: String,
        /// Location in the source.
        span: Span,
    },

    /// Parser error.
    #[error("parse error at {span}: {message}")]
    Parse {
        /// Description of the problem.
        message: String,
        /// Location in the source.
        span: Span,
    },

    /// Identifier that is not the bound terminal-price vector.
    #[error("unknown identifier '{name}' at {span}: only 'ST' is available")]
    UnknownIdentifier {
        /// The identifier as written.
        name: String,
        /// Location in the source.
        span: Span,
    },

    /// Function outside the allow-list.
    #[error("unknown function '{name}' at {span}")]
    UnknownFunction {
        /// The function name as written.
        name: String,
        /// Location in the source.
        span: Span,
    },

    /// Wrong number of arguments.
    #[error("function '{name}' at {span} takes {expected} argument(s), got {found}")]
    Arity {
        /// The function name.
        name: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
        /// Location in the source.
        span: Span,
    },
}

impl ExpressionError {
    /// Returns the source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::Lex { span, .. }
            | Self::Parse { span, .. }
            | Self::UnknownIdentifier { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::Arity { span, .. } => *span,
        }
    }
}

/// A payoff expression that could not be parsed or evaluated.
///
/// Wraps the underlying [`ExpressionError`], available through
/// [`std::error::Error::source`] or [`InvalidExpression::cause`].
///
/// # Examples
/// ```
/// use pricer_models::payoff::PayoffExpr;
///
/// let err = PayoffExpr::parse("__import__('os')").unwrap_err();
/// assert!(err.to_string().starts_with("Invalid payoff expression:"));
/// assert_eq!(err.expression(), "__import__('os')");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid payoff expression: {source}")]
pub struct InvalidExpression {
    expression: String,
    source: ExpressionError,
}

impl InvalidExpression {
    /// Wraps a cause together with the offending expression.
    pub fn new(expression: impl Into<String>, source: ExpressionError) -> Self {
        Self {
            expression: expression.into(),
            source,
        }
    }

    /// Returns the expression as supplied by the caller.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the underlying cause.
    pub fn cause(&self) -> &ExpressionError {
        &self.source
    }
}
