//! Abstract syntax tree for payoff expressions.
//!
//! Names are resolved while parsing: the tree can only reference the
//! terminal-price vector and functions from [`Function`], so a parsed
//! expression has no way to reach anything else.

use super::error::Span;

/// Name under which the terminal-price vector is bound.
pub const TERMINAL_PRICE: &str = "ST";

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Node kind.
    pub kind: ExprKind,
    /// Location in the source.
    pub span: Span,
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// The terminal-price vector `ST`.
    TerminalPrice,
    /// Unary operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Call to an allow-listed function.
    Call {
        /// Resolved function.
        func: Function,
        /// Arguments, already checked against the function's arity.
        args: Vec<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**` / `^`
    Pow,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `&`
    And,
    /// `|`
    Or,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `~x`
    Not,
}

/// Allow-listed elementwise functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// `maximum(a, b)` (alias `max`)
    Maximum,
    /// `minimum(a, b)` (alias `min`)
    Minimum,
    /// `abs(x)`
    Abs,
    /// `exp(x)`
    Exp,
    /// `log(x)`, natural logarithm
    Log,
    /// `sqrt(x)`
    Sqrt,
    /// `pow(x, y)`
    Pow,
    /// `where(cond, a, b)`
    Where,
}

impl Function {
    /// Looks up a function by the name used in an expression.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "maximum" | "max" => Self::Maximum,
            "minimum" | "min" => Self::Minimum,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "log" => Self::Log,
            "sqrt" => Self::Sqrt,
            "pow" => Self::Pow,
            "where" => Self::Where,
            _ => return None,
        };
        Some(func)
    }

    /// Returns the canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Pow => "pow",
            Self::Where => "where",
        }
    }

    /// Returns the required number of arguments.
    pub fn arity(self) -> usize {
        match self {
            Self::Abs | Self::Exp | Self::Log | Self::Sqrt => 1,
            Self::Maximum | Self::Minimum | Self::Pow => 2,
            Self::Where => 3,
        }
    }
}
