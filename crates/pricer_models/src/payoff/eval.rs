//! Vectorised evaluation of a resolved payoff AST.
//!
//! Every node evaluates to a [`Value`]: either a scalar or a vector with one
//! entry per simulated path. Binary operations broadcast scalars, so the
//! tree is walked once for the whole price vector rather than once per path.
//!
//! Arithmetic follows IEEE 754: division by zero, `log` of a non-positive
//! number and similar produce `±inf`/`NaN`, which propagate to the caller.
//! `maximum`/`minimum` propagate NaN as well.

use super::ast::{BinOp, Expr, ExprKind, Function, UnaryOp};

/// Result of evaluating a sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Same value on every path.
    Scalar(f64),
    /// One value per path.
    Vector(Vec<f64>),
}

impl Value {
    /// Broadcasts to a vector of length `len`.
    ///
    /// A vector value is returned unchanged; its length always equals the
    /// number of paths it was computed from.
    pub fn into_vec(self, len: usize) -> Vec<f64> {
        match self {
            Self::Scalar(x) => vec![x; len],
            Self::Vector(v) => v,
        }
    }

    /// Returns `true` when the value does not depend on the path.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(x) => Self::Scalar(f(x)),
            Self::Vector(mut v) => {
                for x in v.iter_mut() {
                    *x = f(*x);
                }
                Self::Vector(v)
            }
        }
    }

    fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f(a, b)),
            (Self::Vector(mut a), Self::Scalar(b)) => {
                for x in a.iter_mut() {
                    *x = f(*x, b);
                }
                Self::Vector(a)
            }
            (Self::Scalar(a), Self::Vector(mut b)) => {
                for x in b.iter_mut() {
                    *x = f(a, *x);
                }
                Self::Vector(b)
            }
            (Self::Vector(mut a), Self::Vector(b)) => {
                debug_assert_eq!(a.len(), b.len());
                for (x, y) in a.iter_mut().zip(b) {
                    *x = f(*x, y);
                }
                Self::Vector(a)
            }
        }
    }
}

#[inline]
fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn truthy(x: f64) -> bool {
    x != 0.0
}

#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[inline]
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Evaluates `expr` with `ST` bound to `terminal_prices`.
pub fn eval(expr: &Expr, terminal_prices: &[f64]) -> Value {
    match &expr.kind {
        ExprKind::Number(n) => Value::Scalar(*n),
        ExprKind::TerminalPrice => Value::Vector(terminal_prices.to_vec()),
        ExprKind::Unary { op, operand } => {
            let value = eval(operand, terminal_prices);
            match op {
                UnaryOp::Neg => value.map(|x| -x),
                UnaryOp::Not => value.map(|x| indicator(!truthy(x))),
            }
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, terminal_prices);
            let rhs = eval(rhs, terminal_prices);
            apply_binary(*op, lhs, rhs)
        }
        ExprKind::Call { func, args } => {
            let mut values = args.iter().map(|arg| eval(arg, terminal_prices));
            match func {
                Function::Abs => unary_call(values.next(), f64::abs),
                Function::Exp => unary_call(values.next(), f64::exp),
                Function::Log => unary_call(values.next(), f64::ln),
                Function::Sqrt => unary_call(values.next(), f64::sqrt),
                Function::Maximum => binary_call(values.next(), values.next(), nan_max),
                Function::Minimum => binary_call(values.next(), values.next(), nan_min),
                Function::Pow => binary_call(values.next(), values.next(), f64::powf),
                Function::Where => {
                    let cond = values.next();
                    let then = values.next();
                    let otherwise = values.next();
                    select(cond, then, otherwise, terminal_prices.len())
                }
            }
        }
    }
}

fn apply_binary(op: BinOp, lhs: Value, rhs: Value) -> Value {
    match op {
        BinOp::Add => lhs.zip(rhs, |a, b| a + b),
        BinOp::Sub => lhs.zip(rhs, |a, b| a - b),
        BinOp::Mul => lhs.zip(rhs, |a, b| a * b),
        BinOp::Div => lhs.zip(rhs, |a, b| a / b),
        BinOp::Pow => lhs.zip(rhs, f64::powf),
        BinOp::Lt => lhs.zip(rhs, |a, b| indicator(a < b)),
        BinOp::Le => lhs.zip(rhs, |a, b| indicator(a <= b)),
        BinOp::Gt => lhs.zip(rhs, |a, b| indicator(a > b)),
        BinOp::Ge => lhs.zip(rhs, |a, b| indicator(a >= b)),
        BinOp::Eq => lhs.zip(rhs, |a, b| indicator(a == b)),
        BinOp::Ne => lhs.zip(rhs, |a, b| indicator(a != b)),
        BinOp::And => lhs.zip(rhs, |a, b| indicator(truthy(a) && truthy(b))),
        BinOp::Or => lhs.zip(rhs, |a, b| indicator(truthy(a) || truthy(b))),
    }
}

// Arity is checked by the parser; a missing argument evaluates to NaN.
fn unary_call(arg: Option<Value>, f: fn(f64) -> f64) -> Value {
    arg.unwrap_or(Value::Scalar(f64::NAN)).map(f)
}

fn binary_call(a: Option<Value>, b: Option<Value>, f: fn(f64, f64) -> f64) -> Value {
    let a = a.unwrap_or(Value::Scalar(f64::NAN));
    let b = b.unwrap_or(Value::Scalar(f64::NAN));
    a.zip(b, f)
}

fn select(cond: Option<Value>, then: Option<Value>, otherwise: Option<Value>, len: usize) -> Value {
    let cond = cond.unwrap_or(Value::Scalar(f64::NAN));
    let then = then.unwrap_or(Value::Scalar(f64::NAN));
    let otherwise = otherwise.unwrap_or(Value::Scalar(f64::NAN));

    if let (Value::Scalar(c), Value::Scalar(t), Value::Scalar(o)) = (&cond, &then, &otherwise) {
        return Value::Scalar(if truthy(*c) { *t } else { *o });
    }

    let cond = cond.into_vec(len);
    let then = then.into_vec(len);
    let otherwise = otherwise.into_vec(len);
    Value::Vector(
        cond.iter()
            .zip(then.iter().zip(otherwise.iter()))
            .map(|(&c, (&t, &o))| if truthy(c) { t } else { o })
            .collect(),
    )
}
