//! Recursive-descent parser for payoff expressions.
//!
//! Precedence, lowest first: `|`, `&`, `~`, comparisons (non-associative),
//! `+ -`, `* /`, unary `- +`, `** ^` (right-associative, binds tighter than
//! a unary minus on its left, so `-ST**2` is `-(ST**2)`).

use super::ast::{BinOp, Expr, ExprKind, Function, UnaryOp, TERMINAL_PRICE};
use super::error::{ExpressionError, Span};
use super::lexer::{tokenize, Token, TokenKind};

/// Maximum nesting depth of sub-expressions.
///
/// Every chained binary operator (`a + b + c`) counts as one level, so this
/// also bounds the height of the syntax tree the evaluator walks.
pub const MAX_DEPTH: usize = 64;

/// Parser state wrapping a token stream.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    source_len: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            source_len,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn current_span(&self) -> Span {
        self.peek().map_or_else(|| self.eof_span(), |t| t.span)
    }

    fn eof_span(&self) -> Span {
        Span::new(self.source_len, self.source_len)
    }

    fn expect(&mut self, expected: &TokenKind) -> Result<Span, ExpressionError> {
        match self.peek() {
            Some(tok) if &tok.kind == expected => {
                let span = tok.span;
                self.pos += 1;
                Ok(span)
            }
            found => Err(ExpressionError::Parse {
                message: format!(
                    "expected {}, got {}",
                    describe(Some(expected)),
                    describe(found.map(|t| &t.kind))
                ),
                span: self.current_span(),
            }),
        }
    }

    fn enter(&mut self) -> Result<(), ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError::Parse {
                message: format!("expression nested too deeply (limit {MAX_DEPTH})"),
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.leave_by(1);
    }

    fn leave_by(&mut self, levels: usize) {
        self.depth -= levels;
    }
}

fn describe(kind: Option<&TokenKind>) -> String {
    let text = match kind {
        None => return "end of input".to_string(),
        Some(TokenKind::Number(n)) => return format!("number {n}"),
        Some(TokenKind::Ident(name)) => return format!("identifier '{name}'"),
        Some(TokenKind::LParen) => "(",
        Some(TokenKind::RParen) => ")",
        Some(TokenKind::Comma) => ",",
        Some(TokenKind::Plus) => "+",
        Some(TokenKind::Minus) => "-",
        Some(TokenKind::Star) => "*",
        Some(TokenKind::Slash) => "/",
        Some(TokenKind::Pow) => "**",
        Some(TokenKind::Lt) => "<",
        Some(TokenKind::Le) => "<=",
        Some(TokenKind::Gt) => ">",
        Some(TokenKind::Ge) => ">=",
        Some(TokenKind::EqEq) => "==",
        Some(TokenKind::Ne) => "!=",
        Some(TokenKind::Amp) => "&",
        Some(TokenKind::Pipe) => "|",
        Some(TokenKind::Tilde) => "~",
    };
    format!("'{text}'")
}

/// Parse a payoff expression into a resolved AST.
///
/// # Errors
///
/// Returns the first lex, parse, name-resolution or arity error.
pub fn parse(source: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(source)?;
    let mut p = Parser::new(tokens, source.len());
    let expr = parse_expr(&mut p)?;
    if let Some(tok) = p.peek() {
        return Err(ExpressionError::Parse {
            message: format!("unexpected {} after expression", describe(Some(&tok.kind))),
            span: tok.span,
        });
    }
    Ok(expr)
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.to(rhs.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    }
}

fn unary(op: UnaryOp, start: Span, operand: Expr) -> Expr {
    let span = start.to(operand.span);
    Expr {
        kind: ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    }
}

fn parse_expr(p: &mut Parser) -> Result<Expr, ExpressionError> {
    p.enter()?;
    let expr = parse_or(p);
    p.leave();
    expr
}

fn parse_or(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let mut left = parse_and(p)?;
    let mut chained = 0;
    while matches!(p.peek_kind(), Some(TokenKind::Pipe)) {
        p.advance();
        p.enter()?;
        chained += 1;
        let right = parse_and(p)?;
        left = binary(BinOp::Or, left, right);
    }
    p.leave_by(chained);
    Ok(left)
}

fn parse_and(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let mut left = parse_not(p)?;
    let mut chained = 0;
    while matches!(p.peek_kind(), Some(TokenKind::Amp)) {
        p.advance();
        p.enter()?;
        chained += 1;
        let right = parse_not(p)?;
        left = binary(BinOp::And, left, right);
    }
    p.leave_by(chained);
    Ok(left)
}

fn parse_not(p: &mut Parser) -> Result<Expr, ExpressionError> {
    if matches!(p.peek_kind(), Some(TokenKind::Tilde)) {
        let start = p.current_span();
        p.advance();
        p.enter()?;
        let operand = parse_not(p);
        p.leave();
        return Ok(unary(UnaryOp::Not, start, operand?));
    }
    parse_comparison(p)
}

fn parse_comparison(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let left = parse_additive(p)?;
    let op = match p.peek_kind() {
        Some(TokenKind::Lt) => BinOp::Lt,
        Some(TokenKind::Le) => BinOp::Le,
        Some(TokenKind::Gt) => BinOp::Gt,
        Some(TokenKind::Ge) => BinOp::Ge,
        Some(TokenKind::EqEq) => BinOp::Eq,
        Some(TokenKind::Ne) => BinOp::Ne,
        _ => return Ok(left),
    };
    p.advance();
    let right = parse_additive(p)?;
    Ok(binary(op, left, right))
}

fn parse_additive(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let mut left = parse_multiplicative(p)?;
    let mut chained = 0;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Plus) => BinOp::Add,
            Some(TokenKind::Minus) => BinOp::Sub,
            _ => break,
        };
        p.advance();
        p.enter()?;
        chained += 1;
        let right = parse_multiplicative(p)?;
        left = binary(op, left, right);
    }
    p.leave_by(chained);
    Ok(left)
}

fn parse_multiplicative(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let mut left = parse_unary(p)?;
    let mut chained = 0;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Star) => BinOp::Mul,
            Some(TokenKind::Slash) => BinOp::Div,
            _ => break,
        };
        p.advance();
        p.enter()?;
        chained += 1;
        let right = parse_unary(p)?;
        left = binary(op, left, right);
    }
    p.leave_by(chained);
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let op = match p.peek_kind() {
        Some(TokenKind::Minus) => Some(UnaryOp::Neg),
        Some(TokenKind::Plus) => None,
        _ => return parse_power(p),
    };
    let start = p.current_span();
    p.advance();
    p.enter()?;
    let operand = parse_unary(p);
    p.leave();
    let operand = operand?;
    Ok(match op {
        Some(op) => unary(op, start, operand),
        // Unary plus is the identity.
        None => Expr {
            span: start.to(operand.span),
            kind: operand.kind,
        },
    })
}

fn parse_power(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let base = parse_primary(p)?;
    if !matches!(p.peek_kind(), Some(TokenKind::Pow)) {
        return Ok(base);
    }
    p.advance();
    p.enter()?;
    let exponent = parse_unary(p);
    p.leave();
    Ok(binary(BinOp::Pow, base, exponent?))
}

fn parse_primary(p: &mut Parser) -> Result<Expr, ExpressionError> {
    let span = p.current_span();
    match p.advance() {
        Some(Token {
            kind: TokenKind::Number(n),
            ..
        }) => Ok(Expr {
            kind: ExprKind::Number(n),
            span,
        }),
        Some(Token {
            kind: TokenKind::LParen,
            ..
        }) => {
            let inner = parse_expr(p)?;
            let end = p.expect(&TokenKind::RParen)?;
            Ok(Expr {
                kind: inner.kind,
                span: span.to(end),
            })
        }
        Some(Token {
            kind: TokenKind::Ident(name),
            ..
        }) => {
            if matches!(p.peek_kind(), Some(TokenKind::LParen)) {
                parse_call(p, name, span)
            } else if name == TERMINAL_PRICE {
                Ok(Expr {
                    kind: ExprKind::TerminalPrice,
                    span,
                })
            } else {
                Err(ExpressionError::UnknownIdentifier { name, span })
            }
        }
        other => Err(ExpressionError::Parse {
            message: format!(
                "expected expression, got {}",
                describe(other.as_ref().map(|t| &t.kind))
            ),
            span,
        }),
    }
}

/// Parse `name(args...)`; the identifier has been consumed, `(` has not.
fn parse_call(p: &mut Parser, name: String, name_span: Span) -> Result<Expr, ExpressionError> {
    let func = Function::from_name(&name).ok_or(ExpressionError::UnknownFunction {
        name,
        span: name_span,
    })?;
    p.expect(&TokenKind::LParen)?;

    let mut args = Vec::new();
    if !matches!(p.peek_kind(), Some(TokenKind::RParen)) {
        args.push(parse_expr(p)?);
        while matches!(p.peek_kind(), Some(TokenKind::Comma)) {
            p.advance();
            args.push(parse_expr(p)?);
        }
    }
    let end = p.expect(&TokenKind::RParen)?;
    let span = name_span.to(end);

    if args.len() != func.arity() {
        return Err(ExpressionError::Arity {
            name: func.name(),
            expected: func.arity(),
            found: args.len(),
            span,
        });
    }

    Ok(Expr {
        kind: ExprKind::Call { func, args },
        span,
    })
}
