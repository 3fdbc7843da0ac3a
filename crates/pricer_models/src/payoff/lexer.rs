//! Lexer for payoff expressions.
//!
//! Produces a flat token stream. Whitespace of any kind is insignificant and
//! only ASCII input is accepted; anything outside the token set below is a
//! lex error, which is the first line of defence against host-language
//! constructs such as strings, attribute access or indexing.

use super::error::{ExpressionError, Span};

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Location in the source.
    pub span: Span,
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal.
    Number(f64),
    /// Identifier (variable or function name).
    Ident(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `**` or `^`
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
    EqEq,
    /// `!=`
    Ne,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `~`
    Tilde,
}

/// Tokenize a payoff expression.
///
/// # Errors
///
/// Returns `ExpressionError::Lex` on the first unexpected character or
/// malformed numeric literal.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        // Number literal.
        if ch.is_ascii_digit()
            || (ch == b'.' && pos + 1 < bytes.len() && bytes[pos + 1].is_ascii_digit())
        {
            let (value, end) = lex_number(source, pos)?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                span: Span::new(pos, end),
            });
            pos = end;
            continue;
        }

        // Identifier.
        if ch.is_ascii_alphabetic() || ch == b'_' {
            let end = lex_ident_end(bytes, pos);
            tokens.push(Token {
                kind: TokenKind::Ident(source[pos..end].to_string()),
                span: Span::new(pos, end),
            });
            pos = end;
            continue;
        }

        // Two-character operators.
        if pos + 1 < bytes.len() {
            let kind = match &bytes[pos..pos + 2] {
                b"**" => Some(TokenKind::Pow),
                b"<=" => Some(TokenKind::Le),
                b">=" => Some(TokenKind::Ge),
                b"==" => Some(TokenKind::EqEq),
                b"!=" => Some(TokenKind::Ne),
                _ => None,
            };
            if let Some(kind) = kind {
                tokens.push(Token {
                    kind,
                    span: Span::new(pos, pos + 2),
                });
                pos += 2;
                continue;
            }
        }

        // Single-character operators / punctuation.
        let kind = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Pow,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'&' => TokenKind::Amp,
            b'|' => TokenKind::Pipe,
            b'~' => TokenKind::Tilde,
            _ => {
                let found = source[pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ExpressionError::Lex {
                    message: format!("unexpected character '{found}'"),
                    span: Span::new(pos, pos + found.len_utf8()),
                });
            }
        };
        tokens.push(Token {
            kind,
            span: Span::new(pos, pos + 1),
        });
        pos += 1;
    }

    Ok(tokens)
}

fn lex_ident_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
        pos += 1;
    }
    pos
}

/// Lex `digits [. digits] [(e|E) [+|-] digits]` (or `. digits ...`).
fn lex_number(source: &str, start: usize) -> Result<(f64, usize), ExpressionError> {
    let bytes = source.as_bytes();
    let mut pos = start;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }

    // `100abc`, `1.2.3` and `1e` are all malformed.
    if pos < bytes.len()
        && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_' || bytes[pos] == b'.')
    {
        let end = lex_ident_end(bytes, pos).max(pos + 1);
        return Err(ExpressionError::Lex {
            message: format!("malformed number '{}'", &source[start..end]),
            span: Span::new(start, end),
        });
    }

    let text = &source[start..pos];
    text.parse::<f64>()
        .map(|value| (value, pos))
        .map_err(|e| ExpressionError::Lex {
            message: format!("malformed number '{text}': {e}"),
            span: Span::new(start, pos),
        })
}
