//! Lazy tokenizer over a source string.
//!
//! The scanner never buffers tokens. Lookahead is done by saving the cursor
//! with [`Scanner::cursor`], scanning, and rolling back with
//! [`Scanner::restore`] when the token is not wanted.

use core::fmt;

use crate::parser::{BinaryOp, Span};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Add,
    Sub,
    Mul,
    Div,
    LParen,
    RParen,
    Int(i64),
    Float(f64),
    /// A character that starts no token. The scanner does not move past it.
    Other(char),
    End,
}

impl Token {
    /// The binary operator this token spells, if any.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Token::Add => Some(BinaryOp::Add),
            Token::Sub => Some(BinaryOp::Sub),
            Token::Mul => Some(BinaryOp::Mul),
            Token::Div => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Add => write!(f, "'+'"),
            Token::Sub => write!(f, "'-'"),
            Token::Mul => write!(f, "'*'"),
            Token::Div => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Int(value) => write!(f, "integer {value}"),
            Token::Float(value) => write!(f, "float {value}"),
            Token::Other(c) => write!(f, "unrecognized character {c:?}"),
            Token::End => write!(f, "end of input"),
        }
    }
}

/// A token together with the bytes it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

pub struct Scanner<'s> {
    source: &'s str,
    cursor: usize,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Rolls the cursor back to a value previously returned by [`Scanner::cursor`].
    pub fn restore(&mut self, cursor: usize) {
        debug_assert!(cursor <= self.source.len());
        self.cursor = cursor;
    }

    fn bytes(&self) -> &'s [u8] {
        self.source.as_bytes()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes().get(self.cursor).copied()
    }

    fn at_digit(&self) -> bool {
        self.peek_byte().is_some_and(|b| b.is_ascii_digit())
    }

    /// Scans the next token.
    pub fn tokenize(&mut self) -> Lexeme {
        while self.peek_byte().is_some_and(is_space) {
            self.cursor += 1;
        }

        let start = self.cursor;
        let token = match self.peek_byte() {
            None => Token::End,
            Some(b) if b.is_ascii_digit() => self.number(),
            Some(b'+') => self.single(Token::Add),
            Some(b'-') => self.single(Token::Sub),
            Some(b'*') => self.single(Token::Mul),
            Some(b'/') => self.single(Token::Div),
            Some(b'(') => self.single(Token::LParen),
            Some(b')') => self.single(Token::RParen),
            Some(_) => {
                // The cursor only ever moves over ASCII, so it sits on a char boundary.
                let c = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
                let span = Span::new(start, start + c.len_utf8());
                tracing::trace!(?span, "unrecognized character {c:?}");
                return Lexeme {
                    token: Token::Other(c),
                    span,
                };
            }
        };

        tracing::trace!(start, end = self.cursor, "token {token}");
        Lexeme {
            token,
            span: Span::new(start, self.cursor),
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.cursor += 1;
        token
    }

    fn number(&mut self) -> Token {
        // Peek past the digit run: a dot right after it makes this a float.
        let run_end = self.bytes()[self.cursor..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(self.bytes().len(), |n| self.cursor + n);

        if self.bytes().get(run_end) == Some(&b'.') {
            Token::Float(self.float())
        } else {
            Token::Int(self.int())
        }
    }

    fn digit(&mut self) -> u8 {
        let d = self.bytes()[self.cursor] - b'0';
        self.cursor += 1;
        d
    }

    /// Integer literal. Values past `i64::MAX` clamp to `i64::MAX`.
    fn int(&mut self) -> i64 {
        let mut value: i64 = 0;
        while self.at_digit() {
            let d = i64::from(self.digit());
            match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
                Some(next) => value = next,
                None => {
                    while self.at_digit() {
                        self.cursor += 1;
                    }
                    tracing::debug!("integer literal clamped to i64::MAX");
                    return i64::MAX;
                }
            }
        }
        value
    }

    /// Float literal: digits, a mandatory dot, then optional fraction digits.
    fn float(&mut self) -> f64 {
        let mut value = 0.0;
        while self.at_digit() {
            value = value * 10.0 + f64::from(self.digit());
        }

        // Consume the dot.
        self.cursor += 1;

        let mut scale = 1.0;
        while self.at_digit() {
            scale /= 10.0;
            value += scale * f64::from(self.digit());
        }
        value
    }
}
