// These are common syntax structures used by the scanner, parser and errors.

use core::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }

    /// The text this span covers, if it lies within `source`.
    pub fn str_of<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.0.clone())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Binding strength used by precedence climbing. Higher binds tighter.
    pub const fn precedence(self) -> i32 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 0,
            BinaryOp::Mul | BinaryOp::Div => 1,
        }
    }

    // Every operator in the language groups left to right.
    pub const fn is_right_associative(self) -> bool {
        false
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs, // Division by zero produces inf or nan
        }
    }
}
