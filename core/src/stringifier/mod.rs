//! Canonical rendering of expression trees.
//!
//! Every binary operation is wrapped in parentheses with single spaces
//! around the operator, so the rendering re-parses to the same tree shape.
//! Negation is a bare `-` prefix. Integers print all their digits; floats
//! use the general numeric format from [`number`].
//!
//! ```
//! use tally_core::{Arena, parser};
//!
//! let mut arena = Arena::new(4096);
//! let parsed = parser::parse(&mut arena, "-5 + 3 * 2.50").unwrap();
//! assert_eq!(parsed.to_string(), "(-5 + (3 * 2.5))");
//! ```

pub mod number;


use core::fmt::{self, Write};

use crate::{
    arena::{Arena, ExprId},
    parser::{BinaryOp, Expr},
    visitor::{ExprRef, ExprTransformer},
};

/// Renders the tree rooted at `root` into `dst`.
///
/// Output past the capacity of `dst` is dropped, but still counted: the
/// return value is the length of the full rendering, so a result of
/// `dst.len()` or more means the text was truncated. When `dst` is not
/// empty a zero byte is written at `min(length, dst.len() - 1)`.
pub fn stringify(arena: &Arena, root: ExprId, dst: &mut [u8]) -> usize {
    let mut buffer = TruncatingBuffer::new(dst);
    let rendered = render(ExprRef::new(arena, root), &mut buffer);
    debug_assert!(rendered.is_ok(), "truncating buffer never fails");
    let len = buffer.len();
    if buffer.is_truncated() {
        tracing::trace!(len, capacity = dst.len(), "stringify truncated");
    }

    if let Some(last) = dst.len().checked_sub(1) {
        dst[len.min(last)] = 0;
    }
    len
}

/// Renders the tree under `expr` into any text sink.
pub fn render<W: Write>(expr: ExprRef<'_>, out: W) -> fmt::Result {
    Stringifier::new(out).transform(expr)
}

/// Traversal that writes the canonical form of each node into `out`.
pub struct Stringifier<W> {
    out: W,
}

impl<W: Write> Stringifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn binary(
        &mut self,
        expr: ExprRef<'_>,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    ) -> fmt::Result {
        self.out.write_char('(')?;
        self.transform(expr.child(lhs))?;
        write!(self.out, " {} ", op.symbol())?;
        self.transform(expr.child(rhs))?;
        self.out.write_char(')')
    }
}

impl<'a, W: Write> ExprTransformer<'a> for Stringifier<W> {
    type Output = fmt::Result;

    fn transform(&mut self, expr: ExprRef<'a>) -> fmt::Result {
        match *expr.view() {
            Expr::Int(value) => write!(self.out, "{value}"),
            Expr::Float(value) => number::write_general(&mut self.out, value),
            Expr::Neg(operand) => {
                self.out.write_char('-')?;
                self.transform(expr.child(operand))
            }
            Expr::Add { lhs, rhs } => self.binary(expr, BinaryOp::Add, lhs, rhs),
            Expr::Sub { lhs, rhs } => self.binary(expr, BinaryOp::Sub, lhs, rhs),
            Expr::Mul { lhs, rhs } => self.binary(expr, BinaryOp::Mul, lhs, rhs),
            Expr::Div { lhs, rhs } => self.binary(expr, BinaryOp::Div, lhs, rhs),
        }
    }
}

/// Fixed-capacity text sink that keeps counting after it is full.
pub struct TruncatingBuffer<'d> {
    dst: &'d mut [u8],
    len: usize,
}

impl<'d> TruncatingBuffer<'d> {
    pub fn new(dst: &'d mut [u8]) -> Self {
        Self { dst, len: 0 }
    }

    /// Logical length: everything written so far, stored or not.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the text and a terminating zero byte no longer both fit.
    pub fn is_truncated(&self) -> bool {
        self.len >= self.dst.len()
    }
}

impl Write for TruncatingBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if let Some(room) = self.dst.len().checked_sub(self.len) {
            let n = bytes.len().min(room);
            self.dst[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        }
        self.len += bytes.len();
        Ok(())
    }
}
