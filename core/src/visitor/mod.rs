//! Traversal over arena-resident expression trees.
//!
//! The node set is closed, so traversals are plain exhaustive `match`es over
//! [`Expr`] rather than a method per node kind. [`ExprRef`] pairs a handle
//! with its arena so children can be followed without threading the arena
//! through every call, and [`ExprTransformer`] is the shape shared by the
//! evaluator and the stringifier.

use core::fmt;

use crate::{
    arena::{Arena, ExprId},
    parser::Expr,
    stringifier,
};

/// View into a tree node, allowing deconstruction.
#[derive(Clone, Copy)]
pub struct ExprRef<'a> {
    arena: &'a Arena,
    id: ExprId,
}

impl<'a> ExprRef<'a> {
    pub fn new(arena: &'a Arena, id: ExprId) -> Self {
        Self { arena, id }
    }

    /// The node this reference points at.
    pub fn view(self) -> &'a Expr {
        self.arena.get(self.id)
    }

    /// A reference to `id` in the same arena, normally a child of this node.
    pub fn child(self, id: ExprId) -> Self {
        Self::new(self.arena, id)
    }
}

/// Generic transformer for expression trees.
///
/// The transformer can be stateful (uses `&mut self`) to accumulate results,
/// and is responsible for recursing into children as needed. Parsed trees are
/// at most [`MAX_TREE_HEIGHT`](crate::parser::MAX_TREE_HEIGHT) levels tall.
pub trait ExprTransformer<'a> {
    /// The type of value produced by the transformation.
    ///
    /// Examples:
    /// - `Result<(), EvalError>` for the evaluator, which leaves its result on a stack
    /// - `fmt::Result` for the stringifier
    type Output;

    /// Transform a tree node.
    fn transform(&mut self, expr: ExprRef<'a>) -> Self::Output;
}

/// Structural dump, e.g. `Add(Int(1), Mul(Int(2), Float(3.5)))`.
impl fmt::Debug for ExprRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let this = *self;
        match *this.view() {
            Expr::Int(value) => write!(f, "Int({value})"),
            Expr::Float(value) => write!(f, "Float({value:?})"),
            Expr::Neg(operand) => write!(f, "Neg({:?})", this.child(operand)),
            Expr::Add { lhs, rhs } => {
                write!(f, "Add({:?}, {:?})", this.child(lhs), this.child(rhs))
            }
            Expr::Sub { lhs, rhs } => {
                write!(f, "Sub({:?}, {:?})", this.child(lhs), this.child(rhs))
            }
            Expr::Mul { lhs, rhs } => {
                write!(f, "Mul({:?}, {:?})", this.child(lhs), this.child(rhs))
            }
            Expr::Div { lhs, rhs } => {
                write!(f, "Div({:?}, {:?})", this.child(lhs), this.child(rhs))
            }
        }
    }
}

/// Canonical fully parenthesized rendering.
impl fmt::Display for ExprRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        stringifier::render(*self, f)
    }
}
