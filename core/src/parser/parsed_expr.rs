use core::fmt;

use crate::{
    arena::{Arena, ExprId},
    evaluator::{self, EvalError, EvaluatorOptions},
    parser::BinaryOp,
    stringifier,
    visitor::ExprRef,
};

/// The output of a successful parse: the arena holding every node and the
/// root handle.
///
/// The tree is immutable; it stays valid until the arena is reset by the
/// next parse.
pub struct ParsedExpr<'a> {
    pub source: &'a str,
    pub arena: &'a Arena,
    pub root: ExprId,
}

/// One expression node. Children are handles into the owning [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Neg(ExprId),
    Add { lhs: ExprId, rhs: ExprId },
    Sub { lhs: ExprId, rhs: ExprId },
    Mul { lhs: ExprId, rhs: ExprId },
    Div { lhs: ExprId, rhs: ExprId },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: ExprId, rhs: ExprId) -> Self {
        match op {
            BinaryOp::Add => Expr::Add { lhs, rhs },
            BinaryOp::Sub => Expr::Sub { lhs, rhs },
            BinaryOp::Mul => Expr::Mul { lhs, rhs },
            BinaryOp::Div => Expr::Div { lhs, rhs },
        }
    }
}

impl<'a> ParsedExpr<'a> {
    pub fn root(&self) -> ExprRef<'a> {
        ExprRef::new(self.arena, self.root)
    }

    /// Evaluates the tree with the default stack depth.
    pub fn eval(&self) -> Result<f64, EvalError> {
        evaluator::eval(self.arena, self.root)
    }

    pub fn eval_with_options(&self, options: EvaluatorOptions) -> Result<f64, EvalError> {
        evaluator::eval_with_options(self.arena, self.root, options)
    }

    /// Renders into `dst`; see [`stringifier::stringify`].
    pub fn stringify(&self, dst: &mut [u8]) -> usize {
        stringifier::stringify(self.arena, self.root, dst)
    }
}

impl fmt::Display for ParsedExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

impl fmt::Debug for ParsedExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.root(), f)
    }
}
