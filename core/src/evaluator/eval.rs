//! Core evaluation logic.

use crate::{
    arena::{Arena, ExprId},
    evaluator::{EvalError, EvaluatorOptions, ValueStack},
    parser::{BinaryOp, Expr},
    visitor::{ExprRef, ExprTransformer},
};

/// Post-order evaluator: every node leaves exactly one value on the stack.
///
/// The first stack failure aborts the traversal; nothing after it runs.
pub struct Evaluator {
    stack: ValueStack,
}

impl Evaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        Self {
            stack: ValueStack::new(options.max_depth),
        }
    }

    /// Evaluates the tree rooted at `root` and returns its value.
    pub fn eval(mut self, arena: &Arena, root: ExprId) -> Result<f64, EvalError> {
        let result = self
            .transform(ExprRef::new(arena, root))
            .and_then(|()| self.stack.pop());

        match result {
            Ok(value) => tracing::debug!(value, "evaluated"),
            Err(ref err) => tracing::debug!(%err, "evaluation failed"),
        }
        result
    }

    fn binary(
        &mut self,
        expr: ExprRef<'_>,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    ) -> Result<(), EvalError> {
        self.transform(expr.child(lhs))?;
        self.transform(expr.child(rhs))?;
        let (lhs, rhs) = self.stack.pop_pair()?;
        self.stack.push(op.apply(lhs, rhs))
    }
}

impl<'a> ExprTransformer<'a> for Evaluator {
    type Output = Result<(), EvalError>;

    fn transform(&mut self, expr: ExprRef<'a>) -> Self::Output {
        match *expr.view() {
            Expr::Int(value) => self.stack.push(value as f64),
            Expr::Float(value) => self.stack.push(value),
            Expr::Neg(operand) => {
                self.transform(expr.child(operand))?;
                let top = self.stack.peek_mut()?;
                *top = -*top;
                Ok(())
            }
            Expr::Add { lhs, rhs } => self.binary(expr, BinaryOp::Add, lhs, rhs),
            Expr::Sub { lhs, rhs } => self.binary(expr, BinaryOp::Sub, lhs, rhs),
            Expr::Mul { lhs, rhs } => self.binary(expr, BinaryOp::Mul, lhs, rhs),
            Expr::Div { lhs, rhs } => self.binary(expr, BinaryOp::Div, lhs, rhs),
        }
    }
}
