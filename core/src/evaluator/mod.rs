//! Stack-based evaluator for expression trees.
//!
//! The evaluator walks the tree in post order, keeping intermediate results
//! on a [`ValueStack`] of fixed depth. Every literal is widened to `f64`, so
//! the result is always a double.
//!
//! ## Design Principles
//!
//! - **Never panic**: stack overflow and underflow surface as [`EvalError`]
//! - **Bounded**: the number of live values is capped by [`EvaluatorOptions::max_depth`]
//! - **IEEE arithmetic**: division by zero yields an infinity or NaN, not an error
//!
//! ## Example
//!
//! ```
//! use tally_core::{Arena, evaluator, parser};
//!
//! let mut arena = Arena::new(4096);
//! let parsed = parser::parse(&mut arena, "1 + 2 * 3").unwrap();
//! assert_eq!(evaluator::eval(parsed.arena, parsed.root), Ok(7.0));
//! ```

mod error;
mod eval;
mod stack;

#[cfg(test)]
mod eval_test;

pub use error::EvalError;
pub use eval::Evaluator;
pub use stack::ValueStack;

use crate::arena::{Arena, ExprId};

/// Configuration for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum number of values live on the stack at once.
    ///
    /// Default: 32
    pub max_depth: usize,
}

impl EvaluatorOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 32;
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluate a tree with default limits.
pub fn eval(arena: &Arena, root: ExprId) -> Result<f64, EvalError> {
    eval_with_options(arena, root, EvaluatorOptions::default())
}

/// Evaluate a tree with custom limits.
///
/// ## Example
///
/// ```
/// use tally_core::{Arena, evaluator::{self, EvalError, EvaluatorOptions}, parser};
///
/// let mut arena = Arena::new(4096);
/// let parsed = parser::parse(&mut arena, "1 + 2").unwrap();
/// let options = EvaluatorOptions { max_depth: 1 };
/// assert!(matches!(
///     evaluator::eval_with_options(parsed.arena, parsed.root, options),
///     Err(EvalError::StackOverflow { .. })
/// ));
/// ```
pub fn eval_with_options(
    arena: &Arena,
    root: ExprId,
    options: EvaluatorOptions,
) -> Result<f64, EvalError> {
    Evaluator::new(options).eval(arena, root)
}
