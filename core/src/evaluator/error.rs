//! Evaluation errors.
//!
//! Both variants are resource or consistency failures of the value stack.
//! Arithmetic itself never fails: division by zero follows IEEE 754 and
//! yields an infinity or NaN.

/// Evaluation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// More values were live at once than the stack can hold.
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    /// An operator found fewer operands than it needs. A tree built by the
    /// parser never triggers this.
    #[error("evaluation stack underflow: needed {needed} values, found {available}")]
    StackUnderflow { needed: usize, available: usize },
}
