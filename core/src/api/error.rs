//! Public error type for the tally API.

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Any failure while running a line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The line is not a well-formed expression, or the arena ran out.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The expression parsed but could not be evaluated within the stack limit.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Source location of a parse failure. Evaluation failures have none.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Error::Parse(err) => Some(&err.span),
            Error::Eval(_) => None,
        }
    }
}
