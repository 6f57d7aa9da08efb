mod error;
mod parsed_expr;
#[allow(clippy::module_inception)]
mod parser;
pub mod scanner;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use parsed_expr::{Expr, ParsedExpr};
pub use parser::{MAX_NESTING_DEPTH, MAX_TREE_HEIGHT, parse};
pub use scanner::{Lexeme, Scanner, Token};
pub use syntax::{BinaryOp, Span};

#[cfg(test)]
mod parse_test;
