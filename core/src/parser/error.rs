use crate::arena::ArenaExhausted;
use crate::parser::{Span, Token};

/// Parser error with the location it was detected at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.0.start, .span.0.end)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A token that cannot start a number where one was required
    #[error("expected a number, found {found}")]
    UnexpectedToken { found: Token },
    /// Input ended where a number was required
    #[error("expected a number, found end of input")]
    UnexpectedEnd,
    /// A parenthesized group that is not closed where the inner expression ends
    #[error("expected ')', found {found}")]
    UnclosedGroup { found: Token },
    /// Maximum nesting depth exceeded
    #[error("nesting depth {depth} exceeds maximum of {max_depth}")]
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// The tree would be taller than the traversals accept
    #[error("expression height {height} exceeds maximum of {max_height}")]
    TreeTooTall { height: usize, max_height: usize },
    /// The arena has no room left for another node
    #[error(transparent)]
    ArenaExhausted(#[from] ArenaExhausted),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Stable short code for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "P001",
            ParseErrorKind::UnexpectedEnd => "P002",
            ParseErrorKind::ArenaExhausted(_) => "P003",
            ParseErrorKind::UnclosedGroup { .. } => "P004",
            ParseErrorKind::MaxDepthExceeded { .. } => "P005",
            ParseErrorKind::TreeTooTall { .. } => "P006",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self.kind {
            ParseErrorKind::UnexpectedToken {
                found: Token::Other(_),
            } => Some("only numbers, parentheses and the operators + - * / are allowed"),
            ParseErrorKind::UnexpectedToken { .. } => None,
            ParseErrorKind::UnexpectedEnd => Some("add a number after the last operator"),
            ParseErrorKind::ArenaExhausted(_) => {
                Some("shorten the expression or raise the arena capacity")
            }
            ParseErrorKind::UnclosedGroup { .. } => Some("add the missing ')'"),
            ParseErrorKind::MaxDepthExceeded { .. } => Some("remove some redundant parentheses"),
            ParseErrorKind::TreeTooTall { .. } => Some("split the expression into shorter lines"),
        }
    }
}
