//! Precedence-climbing parser.
//!
//! Algorithm after <https://en.wikipedia.org/wiki/Operator-precedence_parser>.
//! Every node is allocated in the caller's [`Arena`]; the first failure
//! (bad token or full arena) aborts the whole parse.
//!
//! A primary is a number or a parenthesized expression, after any run of
//! signs. Groups produce no node of their own, so the canonical rendering
//! parses back to the tree it came from.

use crate::{
    Vec,
    arena::{Arena, ExprId},
    parser::{
        BinaryOp, Expr, ParseError, ParseErrorKind, ParsedExpr, Span,
        scanner::{Scanner, Token},
    },
};

/// Maximum number of parenthesized groups open at once.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Maximum height of a parsed tree, counting the root and the leaves.
///
/// Rendering and evaluation recurse once per level; a long operator chain
/// builds a tall tree without any groups, so height is bounded separately.
pub const MAX_TREE_HEIGHT: usize = 1024;

/// Parses `source` into `arena`, which is reset first.
pub fn parse<'a>(arena: &'a mut Arena, source: &'a str) -> Result<ParsedExpr<'a>, ParseError> {
    arena.reset();

    let mut parser = Parser {
        scanner: Scanner::new(source),
        arena: &mut *arena,
        depth: 0,
        heights: Vec::new(),
    };

    let root = parser.parse_primary().and_then(|lhs| parser.parse_expression(lhs, 0));
    let root = match root {
        Ok(root) => root,
        Err(err) => {
            tracing::debug!(source, %err, "parse failed");
            return Err(err);
        }
    };

    // Anything the grammar stopped before is not part of the expression.
    let rest = parser.scanner.tokenize();
    if rest.token != Token::End {
        tracing::debug!(
            source,
            offset = rest.span.0.start,
            "ignoring trailing input starting with {}",
            rest.token
        );
    }

    tracing::debug!(source, nodes = arena.len(), used = arena.used(), "parsed");
    Ok(ParsedExpr {
        source,
        arena,
        root,
    })
}

struct Parser<'s, 'a> {
    scanner: Scanner<'s>,
    arena: &'a mut Arena,
    /// Open groups.
    depth: usize,
    /// Height of every node allocated so far, indexed like the arena.
    heights: Vec<usize>,
}

impl Parser<'_, '_> {
    fn alloc(&mut self, expr: Expr, span: &Span) -> Result<ExprId, ParseError> {
        let height = self.height_of(&expr);
        if height > MAX_TREE_HEIGHT {
            return Err(ParseError::new(
                ParseErrorKind::TreeTooTall {
                    height,
                    max_height: MAX_TREE_HEIGHT,
                },
                span.clone(),
            ));
        }

        let id = self
            .arena
            .alloc(expr)
            .map_err(|e| ParseError::new(ParseErrorKind::ArenaExhausted(e), span.clone()))?;
        self.heights.push(height);
        Ok(id)
    }

    fn height_of(&self, expr: &Expr) -> usize {
        let height = |id: ExprId| self.heights.get(id.index() as usize).copied().unwrap_or(0);
        match *expr {
            Expr::Int(_) | Expr::Float(_) => 1,
            Expr::Neg(operand) => height(operand) + 1,
            Expr::Add { lhs, rhs }
            | Expr::Sub { lhs, rhs }
            | Expr::Mul { lhs, rhs }
            | Expr::Div { lhs, rhs } => height(lhs).max(height(rhs)) + 1,
        }
    }

    /// A number or a group, preceded by any run of `+` and `-` signs.
    ///
    /// An odd number of minus signs wraps the operand in a negation; an even
    /// number cancels out.
    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let mut negate = false;
        let lexeme = loop {
            let lexeme = self.scanner.tokenize();
            match lexeme.token {
                Token::Sub => negate = !negate,
                Token::Add => {}
                _ => break lexeme,
            }
        };

        let operand = match lexeme.token {
            Token::Int(value) => self.alloc(Expr::Int(value), &lexeme.span)?,
            Token::Float(value) => self.alloc(Expr::Float(value), &lexeme.span)?,
            Token::LParen => self.parse_group(&lexeme.span)?,
            Token::End => {
                return Err(ParseError::new(ParseErrorKind::UnexpectedEnd, lexeme.span));
            }
            found => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken { found },
                    lexeme.span,
                ));
            }
        };

        if negate {
            self.alloc(Expr::Neg(operand), &lexeme.span)
        } else {
            Ok(operand)
        }
    }

    /// The expression after an opening parenthesis, up to its closing one.
    fn parse_group(&mut self, open: &Span) -> Result<ExprId, ParseError> {
        if self.depth == MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded {
                    depth: self.depth + 1,
                    max_depth: MAX_NESTING_DEPTH,
                },
                open.clone(),
            ));
        }

        self.depth += 1;
        let inner = self
            .parse_primary()
            .and_then(|lhs| self.parse_expression(lhs, 0));
        self.depth -= 1;
        let inner = inner?;

        let close = self.scanner.tokenize();
        match close.token {
            Token::RParen => Ok(inner),
            found => Err(ParseError::new(
                ParseErrorKind::UnclosedGroup { found },
                close.span,
            )),
        }
    }

    /// Extends `lhs` with every following operator of at least `min_precedence`.
    fn parse_expression(
        &mut self,
        mut lhs: ExprId,
        min_precedence: i32,
    ) -> Result<ExprId, ParseError> {
        while let Some((op, span)) = self.next_operator(min_precedence) {
            let mut rhs = self.parse_primary()?;

            while let Some(next) = self.peek_operator() {
                if !binds_tighter(next, op) {
                    break;
                }
                let min = op.precedence() + i32::from(next.precedence() > op.precedence());
                rhs = self.parse_expression(rhs, min)?;
            }

            lhs = self.alloc(Expr::binary(op, lhs, rhs), &span)?;
        }

        Ok(lhs)
    }

    /// Consumes the next token if it is an operator of at least `min_precedence`.
    fn next_operator(&mut self, min_precedence: i32) -> Option<(BinaryOp, Span)> {
        let saved = self.scanner.cursor();
        let lexeme = self.scanner.tokenize();

        match lexeme.token.binary_op() {
            Some(op) if op.precedence() >= min_precedence => Some((op, lexeme.span)),
            _ => {
                self.scanner.restore(saved);
                None
            }
        }
    }

    /// Looks at the next operator without consuming it.
    fn peek_operator(&mut self) -> Option<BinaryOp> {
        let saved = self.scanner.cursor();
        let token = self.scanner.tokenize().token;
        self.scanner.restore(saved);
        token.binary_op()
    }
}

/// Whether `next`, following the right operand of `op`, must take that
/// operand as its own left operand.
fn binds_tighter(next: BinaryOp, op: BinaryOp) -> bool {
    next.precedence() > op.precedence()
        || (next.precedence() == op.precedence() && next.is_right_associative())
}
