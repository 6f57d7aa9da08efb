use crate::{
    Arena, Expr, String, format,
    arena::NODE_SIZE,
    parser::{MAX_NESTING_DEPTH, MAX_TREE_HEIGHT, ParseError, ParseErrorKind, Span, Token, parse},
};
use pretty_assertions::assert_eq;

fn parse_err(source: &str) -> ParseError {
    let mut arena = Arena::new(1 << 12);
    match parse(&mut arena, source) {
        Ok(parsed) => panic!("expected {source:?} to fail, got {parsed:?}"),
        Err(e) => e,
    }
}

fn dump(source: &str) -> String {
    let mut arena = Arena::new(1 << 12);
    let parsed = parse(&mut arena, source).expect("parsing failed");
    format!("{parsed:?}")
}

#[test]
fn test_literals() {
    assert_eq!(dump("42"), "Int(42)");
    assert_eq!(dump("3.25"), "Float(3.25)");
    assert_eq!(dump("7."), "Float(7.0)");
    assert_eq!(dump("99999999999999999999"), "Int(9223372036854775807)");
}

#[test]
fn test_root_node() {
    let mut arena = Arena::new(1 << 12);
    let parsed = parse(&mut arena, "1 + 2").unwrap();
    assert_eq!(parsed.source, "1 + 2");
    assert_eq!(parsed.arena.len(), 3);
    let Expr::Add { lhs, rhs } = *parsed.root().view() else {
        panic!("expected an addition, got {parsed:?}");
    };
    assert_eq!(parsed.arena.get(lhs), &Expr::Int(1));
    assert_eq!(parsed.arena.get(rhs), &Expr::Int(2));
}

#[test]
fn test_empty_input() {
    assert_eq!(
        parse_err(""),
        ParseError::new(ParseErrorKind::UnexpectedEnd, Span::new(0, 0))
    );
    assert_eq!(
        parse_err("   "),
        ParseError::new(ParseErrorKind::UnexpectedEnd, Span::new(3, 3))
    );
    assert_eq!(parse_err("--").kind, ParseErrorKind::UnexpectedEnd);
}

#[test]
fn test_dangling_operator() {
    assert_eq!(
        parse_err("1 +"),
        ParseError::new(ParseErrorKind::UnexpectedEnd, Span::new(3, 3))
    );
    assert_eq!(parse_err("1 * 2 -").kind, ParseErrorKind::UnexpectedEnd);
}

#[test]
fn test_unexpected_tokens() {
    assert_eq!(
        parse_err("x"),
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: Token::Other('x')
            },
            Span::new(0, 1)
        )
    );
    assert_eq!(
        parse_err("1 + * 2"),
        ParseError::new(
            ParseErrorKind::UnexpectedToken { found: Token::Mul },
            Span::new(4, 5)
        )
    );
    assert_eq!(
        parse_err(")").kind,
        ParseErrorKind::UnexpectedToken {
            found: Token::RParen
        }
    );
    assert_eq!(
        parse_err(".5").kind,
        ParseErrorKind::UnexpectedToken {
            found: Token::Other('.')
        }
    );
    assert_eq!(
        parse_err("2 / / 3").kind,
        ParseErrorKind::UnexpectedToken { found: Token::Div }
    );
}

#[test]
fn test_trailing_input_is_ignored() {
    crate::test_utils::init_test_logging();
    assert_eq!(dump("1 2"), "Int(1)");
    assert_eq!(dump("3 x"), "Int(3)");
    assert_eq!(dump("1 + 2 )"), "Add(Int(1), Int(2))");
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_err("1 + x").to_string(),
        "expected a number, found unrecognized character 'x' at 4..5"
    );
    assert_eq!(
        parse_err("1 -").to_string(),
        "expected a number, found end of input at 3..3"
    );
    assert_eq!(parse_err("").code(), "P002");
    assert_eq!(parse_err("#").code(), "P001");
    assert!(parse_err("#").help().is_some());
}

#[test]
fn test_arena_too_small() {
    // "1 + 2" needs three nodes.
    let mut arena = Arena::new(NODE_SIZE * 2);
    let err = parse(&mut arena, "1 + 2").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::ArenaExhausted(_)));
    // The failing node is the addition, reported at the operator.
    assert_eq!(err.span, Span::new(2, 3));
    assert_eq!(err.code(), "P003");

    let mut arena = Arena::new(NODE_SIZE * 3);
    assert!(parse(&mut arena, "1 + 2").is_ok());
}

#[test]
fn test_arena_too_small_for_negation() {
    let mut arena = Arena::new(NODE_SIZE);
    assert!(matches!(
        parse(&mut arena, "-1").unwrap_err().kind,
        ParseErrorKind::ArenaExhausted(_)
    ));
    // Even signs need no wrapper node.
    assert!(parse(&mut arena, "--1").is_ok());

    let mut arena = Arena::new(0);
    assert!(parse(&mut arena, "1").is_err());
}

#[test]
fn test_arena_is_reset_between_parses() {
    let mut arena = Arena::new(NODE_SIZE * 3);
    for _ in 0..4 {
        let parsed = parse(&mut arena, "1 * 2").unwrap();
        assert_eq!(parsed.arena.len(), 3);
    }
}

#[test]
fn test_groups_add_no_nodes() {
    assert_eq!(dump("(1)"), "Int(1)");
    assert_eq!(dump("((2.5))"), "Float(2.5)");
    assert_eq!(dump("(1 + 2) * 3"), "Mul(Add(Int(1), Int(2)), Int(3))");
    assert_eq!(dump("1 - (2 - 3)"), "Sub(Int(1), Sub(Int(2), Int(3)))");
    assert_eq!(dump("-(1 + 2)"), "Neg(Add(Int(1), Int(2)))");
    assert_eq!(dump("--(4)"), "Int(4)");
}

#[test]
fn test_unclosed_groups() {
    assert_eq!(
        parse_err("(1 + 2"),
        ParseError::new(
            ParseErrorKind::UnclosedGroup { found: Token::End },
            Span::new(6, 6)
        )
    );
    assert_eq!(
        parse_err("(1 2)"),
        ParseError::new(
            ParseErrorKind::UnclosedGroup {
                found: Token::Int(2)
            },
            Span::new(3, 4)
        )
    );
    assert_eq!(parse_err("()").kind, ParseErrorKind::UnexpectedToken {
        found: Token::RParen
    });
    assert_eq!(parse_err("(1 +)").code(), "P001");
    assert_eq!(
        parse_err("(").to_string(),
        "expected a number, found end of input at 1..1"
    );
    assert_eq!(
        parse_err("(3").to_string(),
        "expected ')', found end of input at 2..2"
    );
}

#[test]
fn test_nesting_limit() {
    let deepest = format!(
        "{}1{}",
        "(".repeat(MAX_NESTING_DEPTH),
        ")".repeat(MAX_NESTING_DEPTH)
    );
    assert_eq!(dump(&deepest), "Int(1)");

    let too_deep = format!("({deepest})");
    let err = parse_err(&too_deep);
    assert_eq!(
        err.kind,
        ParseErrorKind::MaxDepthExceeded {
            depth: MAX_NESTING_DEPTH + 1,
            max_depth: MAX_NESTING_DEPTH
        }
    );
    // Reported at the innermost opening parenthesis.
    assert_eq!(err.span, Span::new(MAX_NESTING_DEPTH, MAX_NESTING_DEPTH + 1));
    assert_eq!(err.code(), "P005");
}

/// `1 + 1 + ...` with `ops` additions, in an arena that fits every node.
fn left_chain(ops: usize) -> (String, Arena) {
    let source = format!("1{}", " + 1".repeat(ops));
    (source, Arena::new(NODE_SIZE * (2 * ops + 1)))
}

#[test]
fn test_tree_height_limit() {
    // A chain of n additions is n + 1 levels tall.
    let (source, mut arena) = left_chain(MAX_TREE_HEIGHT - 1);
    let parsed = parse(&mut arena, &source).unwrap();
    assert_eq!(parsed.eval(), Ok(MAX_TREE_HEIGHT as f64));

    let (source, mut arena) = left_chain(MAX_TREE_HEIGHT);
    let err = parse(&mut arena, &source).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::TreeTooTall {
            height: MAX_TREE_HEIGHT + 1,
            max_height: MAX_TREE_HEIGHT
        }
    );
    // Reported at the last operator.
    let last_op = source.rfind('+').unwrap();
    assert_eq!(err.span, Span::new(last_op, last_op + 1));
    assert_eq!(err.code(), "P006");
}

#[test]
fn test_long_chain_fails_instead_of_overflowing() {
    let (source, mut arena) = left_chain(50_000);
    let err = parse(&mut arena, &source).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::TreeTooTall { .. }), "{err}");
}

#[test]
fn test_negation_counts_toward_height() {
    // Grouped negations nest without sharing a sign run.
    let source = format!("{}1{}", "-(".repeat(100), ")".repeat(100));
    let mut arena = Arena::new(1 << 12);
    assert_eq!(parse(&mut arena, &source).unwrap().eval(), Ok(1.0));

    let source = format!("-(1{})", " * 1".repeat(MAX_TREE_HEIGHT - 1));
    let mut arena = Arena::new(1 << 16);
    let err = parse(&mut arena, &source).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::TreeTooTall {
            height: MAX_TREE_HEIGHT + 1,
            max_height: MAX_TREE_HEIGHT
        }
    );
    assert_eq!(err.span, Span::new(1, 2));
}
