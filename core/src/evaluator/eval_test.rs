//! Unit tests for the evaluator.

use super::*;
use crate::{
    Arena, Expr,
    arena::ExprId,
    parser::{self, ParseError},
};

fn run(input: &str) -> Result<f64, EvalError> {
    run_with_limits(input, EvaluatorOptions::DEFAULT_MAX_DEPTH)
}

fn run_with_limits(input: &str, max_depth: usize) -> Result<f64, EvalError> {
    let mut arena = Arena::new(1 << 12);
    let parsed = parser::parse(&mut arena, input)
        .unwrap_or_else(|e: ParseError| panic!("parsing {input:?} failed: {e}"));
    parsed.eval_with_options(EvaluatorOptions { max_depth })
}

/// `1 + (1 + (1 + ...))` with `adds` additions. Each addition keeps its left
/// operand live while the right one is evaluated, so the stack peaks at
/// `adds + 1` values.
fn right_nested_sum(arena: &mut Arena, adds: usize) -> ExprId {
    let mut rhs = arena.alloc(Expr::Int(1)).unwrap();
    for _ in 0..adds {
        let lhs = arena.alloc(Expr::Int(1)).unwrap();
        rhs = arena.alloc(Expr::Add { lhs, rhs }).unwrap();
    }
    rhs
}

#[test]
fn test_literals() {
    assert_eq!(run("42"), Ok(42.0));
    assert_eq!(run("2.5"), Ok(2.5));
    assert_eq!(run("0"), Ok(0.0));
}

#[test]
fn test_arithmetic() {
    assert_eq!(run("1 + 2 * 3"), Ok(7.0));
    assert_eq!(run("1 - 2 - 3"), Ok(-4.0));
    assert_eq!(run("8 / 4 / 2"), Ok(1.0));
    assert_eq!(run("7 / 2"), Ok(3.5));
    assert_eq!(run("1.5 * 4 - 0.5"), Ok(5.5));
    assert_eq!(run("2 * 3 + 4 * 5"), Ok(26.0));
}

#[test]
fn test_integer_division_is_floating() {
    assert_eq!(run("1 / 3"), Ok(1.0 / 3.0));
    assert_eq!(run("-7 / 2"), Ok(-3.5));
}

#[test]
fn test_negation() {
    assert_eq!(run("--5"), Ok(5.0));
    assert_eq!(run("-5 + 3"), Ok(-2.0));
    assert_eq!(run("---2.5"), Ok(-2.5));
    assert_eq!(run("2 * -3"), Ok(-6.0));
    assert_eq!(run("1 - -1"), Ok(2.0));
}

#[test]
fn test_clamped_integer() {
    assert_eq!(run("99999999999999999999"), Ok(i64::MAX as f64));
}

#[test]
fn test_division_by_zero_is_ieee() {
    assert_eq!(run("1 / 0"), Ok(f64::INFINITY));
    assert_eq!(run("-1 / 0"), Ok(f64::NEG_INFINITY));
    assert!(run("0 / 0").unwrap().is_nan());
    assert!(run("0.0 / 0").unwrap().is_nan());
}

#[test]
fn test_stack_depth_of_parsed_expressions() {
    // `1 + 2 * 3` holds three values at its peak.
    assert_eq!(run_with_limits("1 + 2 * 3", 3), Ok(7.0));
    assert_eq!(
        run_with_limits("1 + 2 * 3", 2),
        Err(EvalError::StackOverflow {
            depth: 3,
            max_depth: 2
        })
    );

    // Left-associative chains never need more than two.
    assert_eq!(run_with_limits("1 + 2 + 3 + 4 + 5 + 6", 2), Ok(21.0));

    // Negation works in place.
    assert_eq!(run_with_limits("-5", 1), Ok(-5.0));
    assert!(run_with_limits("5", 0).is_err());
}

#[test]
fn test_long_left_chain_within_default_depth() {
    // 100 literals and 99 additions fit the 4 KiB arena.
    let input = ["1"; 100].join(" + ");
    assert_eq!(run(&input), Ok(100.0));
}

#[test]
fn test_right_nesting_at_the_limit() {
    let mut arena = Arena::new(1 << 16);
    let root = right_nested_sum(&mut arena, 31);
    assert_eq!(eval(&arena, root), Ok(32.0));
}

#[test]
fn test_right_nesting_past_the_limit_overflows() {
    let mut arena = Arena::new(1 << 16);
    let root = right_nested_sum(&mut arena, 32);
    assert_eq!(
        eval(&arena, root),
        Err(EvalError::StackOverflow {
            depth: 33,
            max_depth: 32
        })
    );

    // A deeper stack handles it.
    assert_eq!(
        eval_with_options(&arena, root, EvaluatorOptions { max_depth: 33 }),
        Ok(33.0)
    );
}

#[test]
fn test_repeated_evaluation() {
    let mut arena = Arena::new(1 << 12);
    let parsed = parser::parse(&mut arena, "6 / 3").unwrap();
    assert_eq!(parsed.eval(), Ok(2.0));
    assert_eq!(parsed.eval(), Ok(2.0));
}

#[test]
fn test_error_display() {
    assert_eq!(
        EvalError::StackOverflow {
            depth: 33,
            max_depth: 32
        }
        .to_string(),
        "evaluation stack overflow: depth 33 exceeds maximum of 32"
    );
}

#[test]
fn test_parenthesized_right_nesting() {
    // Every `1 + (` keeps one value live until the innermost group closes.
    let nested = |adds: usize| format!("{}1{}", "1 + (".repeat(adds), ")".repeat(adds));

    assert_eq!(run(&nested(31)), Ok(32.0));
    assert_eq!(
        run(&nested(32)),
        Err(EvalError::StackOverflow {
            depth: 33,
            max_depth: 32
        })
    );
}
