//! Tally - an arithmetic expression compiler
//!
//! # Overview
//!
//! Tally reads infix arithmetic over integers and decimals with `+ - * /`
//! and unary signs. Each expression is parsed into a tree allocated in a
//! fixed-budget arena, evaluated on a bounded value stack, and rendered back
//! in a canonical, fully parenthesized form.
//!
//! # Quick Start
//!
//! ```
//! use tally::{Engine, EngineOptions};
//!
//! let mut engine = Engine::new(EngineOptions::default());
//!
//! let evaluation = engine.run("-5 + 3 * 2.5").unwrap();
//! assert_eq!(evaluation.to_string(), "(-5 + (3 * 2.5)) = 2.5");
//! ```
//!
//! # Lower-level pieces
//!
//! The arena, parser, evaluator and stringifier can be driven separately:
//!
//! ```
//! use tally::{Arena, parser, stringifier};
//!
//! let mut arena = Arena::new(4096);
//! let parsed = parser::parse(&mut arena, "1 + 2 * 3").unwrap();
//! assert_eq!(parsed.eval(), Ok(7.0));
//!
//! let mut dst = [0u8; 8];
//! let len = stringifier::stringify(parsed.arena, parsed.root, &mut dst);
//! assert_eq!(len, 13);
//! assert_eq!(&dst, b"(1 + (2\0");
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from tally_core
pub use tally_core::api::{Engine, EngineOptions, Error, Evaluation, Rendering};

// Re-export the pipeline stages
pub use tally_core::{Arena, Expr, ExprId, ParsedExpr, arena, evaluator, parser, stringifier};

// Re-export errors
pub use tally_core::evaluator::EvalError;
pub use tally_core::parser::{ParseError, ParseErrorKind};
