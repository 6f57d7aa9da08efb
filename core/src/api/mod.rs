//! Public API for the tally calculator.
//!
//! An [`Engine`] owns the arena and the limits for one stream of input lines.
//! Each call to [`Engine::run`] parses a line, renders its canonical form, and
//! evaluates it.
//!
//! # Example
//!
//! ```
//! use tally_core::api::{Engine, EngineOptions};
//!
//! let mut engine = Engine::new(EngineOptions::default());
//!
//! let evaluation = engine.run("1 + 2 * 3").unwrap();
//! assert_eq!(evaluation.rendering.text, "(1 + (2 * 3))");
//! assert_eq!(evaluation.value, 7.0);
//!
//! // The arena is reused by the next line.
//! assert!(engine.run("1 +").is_err());
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::{Engine, Evaluation, Rendering};
pub use error::Error;
pub use options::EngineOptions;
