//! The tally line engine.

use core::fmt;

use super::{EngineOptions, Error};
use crate::{
    String, vec,
    arena::Arena,
    parser::{self, ParseError, ParsedExpr},
    stringifier::number,
};

/// Parses, renders and evaluates input lines.
///
/// The engine owns a single [`Arena`] sized from
/// [`EngineOptions::arena_capacity`]. Every parse resets it, so a
/// [`ParsedExpr`] obtained from [`Engine::parse`] is only valid until the
/// next call.
pub struct Engine {
    options: EngineOptions,
    arena: Arena,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            arena: Arena::new(options.arena_capacity),
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse `source` into the engine's arena.
    pub fn parse<'a>(&'a mut self, source: &'a str) -> Result<ParsedExpr<'a>, ParseError> {
        parser::parse(&mut self.arena, source)
    }

    /// Parse, render and evaluate one line.
    ///
    /// # Example
    ///
    /// ```
    /// use tally_core::api::{Engine, EngineOptions, Error};
    ///
    /// let mut engine = Engine::new(EngineOptions::default());
    /// assert_eq!(engine.run("7 / 2").unwrap().to_string(), "(7 / 2) = 3.5");
    /// assert!(matches!(engine.run("7 /"), Err(Error::Parse(_))));
    /// ```
    pub fn run(&mut self, source: &str) -> Result<Evaluation, Error> {
        let options = self.options;
        let parsed = self.parse(source)?;
        let rendering = Rendering::new(&parsed, options.render_capacity);
        let value = parsed.eval_with_options(options.evaluator)?;

        tracing::debug!(rendering = %rendering, value, "evaluated");
        Ok(Evaluation { rendering, value })
    }
}

/// Canonical text of a parsed expression, as it fit in a fixed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    /// The stored text, without the terminating zero byte.
    pub text: String,
    /// Length of the full rendering, which may exceed `text.len()`.
    pub length: usize,
}

impl Rendering {
    /// Renders `parsed` into a buffer of `capacity` bytes.
    pub fn new(parsed: &ParsedExpr<'_>, capacity: usize) -> Self {
        let mut buffer = vec![0u8; capacity];
        let length = parsed.stringify(&mut buffer);
        let stored = length.min(capacity.saturating_sub(1));
        let text = String::from_utf8_lossy(&buffer[..stored]).into_owned();
        if length > stored {
            tracing::warn!(length, capacity, "rendering truncated");
        }
        Self { text, length }
    }

    pub fn is_truncated(&self) -> bool {
        self.length > self.text.len()
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The result of running one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub rendering: Rendering,
    pub value: f64,
}

impl fmt::Display for Evaluation {
    /// `"<rendering> = <value>"`, with the value in the general numeric format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.rendering)?;
        number::write_general(f, self.value)
    }
}

impl Evaluation {
    /// The value in the general numeric format.
    pub fn value_text(&self) -> String {
        number::format_general(self.value)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Engine(arena {}/{} bytes, max depth {})",
            self.arena.used(),
            self.arena.capacity(),
            self.options.evaluator.max_depth
        )
    }
}
