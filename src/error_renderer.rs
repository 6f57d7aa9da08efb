//! Error rendering using ariadne
//!
//! Parse errors are shown against the input line with the offending span
//! underlined. Evaluation errors carry no location and print as one line.

use crate::{Error, ParseError, ParseErrorKind};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error for the line `source` to stderr
///
/// # Example
/// ```no_run
/// use tally::{Engine, EngineOptions, render_error};
///
/// let mut engine = Engine::new(EngineOptions::default());
///
/// let source = "1 + * 2";
/// if let Err(e) = engine.run(source) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for logs or other front ends)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Parse(err) => render_parse_error(err, source, writer, use_color),
        Error::Eval(err) => writeln!(writer, "Error: {err}"),
    }
}

fn label_message(error: &ParseError, source: &str) -> String {
    match &error.kind {
        ParseErrorKind::UnexpectedToken { .. } => match error.span.str_of(source) {
            Some(text) => format!("`{text}` cannot start a number"),
            None => String::from("this cannot start a number"),
        },
        ParseErrorKind::UnexpectedEnd => String::from("input ends here"),
        ParseErrorKind::ArenaExhausted(_) => String::from("no room left for this node"),
        ParseErrorKind::UnclosedGroup { .. } => String::from("expected `)` here"),
        ParseErrorKind::MaxDepthExceeded { .. } => String::from("too many nested groups"),
        ParseErrorKind::TreeTooTall { .. } => String::from("this operation nests too deeply"),
    }
}

fn render_parse_error(
    error: &ParseError,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let span = error.span.0.clone();

    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_code(error.code())
        .with_message(error.kind.to_string())
        .with_config(ariadne::Config::default().with_color(use_color))
        .with_label(
            Label::new((SOURCE_ID, span))
                .with_message(label_message(error, source))
                .with_color(Color::Red),
        );

    if let Some(help) = error.help() {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}
