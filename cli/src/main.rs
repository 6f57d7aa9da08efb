use std::borrow::Cow;
use std::io::{self, BufRead, BufReader, Write};

use clap::{Parser, builder::RangedU64ValueParser};
use miette::{IntoDiagnostic, Result};
use reedline::{
    Emacs, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline,
    Signal, default_emacs_keybindings,
};
use tally::{
    Engine, EngineOptions, Error, Evaluation, Rendering, evaluator::EvaluatorOptions,
    render_error_to_string, render_error_to_string_no_color,
};

/// Default size of the line buffer, including room for a terminator.
const DEFAULT_LINE_CAPACITY: usize = 512;

/// Upper bounds for the size flags.
const MAX_ARENA_CAPACITY: u64 = 1 << 30;
const MAX_STACK_DEPTH: u64 = 1 << 20;
const MAX_LINE_CAPACITY: u64 = 1 << 20;

/// Tally - evaluate arithmetic expressions
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Evaluate arithmetic expressions", long_about = None)]
struct Args {
    /// Byte budget of the expression arena
    #[arg(
        long,
        default_value_t = EngineOptions::DEFAULT_ARENA_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_ARENA_CAPACITY),
    )]
    arena_capacity: usize,

    /// Maximum number of values live on the evaluation stack
    #[arg(
        long,
        default_value_t = EvaluatorOptions::DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_STACK_DEPTH),
    )]
    max_depth: usize,

    /// Input lines are cut to this many bytes minus one
    #[arg(
        long,
        default_value_t = DEFAULT_LINE_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_LINE_CAPACITY),
    )]
    line_capacity: usize,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

impl Args {
    fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            arena_capacity: self.arena_capacity,
            evaluator: EvaluatorOptions {
                max_depth: self.max_depth,
            },
            ..EngineOptions::default()
        }
    }
}

struct TallyPrompt;

impl Prompt for TallyPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({prefix}reverse-search: {}) ",
            history_search.term
        ))
    }
}

fn setup_reedline() -> Reedline {
    let edit_mode = Box::new(Emacs::new(default_emacs_keybindings()));
    Reedline::create().with_edit_mode(edit_mode)
}

/// Cuts `line` to at most `capacity - 1` bytes without splitting a character.
fn truncate_line(line: &str, capacity: usize) -> &str {
    let limit = capacity.saturating_sub(1);
    if line.len() <= limit {
        return line;
    }

    let mut end = limit;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(length = line.len(), kept = end, "input line truncated");
    &line[..end]
}

/// Where one line's results go.
struct Output<O, E> {
    out: O,
    err: E,
    color: bool,
}

impl<O: Write, E: Write> Output<O, E> {
    fn report(&mut self, error: Error, input: &str) -> io::Result<()> {
        let report = if self.color {
            render_error_to_string(&error, input)
        } else {
            render_error_to_string_no_color(&error, input)
        };
        self.err.write_all(report.as_bytes())
    }
}

fn interpret_input<O: Write, E: Write>(
    engine: &mut Engine,
    input: &str,
    debug_parse: bool,
    output: &mut Output<O, E>,
) -> io::Result<()> {
    let options = *engine.options();

    let parsed = match engine.parse(input) {
        Ok(parsed) => parsed,
        Err(e) => return output.report(e.into(), input),
    };

    if debug_parse {
        writeln!(output.out, "=== Parsed AST ===")?;
        writeln!(output.out, "{parsed:?}")?;
        writeln!(output.out)?;
    }

    let rendering = Rendering::new(&parsed, options.render_capacity);
    match parsed.eval_with_options(options.evaluator) {
        Ok(value) => writeln!(output.out, "{}", Evaluation { rendering, value }),
        Err(e) => {
            writeln!(output.out, "{rendering}")?;
            output.report(e.into(), input)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use TALLY_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("TALLY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut engine = Engine::new(args.engine_options());
    tracing::debug!(%engine, line_capacity = args.line_capacity, "engine ready");

    let mut output = Output {
        out: io::stdout(),
        err: io::stderr(),
        color: atty::is(atty::Stream::Stderr),
    };

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        let input = truncate_line(expr, args.line_capacity);
        interpret_input(&mut engine, input, args.debug_parse, &mut output).into_diagnostic()?;
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        let mut line_editor = setup_reedline();
        let prompt = TallyPrompt;

        println!("Tally - type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    let input = truncate_line(&buffer, args.line_capacity);
                    interpret_input(&mut engine, input, args.debug_parse, &mut output)
                        .into_diagnostic()?;
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!();
                    return Ok(());
                }
            }
        }
    } else {
        let stdin = io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            let input = truncate_line(&line, args.line_capacity);
            interpret_input(&mut engine, input, args.debug_parse, &mut output)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
