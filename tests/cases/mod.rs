#![allow(dead_code)]

use pretty_assertions::assert_eq;
use tally::{Engine, EngineOptions, Error};

/// Runs `input` through a fresh engine and checks the canonical rendering
/// and the value, then checks that the rendering itself runs to the same
/// result.
pub fn check_evaluation(input: &str, formatted: &str, value: &str) {
    let mut engine = Engine::new(EngineOptions::default());
    let evaluation = engine
        .run(input)
        .unwrap_or_else(|e| panic!("running {input:?} failed: {e}"));
    assert_eq!(evaluation.rendering.text, formatted);
    assert_eq!(evaluation.value_text(), value);

    let again = engine
        .run(formatted)
        .unwrap_or_else(|e| panic!("running the rendering {formatted:?} failed: {e}"));
    assert_eq!(again.rendering.text, formatted);
    assert_eq!(again.value_text(), value);
}

/// Runs `input` and checks it fails with the error `code`.
pub fn check_error(input: &str, code: &str) {
    let mut engine = Engine::new(EngineOptions::default());
    match engine.run(input) {
        Ok(evaluation) => panic!("expected {input:?} to fail, got {evaluation}"),
        Err(Error::Parse(e)) => assert_eq!(e.code(), code, "{input:?}: {e}"),
        Err(e @ Error::Eval(_)) => assert_eq!("eval", code, "{input:?}: {e}"),
    }
}

macro_rules! test_case {
    ($name:ident, input: $input:expr, formatted: $formatted:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            $crate::cases::check_evaluation($input, $formatted, $value);
        }
    };
    ($name:ident, input: $input:expr, error: $code:expr $(,)?) => {
        #[test]
        fn $name() {
            $crate::cases::check_error($input, $code);
        }
    };
}
