use std::{fs, path::Path};

use physcalc::{console::session::Session, interpreter::evaluator::core::Features};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Separates an input line from the reply it is expected to produce.
const EXPECTATION: &str = " # => ";

#[test]
fn scripts_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        count += check_script(entry.path());
    }

    assert!(count > 0, "No expectations found in tests/scripts");
}

/// Runs every line of a script in one session and compares replies with the
/// expectations written after ` # => `. Returns the number of expectations.
fn check_script(path: &Path) -> usize {
    let content =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    let mut session = Session::new(Features::default());
    let mut count = 0;

    for (i, line) in content.lines().enumerate() {
        let (input, expected) = match line.split_once(EXPECTATION) {
            Some((input, expected)) => (input, Some(expected.trim())),
            None => (line, None),
        };
        let output = match session.run_line(input) {
            Ok(reply) => reply.lines.join("\n"),
            Err(e) => e.to_string(),
        };

        match expected {
            Some(expected) => {
                count += 1;
                assert_eq!(output, expected, "{path:?} line {}: {}", i + 1, input.trim());
            },
            None => assert!(!output.starts_with("Error") && !output.starts_with("Syntax error"),
                            "{path:?} line {} failed: {output}",
                            i + 1),
        }
    }
    count
}
