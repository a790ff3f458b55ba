use physcalc::{
    calculate,
    console::session::Session,
    error::Error,
    interpreter::evaluator::core::Features,
};
use pretty_assertions::assert_eq;

fn run_with(features: Features, src: &str) -> Result<String, Error> {
    let mut session = Session::new(features);
    let mut last = String::new();
    for line in src.lines() {
        last = session.run_line(line)?.lines.join("\n");
    }
    Ok(last)
}

fn assert_result(src: &str, expected: &str) {
    match run_with(Features::default(), src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str, expected: &str) {
    match run_with(Features::default(), src) {
        Ok(output) => panic!("Script succeeded with '{output}' but was expected to fail"),
        Err(e) => assert_eq!(e.to_string(), expected),
    }
}

#[test]
fn values_format_back() {
    assert_result("5 m", "[1] 5 m (distance)");
    assert_result("1 kg", "[1] 1 kg (mass)");
    assert_result("500 g", "[1] 0.5 kg (mass)");
    assert_result("42", "[1] 42 (number)");
}

#[test]
fn addition_requires_same_unit() {
    assert_result("3 m + 2 m", "[1] 5 m (distance)");
    assert_failure("3 m + 2 s", "Error: unit mismatch: cannot add m and s");
    assert_failure("3 m - 2 kg", "Error: unit mismatch: cannot subtract m and kg");
}

#[test]
fn derived_units_are_named() {
    assert_result("1 kg m^2 / s^2", "[1] 1 J (energy)");
    assert_result("1 N * 1 m", "[1] 1 J (energy)");
    assert_result("10 J / 2 s", "[1] 5 W (power)");
    assert_result("1 V / 1 m", "[1] 1 V / m (electric field strength)");
    assert_result("1/1 s^-1", "[1] 1 Hz (frequency)");
}

#[test]
fn prefixes_are_chosen_for_display() {
    assert_result("1500 mm", "[1] 1.5 m (distance)");
    assert_result("2 km * 3 km", "[1] 6 km² (area)");
    assert_result("0.001 s", "[1] 1 ms (time)");
    assert_result("2 μs", "[1] 2 μs (time)");
    assert_result("2 us", "[1] 2 μs (time)");
    assert_result("1 eV", "[1] 160.2176634 zJ (energy)");
}

#[test]
fn micro_sign_is_mu() {
    assert_result("5 \u{b5}s", "[1] 5 μs (time)");
}

#[test]
fn exact_arithmetic_stays_exact() {
    assert_result("1/3 + 1/3", "[1] 0.666666666667 (number)");
    let frac = Features { frac: true,
                          ..Features::default() };
    assert_eq!(run_with(frac, "1/3 + 1/3").unwrap(), "[1] 2/3 (number)");
    assert_eq!(run_with(frac, "1/3 m + 1/6 m").unwrap(), "[1] 1/2 m (distance)");
    assert_eq!(run_with(frac, "0.5 + 1/2").unwrap(), "[1] 1 (number)");
    assert_eq!(run_with(frac, "2 ^ 100").unwrap(),
               "[1] 1267650600228229401496703205376 (number)");
}

#[test]
fn powers() {
    assert_result("2 ^ 3 ^ 2", "[1] 512 (number)");
    assert_result("2 ^ -1", "[1] 0.5 (number)");
    assert_result("-2^2", "[1] 4 (number)");
    assert_result("-(2^2)", "[1] -4 (number)");
    assert_result("((3 m)^2)^(1/2)", "[1] 3 m (distance)");
    assert_failure("(3 m)^(1/2)",
                   "Error: cannot raise m to power 0.5: dimensions not divisible");
    assert_failure("2 ^ (1 m)", "Error: cannot raise to power with unit m");
    assert_failure("(-8) ^ (1/3)", "Error: raising -8 to power 0.333333333333 has no real result");
    assert_failure("(4 m^2) ^ 0.5", "Error: cannot raise m² to non-rational power 0.5");
    assert_result("(4 m^2) ^ (1/2)", "[1] 2 m (distance)");
}

#[test]
fn exact_results_beyond_floating_point() {
    assert_result("10 ^ 400", "[1] 1·10⁴⁰⁰ (number)");
    assert_result("-25 * 10 ^ -401", "[1] -2.5·10⁻⁴⁰⁰ (number)");
    assert_result("3 m * 10 ^ 500", "[1] 3·10⁴⁷⁶ Ym (distance)");
}

#[test]
fn division_by_zero() {
    assert_failure("1 / 0", "Error: division by zero");
    assert_failure("1/0", "Syntax error: invalid number 1/0");
}

#[test]
fn parentheses_distribute_signs() {
    assert_result("5 - (2 + 3)", "[1] 0 (number)");
    assert_result("-(a + b)", "[1] -a - b");
    assert_result("a - (b - c)", "[1] a - b + c");
    assert_result("a / (b / c)", "[1] a / b * c");
    assert_result("a - -b", "[1] a + b");
    assert_result("--x", "[1] x");
}

#[test]
fn unbound_variables_stay_symbolic() {
    assert_result("x + 3 m + 2 m", "[1] 5 m + x");
    assert_result("2 * x * 3 / y", "[1] 6 * x / y");
    assert_result("2 * (3 + x)", "[1] 2 * (3 + x)");
    assert_result("z ^ 2 * 2 * 3", "[1] 6 * z ^ 2");
    assert_result("x ^ (1 + 1)", "[1] x ^ (1 + 1)");
}

#[test]
fn residuals_resolve_later() {
    assert_result("x + 3 m + 2 m\nx := 2 m\n[1]", "[3] 7 m (distance)");
    assert_result("x := 2 m\nx ^ 2", "[2] 4 m² (area)");
}

#[test]
fn self_reference_does_not_loop() {
    assert_result("y := y + 1", "[1] 1 + y");
    assert_result("y := y + 1\ny", "[2] 1 + y");
}

#[test]
fn assignments_chain() {
    assert_result("a := b := 2 m\na + b", "[2] 4 m (distance)");
    assert_failure("5 := x", "Syntax error: cannot assign to value 5");
    assert_failure("[1] := 2", "Syntax error: no such result [1]");
}

#[test]
fn failed_lines_change_nothing() {
    let mut session = Session::new(Features::default());
    assert!(session.run_line("3 m + 2 s").is_err());
    assert!(session.context().outputs.is_empty());
    assert!(session.run_line("x := 1 h as m").is_err());
    assert!(!session.context().variables.contains_key("x"));
    assert_eq!(session.run_line("x").unwrap().lines, vec!["[1] x".to_string()]);
}

#[test]
fn output_references() {
    assert_result("5 m\n[1] * 2", "[2] 10 m (distance)");
    assert_failure("5 m\n[2]", "Syntax error: no such result [2]");
    assert_failure("[0]", "Syntax error: no such result [0]");
}

#[test]
fn continuation_of_previous_result() {
    assert_result("5 m\n* 2", "[2] 10 m (distance)");
    assert_result("5 m\n+ 1 m", "[2] 6 m (distance)");
    assert_result("5 m\n-3", "[2] -3 (number)");
    assert_failure("* 2", "Syntax error: missing value before operator *");

    let no_cont = Features { cont: false,
                             ..Features::default() };
    let result = run_with(no_cont, "5 m\n* 2");
    assert_eq!(result.unwrap_err().to_string(),
               "Syntax error: missing value before operator *");
}

#[test]
fn unit_casts() {
    assert_result("90 km/h", "[1] 25 m / s (speed)");
    assert_result("90 km/h as km/h", "[1] 90 km/h (speed)");
    assert_result("90 km/h -> km/h", "[1] 90 km/h (speed)");
    assert_result("90 km/h → mph", "[1] 55.9234073014 mph (speed)");
    assert_result("1 h as min", "[1] 60 min (time)");
    assert_result("1 eV as J", "[1] 1.602176634·10⁻¹⁹ J (energy)");
    assert_failure("1 h as m", "Error: cannot display s as m");
    assert_failure("5 m as km 2", "Syntax error: found value 2 after unit cast");
    assert_failure("5 m as", "Syntax error: missing unit after as");
}

#[test]
fn syntax_errors() {
    assert_failure("2 furlong", "Syntax error: unknown unit furlong");
    assert_failure("2 m^1.5", "Syntax error: invalid power 1.5");
    assert_failure("(1 + 2", "Syntax error: missing closing parenthesis");
    assert_failure("((1 + 2)", "Syntax error: missing closing parenthesis");
    assert_failure("1 + 2)", "Syntax error: unmatched parenthesis");
    assert_failure("2 3", "Syntax error: found value 3 when expecting an operator");
    assert_failure("2 +", "Syntax error: missing value at end of line");
    assert_failure("2 + * 3", "Syntax error: found operator * when expecting a value");
    assert_failure("x = 2", "Syntax error: found equals when expecting an operator");
    assert_failure(r"\w", r"Syntax error: unknown escape \w");
    assert_failure("2 $", "Syntax error: invalid syntax at '$'");
}

#[test]
fn greek_escapes() {
    assert_result(r"\p", "[1] 3.14159265359 (number)");
    assert_result(r"\a_1 := 2 s", "[1] 2 s (time)");
    assert_result("\\a_1 := 2 s\nα_1 * 2", "[2] 4 s (time)");
}

#[test]
fn debug_prints_parsed_input() {
    let debug = Features { debug: true,
                           ..Features::default() };
    assert_eq!(run_with(debug, "1 + 2 * x").unwrap(), "(1) 1 + 2 * x\n[1] 1 + 2 * x");

    let mut session = Session::new(debug);
    assert_eq!(session.run("2 m + 1 s").lines,
               vec!["(1) 2 m + 1 s".to_string(),
                    "Error: unit mismatch: cannot add m and s".to_string()]);
    assert!(session.context().outputs.is_empty());
    assert_eq!(session.run("(1 + 2").lines,
               vec!["Syntax error: missing closing parenthesis".to_string()]);
}

#[test]
fn scripts_echo_before_failing() {
    let mut session = Session::new(Features { debug: true,
                                              ..Features::default() });
    let reply = session.run_source("1 m\n[1] + 1 s\n2 m");
    assert_eq!(reply.lines,
               vec!["(1) 1 m".to_string(),
                    "[1] 1 m (distance)".to_string(),
                    "(2) [1] + 1 s".to_string(),
                    "Error on line 2: unit mismatch: cannot add m and s".to_string()]);
}

#[test]
fn calculate_entry_point() {
    assert_eq!(calculate("3 m + 2 m").unwrap(), "5 m");
    assert_eq!(calculate("x * 2").unwrap(), "2 * x");
    assert!(calculate("3 m + 2 s").is_err());
}
