use std::fs;

use jis::{
    error::{Error, LexError, RuntimeError, Side, SyntaxError},
    interpreter::operator::OpFamily,
    run_with_output,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn program_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "jis"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));

        count += 1;
        match output_of(&source) {
            Ok(actual) => assert_eq!(actual, expected, "output of {path:?}"),
            Err(e) => panic!("Program {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn output_of(src: &str) -> Result<String, Error> {
    let mut out = Vec::new();
    run_with_output(src, &mut out)?;
    Ok(String::from_utf8(out).expect("print only writes ASCII"))
}

fn assert_output(src: &str, expected: &[&str]) {
    match output_of(src) {
        Ok(actual) => {
            let expected: String = expected.iter().map(|line| format!("{line}\n")).collect();
            assert_eq!(actual, expected);
        },
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn failure_of(src: &str) -> Error {
    match output_of(src) {
        Ok(out) => panic!("Script succeeded but was expected to fail, printing:\n{out}"),
        Err(e) => e,
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_output("print 2 + 3 * 4;", &["14.000000"]);
    assert_output("print (2 + 3) * 4;", &["20.000000"]);
    assert_output("print 10 - 4 - 3;", &["3.000000"]);
    assert_output("print 100 / 10 / 5;", &["2.000000"]);
    assert_output("print 2 * (3 + (4 - 1) * 2) - 1;", &["17.000000"]);
    assert_output("print 7 / 2;", &["3.500000"]);
}

#[test]
fn comparisons_and_logic_yield_zero_or_one() {
    assert_output("print 1 < 2; print 2 < 1; print 3 <= 3; print 3 >= 4;",
                  &["1.000000", "0.000000", "1.000000", "0.000000"]);
    assert_output("print 5 == 5; print 5 != 5; print 4 > 3;",
                  &["1.000000", "0.000000", "1.000000"]);
    assert_output("print 5 && 3; print 0 || 0; print 0 || 9; print 2 && 0;",
                  &["1.000000", "0.000000", "1.000000", "0.000000"]);
}

#[test]
fn logical_operators_bind_looser_than_comparisons() {
    assert_output("print 1 < 2 && 3 < 4;", &["1.000000"]);
    assert_output("print 1 || 0 && 0;", &["1.000000"]);
    assert_output("print 1 + 1 == 2;", &["1.000000"]);
}

#[test]
fn unmatched_open_paren_is_tolerated() {
    assert_output("print 3 * (4 + 5;", &["27.000000"]);
}

#[test]
fn division_by_zero_follows_float_semantics() {
    assert_output("print 1 / 0;", &["inf"]);
}

#[test]
fn if_else_picks_one_branch() {
    assert_output("if (0) { print 1; } else { print 2; }", &["2.000000"]);
    assert_output("if 1 { print 1; } else { print 2; }", &["1.000000"]);
    assert_output("if 0 { print 1; } print 3;", &["3.000000"]);
}

#[test]
fn nested_if_inside_dead_branch_stays_dead() {
    assert_output("x = 0; if x { if 1 { print 1; } else { print 2; } } else { print 3; }",
                  &["3.000000"]);
}

#[test]
fn while_loop_counts() {
    assert_output("i = 0; while (i < 3) { print i; i = i + 1; }",
                  &["0.000000", "1.000000", "2.000000"]);
}

#[test]
fn while_loop_with_false_condition_never_runs() {
    assert_output("i = 5; while i < 3 { print i; i = i + 1; } print i;", &["5.000000"]);
}

#[test]
fn nested_loops() {
    assert_output(r"
        i = 0;
        j = 0;
        total = 0;
        while i < 3 {
            j = 0;
            while j < 2 {
                total = total + 1;
                j = j + 1;
            }
            i = i + 1;
        }
        print total;
        ",
                  &["6.000000"]);
}

#[test]
fn global_variable_is_mutable_from_nested_scope() {
    assert_output("x = 1; if 1 { x = x + 41; } print x;", &["42.000000"]);
}

#[test]
fn declaring_variable_in_nested_scope_is_error() {
    let err = failure_of("if 1 {\n  y = 2;\n}");

    assert!(matches!(err,
                     Error::Runtime(RuntimeError::LocalVariableDeclaration { ref name, line: 2 })
                     if name == "y"));
    assert_eq!(err.to_string(), "Line 2: variable 'y' declared in local scope.");
}

#[test]
fn declaring_variable_in_dead_nested_scope_is_allowed() {
    assert_output("if 0 { y = 2; } print 1;", &["1.000000"]);
}

#[test]
fn tasks_run_once_per_exec_and_return() {
    assert_output(r"
        count = 0;
        Bump {
            count = count + 1;
        }
        exec Bump;
        print count;
        exec Bump;
        exec Bump;
        print count;
        ",
                  &["1.000000", "3.000000"]);
}

#[test]
fn task_never_called_never_runs() {
    assert_output("Shout { print 99; } print 1;", &["1.000000"]);
}

#[test]
fn task_called_from_nested_scope_returns_to_call_site() {
    assert_output(r"
        n = 0;
        Report { print n; }
        while n < 2 {
            n = n + 1;
            if n == 2 { exec Report; }
            print 10 + n;
        }
        ",
                  &["11.000000", "2.000000", "12.000000"]);
}

#[test]
fn task_body_runs_at_global_scope() {
    assert_output("Init { fresh = 7; } if 1 { exec Init; } print fresh;", &["7.000000"]);
}

#[test]
fn tasks_can_call_other_tasks() {
    assert_output("Inner { print 1; } Outer { exec Inner; print 2; } exec Outer; print 3;",
                  &["1.000000", "2.000000", "3.000000"]);
}

#[test]
fn task_body_may_use_variables_declared_later() {
    assert_output("Show { print later; } later = 5; exec Show;", &["5.000000"]);
}

#[test]
fn redeclared_task_uses_latest_body() {
    assert_output("Say { print 1; } Say { print 2; } exec Say;", &["2.000000"]);
}

#[test]
fn exec_before_declaration_is_error() {
    let err = failure_of("exec Later;\nLater { print 1; }");

    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownTask { line: 1, .. })));
    assert_eq!(err.to_string(), "Line 1: task 'Later' doesn't exist.");
}

#[test]
fn exec_of_unknown_task_in_dead_branch_is_allowed() {
    assert_output("if 0 { exec Missing; } print 1;", &["1.000000"]);
}

#[test]
fn task_declared_in_local_scope_is_error() {
    let err = failure_of("if 1 {\n Nested { print 1; }\n}");

    assert!(matches!(err, Error::Runtime(RuntimeError::LocalTaskDeclaration { line: 2, .. })));
}

#[test]
fn task_declared_inside_task_is_error() {
    let err = failure_of("Outer {\n  Inner { print 1; }\n}");

    assert!(matches!(err, Error::Runtime(RuntimeError::LocalTaskDeclaration { .. })));
}

#[test]
fn undeclared_variable_is_error() {
    let err = failure_of("x = 1;\nprint x + missing;");

    assert!(matches!(err,
                     Error::Runtime(RuntimeError::UnknownVariable { ref name, line: 2 })
                     if name == "missing"));
    assert_eq!(err.to_string(), "Line 2: variable 'missing' not declared.");
}

#[test]
fn undeclared_variable_in_dead_branch_is_allowed() {
    assert_output("if 0 { print nothing; } print 1;", &["1.000000"]);
}

#[test]
fn self_referencing_new_variable_is_error() {
    assert!(matches!(failure_of("x = x + 1;"),
                     Error::Runtime(RuntimeError::UnknownVariable { .. })));
}

#[test]
fn output_before_error_is_kept() {
    let mut out = Vec::new();
    let result = run_with_output("print 1;\nprint oops;", &mut out);

    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "1.000000\n");
}

#[test]
fn missing_operands_are_errors() {
    let err = failure_of("print 1 +;");
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::MissingOperand { side:   Side::Left,
                                                                   family: OpFamily::Arithmetic,
                                                                   .. })));
    assert_eq!(err.to_string(),
               "Line 1: expected left-hand side number to perform arithmetic operation.");

    let err = failure_of("print < 2;");
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::MissingOperand { side:   Side::Left,
                                                                   family: OpFamily::Comparison,
                                                                   .. })));

    let err = failure_of("print && ;");
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::MissingOperand { side:   Side::Right,
                                                                   family: OpFamily::Logical,
                                                                   .. })));
}

#[test]
fn missing_operand_in_dead_branch_is_still_error() {
    assert!(matches!(failure_of("if 0 { print 1 *; }"),
                     Error::Runtime(RuntimeError::MissingOperand { .. })));
}

#[test]
fn syntax_errors_in_dead_branches_are_reported() {
    let err = failure_of("if 0 {\n print 1\n}");

    assert_eq!(err.to_string(),
               "Line 3: expected an operator or terminating symbol ';', but got '}' instead.");
}

#[test]
fn syntax_errors_in_uncalled_tasks_are_reported() {
    let err = failure_of("Broken {\n  x 1;\n}");

    assert_eq!(err.to_string(), "Line 2: expected '=' after variable name.");
}

#[test]
fn missing_terminators_are_errors() {
    assert!(matches!(failure_of("print 1"),
                     Error::Syntax(SyntaxError::Expected { message: "expected ';'", .. })));
    assert!(matches!(failure_of("if 1 print 1;"),
                     Error::Syntax(SyntaxError::UnexpectedInExpression { terminator: '{', .. })));
    assert!(matches!(failure_of("while 1"),
                     Error::Syntax(SyntaxError::Expected { message: "expected '{'", .. })));
    assert!(matches!(failure_of("if 1 { print 1;"),
                     Error::Syntax(SyntaxError::Expected { message: "expected '}'", .. })));
    assert!(matches!(failure_of("if 1 { } else print 2;"),
                     Error::Syntax(SyntaxError::Expected { message: "expected '{' after 'else'",
                                                           .. })));
    assert!(matches!(failure_of("Task print 1;"),
                     Error::Syntax(SyntaxError::Expected { message: "expected '{' after task name",
                                                           .. })));
}

#[test]
fn exec_requires_task_name_and_semicolon() {
    assert!(matches!(failure_of("exec x;"),
                     Error::Syntax(SyntaxError::Expected { message: "expected task name after 'exec'",
                                                           .. })));
    assert!(matches!(failure_of("Go { } exec Go"),
                     Error::Syntax(SyntaxError::Expected { message: "expected ';' after task name",
                                                           .. })));
}

#[test]
fn statement_must_start_with_statement_token() {
    let err = failure_of("x = 1;\n5 = x;");

    assert_eq!(err.to_string(), "Line 2: expected a statement, but got '5' instead.");
}

#[test]
fn empty_and_unjoined_expressions_are_errors() {
    assert!(matches!(failure_of("print ;"),
                     Error::Syntax(SyntaxError::EmptyExpression { terminator: ';', .. })));
    assert!(matches!(failure_of("print 1 2;"),
                     Error::Syntax(SyntaxError::MissingOperator { .. })));
}

#[test]
fn lexical_errors_stop_before_execution() {
    let mut out = Vec::new();
    let err = run_with_output("print 1;\nx = 2 # 3;\ny = 4 @ 5;", &mut out).unwrap_err();

    assert!(out.is_empty());
    assert!(matches!(&err,
                     Error::Lex(errors)
                     if errors == &[LexError::UnknownCharacter { character: '#', line: 2 },
                                    LexError::UnknownCharacter { character: '@', line: 3 }]));
    assert_eq!(err.to_string(),
               "Line 2: unknown token starting with '#'.\nLine 3: unknown token starting with '@'.");
    assert_eq!(err.line(), Some(2));
}

#[test]
fn comments_are_ignored() {
    assert_output("// setup\nx = 2; // two\nprint x; // done", &["2.000000"]);
}

#[test]
fn runs_are_deterministic() {
    let src = fs::read_to_string("tests/programs/fibonacci.jis").unwrap();

    assert_eq!(output_of(&src).unwrap(), output_of(&src).unwrap());
}
