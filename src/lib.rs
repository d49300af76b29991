//! # jis
//!
//! jis is an interpreter for a tiny imperative scripting language with numeric
//! variables, `if`/`else`, `while`, `print` and named, parameterless blocks
//! called tasks that are run with `exec`.
//!
//! Programs are never turned into a syntax tree. The executor walks the token
//! stream once, executing statements on a live path and only checking the
//! syntax of dead branches; loops and task calls jump back and forth over the
//! same tokens.
//!
//! ```text
//! Countdown {
//!     while n > 0 {
//!         print n;
//!         n = n - 1;
//!     }
//! }
//!
//! n = 3;
//! exec Countdown;
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, Write};

use crate::{
    error::Error,
    interpreter::{core::Context, lexer::tokenize},
};

/// Provides the error types for lexing and execution.
///
/// Every error carries the line it was raised on and renders as
/// `Line N: <message>.`
///
/// # Responsibilities
/// - Defines one enum per error category (lexical, syntactic, runtime).
/// - Wraps them in a single [`Error`] returned by the entry points.
pub mod error;
/// Orchestrates lexing and execution.
///
/// # Responsibilities
/// - Tokenizes source text.
/// - Evaluates expressions and executes statements in a single walk.
/// - Owns the variable and task tables of a run.
pub mod interpreter;

/// Runs a program, printing its output to standard output.
///
/// # Errors
/// Returns every lexical error if the source could not be tokenized (nothing
/// is executed then), or the first error hit while executing.
///
/// # Examples
/// ```
/// use jis::run;
///
/// assert!(run("x = 1; print x + 1;").is_ok());
///
/// // `y` is never declared.
/// assert!(run("print y;").is_err());
/// ```
pub fn run(source: &str) -> Result<(), Error> {
    let stdout = io::stdout();
    run_with_output(source, stdout.lock())
}

/// Runs a program, writing the output of every executed `print` to `out`.
///
/// # Errors
/// Same as [`run`]. Output produced before an execution error has already
/// been written to `out`.
///
/// # Examples
/// ```
/// use jis::run_with_output;
///
/// let mut out = Vec::new();
/// run_with_output("i = 0; while i < 3 { print i; i = i + 1; }", &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "0.000000\n1.000000\n2.000000\n");
/// ```
pub fn run_with_output<W: Write>(source: &str, out: W) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    Context::new(tokens, out).run()
}
