/// Lexical errors.
///
/// Raised for characters that do not start any token. The lexer keeps going
/// after one, so all of them are collected before execution is abandoned.
pub mod lex_error;
/// Runtime errors.
///
/// Contains the semantic and evaluation errors raised while executing: unknown
/// variables and tasks, declarations outside the global scope, operators
/// missing an operand, and output failures.
pub mod runtime_error;
/// Syntax errors.
///
/// Grammar violations found by the single-pass walk, in live and dead branches
/// alike.
pub mod syntax_error;

use thiserror::Error;

pub use lex_error::LexError;
pub use runtime_error::{RuntimeError, Side};
pub use syntax_error::SyntaxError;

/// Any error that stops a program.
///
/// Every variant renders as one or more `Line N: <message>.` lines, which is
/// exactly what the command line prints before exiting.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more characters could not be tokenized; nothing was executed.
    #[error("{}", render_lines(.0))]
    Lex(Vec<LexError>),
    /// The token stream violates the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A semantic or evaluation error on the executed path.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The line of the first error, if the error carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Lex(errors) => errors.first().map(LexError::line),
            Self::Syntax(error) => Some(error.line()),
            Self::Runtime(error) => error.line(),
        }
    }
}

impl From<Vec<LexError>> for Error {
    fn from(errors: Vec<LexError>) -> Self {
        Self::Lex(errors)
    }
}

fn render_lines(errors: &[LexError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
