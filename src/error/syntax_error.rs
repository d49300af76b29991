use thiserror::Error;

/// Represents all grammar violations found while walking the token stream.
///
/// Dead branches are walked through the same grammar rules as live ones, so
/// these errors are raised regardless of whether the offending statement would
/// ever run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A required token was missing, e.g. `;`, `{`, `}` or `=`.
    #[error("Line {line}: {message}.")]
    Expected {
        /// What was expected, phrased for the user.
        message: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A token inside an expression is neither an operand, an operator nor the
    /// expression's terminator.
    #[error("Line {line}: expected an operator or terminating symbol '{terminator}', but got '{found}' instead.")]
    UnexpectedInExpression {
        /// The terminator of the expression being evaluated (`;` or `{`).
        terminator: char,
        /// The token encountered.
        found:      String,
        /// The source line where the error occurred.
        line:       usize,
    },
    /// A statement begins with a token that cannot start one.
    #[error("Line {line}: expected a statement, but got '{found}' instead.")]
    UnexpectedStatement {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The terminator was reached before any operand.
    #[error("Line {line}: expected an expression before '{terminator}'.")]
    EmptyExpression {
        /// The terminator that ended the empty expression.
        terminator: char,
        /// The source line where the error occurred.
        line:       usize,
    },
    /// Two or more operands were left without an operator joining them.
    #[error("Line {line}: expected an operator between operands.")]
    MissingOperator {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl SyntaxError {
    /// The source line the error points at.
    pub const fn line(&self) -> usize {
        match self {
            Self::Expected { line, .. }
            | Self::UnexpectedInExpression { line, .. }
            | Self::UnexpectedStatement { line, .. }
            | Self::EmptyExpression { line, .. }
            | Self::MissingOperator { line } => *line,
        }
    }
}
