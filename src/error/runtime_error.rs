use std::{fmt, io};

use thiserror::Error;

use crate::interpreter::operator::OpFamily;

/// Which operand an operator found missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The operand before the operator.
    Left,
    /// The operand after the operator.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left-hand"),
            Self::Right => write!(f, "right-hand"),
        }
    }
}

#[derive(Debug, Error)]
/// Represents semantic and evaluation errors raised while executing.
pub enum RuntimeError {
    /// A live path read a variable that was never assigned.
    #[error("Line {line}: variable '{name}' not declared.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A live `exec` named a task that has not been declared (yet).
    #[error("Line {line}: task '{name}' doesn't exist.")]
    UnknownTask {
        /// The name of the task.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A new variable was introduced inside a block.
    #[error("Line {line}: variable '{name}' declared in local scope.")]
    LocalVariableDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A task was declared inside a block.
    #[error("Line {line}: task '{name}' declared in local scope.")]
    LocalTaskDeclaration {
        /// The name of the task.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator had too few operands on the stack.
    #[error("Line {line}: expected {side} side number to perform {family} operation.")]
    MissingOperand {
        /// The operand that was missing.
        side:   Side,
        /// The family of the operator being applied.
        family: OpFamily,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Writing the output of `print` failed.
    #[error("unable to write program output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    /// The source line the error points at, if it has one.
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::UnknownTask { line, .. }
            | Self::LocalVariableDeclaration { line, .. }
            | Self::LocalTaskDeclaration { line, .. }
            | Self::MissingOperand { line, .. } => Some(*line),
            Self::Output(_) => None,
        }
    }
}
