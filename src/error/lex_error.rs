use thiserror::Error;

/// Errors raised while splitting source text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that no token starts with.
    #[error("Line {line}: unknown token starting with '{character}'.")]
    UnknownCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
}

impl LexError {
    /// The source line the error points at.
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownCharacter { line, .. } => *line,
        }
    }
}
