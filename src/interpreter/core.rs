use std::io::Write;

use tracing::debug;

use crate::{
    error::{Error, RuntimeError, SyntaxError},
    interpreter::{
        lexer::{Token, TokenKind},
        table::{TaskTable, VariableTable},
    },
};

/// Result type used by the executor and the expression evaluator.
pub type ExecResult<T> = Result<T, Error>;

/// Scope depth of top-level statements.
pub const GLOBAL_SCOPE: usize = 0;

/// How a statement is walked.
///
/// Both modes go through the same grammar rules, so a dead branch is checked
/// exactly as strictly as a live one. Only `Execute` touches the tables or the
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The statement is on a live path: assign, print and call tasks.
    Execute,
    /// The statement is unreachable: check its syntax and nothing else.
    Validate,
}

impl Mode {
    /// Whether side effects take place.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// The mode of a block guarded by `condition`.
    ///
    /// ```
    /// use jis::interpreter::core::Mode;
    ///
    /// assert_eq!(Mode::Execute.narrow(true), Mode::Execute);
    /// assert_eq!(Mode::Execute.narrow(false), Mode::Validate);
    /// assert_eq!(Mode::Validate.narrow(true), Mode::Validate);
    /// ```
    #[must_use]
    pub const fn narrow(self, condition: bool) -> Self {
        if self.is_live() && condition { Self::Execute } else { Self::Validate }
    }
}

/// A saved position in the token stream.
///
/// Loops jump back to the checkpoint taken before their condition; task calls
/// jump back to the one taken after the `exec` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Index of the token to resume at.
    pub cursor: usize,
    /// Scope depth to resume with.
    pub scope:  usize,
}

/// Stores the interpreter state for one program run.
///
/// The token sequence is fixed once the context is built; all control flow is
/// cursor movement over it. Variables and tasks live for the whole run.
pub struct Context<'src, W: Write> {
    tokens:               Vec<Token<'src>>,
    cursor:               usize,
    scope:                usize,
    pub(crate) variables: VariableTable<'src>,
    pub(crate) tasks:     TaskTable<'src>,
    pub(crate) out:       W,
}

impl<'src, W: Write> Context<'src, W> {
    /// Creates a context positioned at the first token, with empty tables.
    /// `print` statements write to `out`.
    pub fn new(tokens: Vec<Token<'src>>, out: W) -> Self {
        Self { tokens,
               cursor: 0,
               scope: GLOBAL_SCOPE,
               variables: VariableTable::new(),
               tasks: TaskTable::new(),
               out }
    }

    /// Executes every top-level statement in order.
    ///
    /// # Errors
    /// Returns the first syntax, semantic or evaluation error encountered.
    /// Output written before the error stays written.
    ///
    /// # Example
    /// ```
    /// use jis::interpreter::{core::Context, lexer::tokenize};
    ///
    /// let tokens = tokenize("x = 2; y = x * 21;").unwrap();
    /// let mut context = Context::new(tokens, Vec::new());
    /// context.run().unwrap();
    ///
    /// assert_eq!(context.variables().get("y"), Some(42.0));
    /// ```
    pub fn run(&mut self) -> ExecResult<()> {
        debug!(tokens = self.tokens.len(), "executing program");

        while !self.at_end() {
            self.exec_statement(Mode::Execute)?;
        }

        self.out.flush().map_err(RuntimeError::Output)?;
        Ok(())
    }

    /// The global variables declared so far.
    pub const fn variables(&self) -> &VariableTable<'src> {
        &self.variables
    }

    /// The tasks declared so far.
    pub const fn tasks(&self) -> &TaskTable<'src> {
        &self.tasks
    }

    /// Consumes the context and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// The token under the cursor, or `None` past the end of the stream.
    pub(crate) fn current(&self) -> Option<Token<'src>> {
        self.tokens.get(self.cursor).copied()
    }

    /// Line of the token under the cursor, or of the last token at the end.
    pub(crate) fn current_line(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.last().copied())
            .map_or(1, |token| token.line)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == kind)
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_end() {
            self.cursor += 1;
        }
    }

    /// Steps over a token of the given kind, or fails with `message`.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &'static str) -> ExecResult<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(SyntaxError::Expected { message,
                                        line: self.current_line() }.into())
        }
    }

    pub(crate) const fn scope(&self) -> usize {
        self.scope
    }

    pub(crate) fn enter_scope(&mut self) {
        self.scope += 1;
    }

    pub(crate) const fn checkpoint(&self) -> Checkpoint {
        Checkpoint { cursor: self.cursor,
                     scope:  self.scope, }
    }

    pub(crate) fn jump(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.scope = checkpoint.scope;
    }

    /// Checks for the `}` closing the current block.
    ///
    /// At the closing brace (or at the end of the stream, where the brace is
    /// missing) the scope is left and the brace consumed.
    pub(crate) fn reached_end_of_block(&mut self) -> ExecResult<bool> {
        if self.check(TokenKind::RBrace) || self.at_end() {
            self.scope = self.scope.saturating_sub(1);
            self.consume(TokenKind::RBrace, "expected '}'")?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Walks statements until the closing brace of the current block.
    pub(crate) fn exec_block(&mut self, mode: Mode) -> ExecResult<()> {
        while !self.reached_end_of_block()? {
            self.exec_statement(mode)?;
        }
        Ok(())
    }
}
