use std::io::Write;

use tracing::{debug, trace, warn};

use crate::{
    error::{RuntimeError, SyntaxError},
    interpreter::{
        core::{Checkpoint, Context, ExecResult, GLOBAL_SCOPE, Mode},
        expression::Terminator,
        lexer::{Token, TokenKind},
        operator::is_truthy,
    },
};

impl<'src, W: Write> Context<'src, W> {
    /// Walks one statement in the given mode.
    ///
    /// A statement may be one of:
    /// - a task declaration, `Name { ... }`.
    /// - an `if` with an optional `else`.
    /// - a `while` loop.
    /// - a task call, `exec Name;`.
    /// - an assignment, `name = expr;`.
    /// - a `print expr;`.
    ///
    /// Every form consumes its own terminator, so callers just repeat until
    /// the end of the block or of the stream.
    pub(crate) fn exec_statement(&mut self, mode: Mode) -> ExecResult<()> {
        let Some(token) = self.current() else {
            return Ok(());
        };

        match token.kind {
            TokenKind::Task => self.declare_task(token),
            TokenKind::If => self.exec_if(mode),
            TokenKind::While => self.exec_while(mode),
            TokenKind::Exec => self.exec_task_call(mode),
            TokenKind::Variable => self.exec_assignment(token, mode),
            TokenKind::Print => self.exec_print(mode),
            _ => Err(SyntaxError::UnexpectedStatement { found: token.text.to_string(),
                                                        line:  token.line, }.into()),
        }
    }

    /// Registers a task and checks its body.
    ///
    /// The body is walked once in `Validate` mode; it only runs through
    /// `exec`. Tasks are registered where the declaration is reached, so a
    /// call earlier in the source does not see them.
    fn declare_task(&mut self, name: Token<'src>) -> ExecResult<()> {
        self.advance();
        self.consume(TokenKind::LBrace, "expected '{' after task name")?;

        if self.scope() > GLOBAL_SCOPE {
            return Err(RuntimeError::LocalTaskDeclaration { name: name.text.to_string(),
                                                            line: name.line, }.into());
        }

        let entry = self.checkpoint().cursor;
        if self.tasks.declare(name.text, entry).is_some() {
            warn!(task = name.text, line = name.line, "task redeclared, the latest declaration wins");
        }
        debug!(task = name.text, entry, "registered task");

        self.enter_scope();
        self.exec_block(Mode::Validate)
    }

    fn exec_if(&mut self, mode: Mode) -> ExecResult<()> {
        self.enter_scope();
        self.advance();

        let condition = is_truthy(self.eval_expression(mode, Terminator::LBrace)?);
        self.exec_block(mode.narrow(condition))?;

        if self.check(TokenKind::Else) {
            self.enter_scope();
            self.advance();
            self.consume(TokenKind::LBrace, "expected '{' after 'else'")?;
            self.exec_block(mode.narrow(!condition))?;
        }

        Ok(())
    }

    /// Runs a loop by jumping back to its condition after every live pass.
    ///
    /// A loop in `Validate` mode is walked exactly once.
    fn exec_while(&mut self, mode: Mode) -> ExecResult<()> {
        self.enter_scope();
        self.advance();

        let start = self.checkpoint();
        let mut iterations: usize = 0;

        loop {
            let condition = is_truthy(self.eval_expression(mode, Terminator::LBrace)?);
            self.exec_block(mode.narrow(condition))?;

            if !mode.is_live() || !condition {
                break;
            }

            iterations += 1;
            trace!(iterations, "looping");
            self.jump(start);
        }

        Ok(())
    }

    /// Runs the body of a task and comes back to the statement after `exec`.
    ///
    /// The body runs at global scope whatever the depth of the call site.
    fn exec_task_call(&mut self, mode: Mode) -> ExecResult<()> {
        let exec_line = self.current_line();
        self.advance();

        let name = match self.current() {
            Some(token) if token.kind == TokenKind::Task => token,
            Some(token) => {
                return Err(SyntaxError::Expected { message: "expected task name after 'exec'",
                                                   line:    token.line, }.into());
            },
            None => {
                return Err(SyntaxError::Expected { message: "expected task name after 'exec'",
                                                   line:    exec_line, }.into());
            },
        };

        let entry = self.tasks.entry(name.text);
        if mode.is_live() && entry.is_none() {
            return Err(RuntimeError::UnknownTask { name: name.text.to_string(),
                                                   line: name.line, }.into());
        }

        self.advance();
        self.consume(TokenKind::Semicolon, "expected ';' after task name")?;

        if let (Mode::Execute, Some(entry)) = (mode, entry) {
            let resume = self.checkpoint();
            debug!(task = name.text, line = name.line, "calling task");

            self.jump(Checkpoint { cursor: entry,
                                   scope:  GLOBAL_SCOPE, });
            self.exec_block(Mode::Execute)?;
            self.jump(resume);
        }

        Ok(())
    }

    /// Assigns to a variable, declaring it first if needed.
    ///
    /// Whether the name is new is settled before the right-hand side runs, and
    /// new names are only accepted at global scope.
    fn exec_assignment(&mut self, name: Token<'src>, mode: Mode) -> ExecResult<()> {
        let is_new = !self.variables.contains(name.text);
        self.advance();

        if mode.is_live() && is_new && self.scope() > GLOBAL_SCOPE {
            return Err(RuntimeError::LocalVariableDeclaration { name: name.text.to_string(),
                                                                line: name.line, }.into());
        }

        self.consume(TokenKind::Assign, "expected '=' after variable name")?;
        let value = self.eval_expression(mode, Terminator::Semicolon)?;

        if mode.is_live() {
            self.variables.assign(name.text, value);
        }

        Ok(())
    }

    fn exec_print(&mut self, mode: Mode) -> ExecResult<()> {
        self.advance();

        let value = self.eval_expression(mode, Terminator::Semicolon)?;

        if mode.is_live() {
            writeln!(self.out, "{value:.6}").map_err(RuntimeError::Output)?;
        }

        Ok(())
    }
}
