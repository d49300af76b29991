use std::io::Write;

use tracing::warn;

use crate::{
    error::{RuntimeError, Side, SyntaxError},
    interpreter::{
        core::{Context, ExecResult, Mode},
        lexer::TokenKind,
        operator::{self, MAX_PRECEDENCE, OpEntry, OpFamily},
    },
};

/// The token that ends an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// Plain expressions, as in `print` and assignments, end at `;`.
    Semicolon,
    /// Conditions of `if` and `while` end at the `{` opening their body.
    LBrace,
}

impl Terminator {
    const fn kind(self) -> TokenKind {
        match self {
            Self::Semicolon => TokenKind::Semicolon,
            Self::LBrace => TokenKind::LBrace,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::Semicolon => ';',
            Self::LBrace => '{',
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Semicolon => "expected ';'",
            Self::LBrace => "expected '{'",
        }
    }
}

/// An operator waiting on the stack, with its precedence already adjusted for
/// the parentheses around it.
#[derive(Debug, Clone, Copy)]
struct PendingOp {
    entry:      OpEntry,
    precedence: i32,
    line:       usize,
}

impl<W: Write> Context<'_, W> {
    /// Evaluates the expression under the cursor and consumes its terminator.
    ///
    /// Uses an operator stack and an operand stack. Parentheses are not
    /// recursed into: each `(` raises the precedence of the operators that
    /// follow by [`MAX_PRECEDENCE`] and each `)` lowers it again, so nesting
    /// becomes plain precedence arithmetic. An operator pops and applies every
    /// stacked operator of greater or equal precedence before it is pushed,
    /// which makes operators of one level left-associative.
    ///
    /// In `Validate` mode variables read as `0` without being looked up, so
    /// dead code may mention variables that do not exist yet.
    ///
    /// # Errors
    /// - `SyntaxError::Expected` if the stream ends before the terminator.
    /// - `SyntaxError::UnexpectedInExpression` for tokens that have no place
    ///   in an expression.
    /// - `SyntaxError::EmptyExpression` / `SyntaxError::MissingOperator` if
    ///   the expression does not reduce to exactly one value.
    /// - `RuntimeError::MissingOperand` if an operator lacks an operand.
    /// - `RuntimeError::UnknownVariable` for undeclared variables on a live
    ///   path.
    pub(crate) fn eval_expression(&mut self,
                                  mode: Mode,
                                  terminator: Terminator)
                                  -> ExecResult<f64> {
        let mut operators: Vec<PendingOp> = Vec::new();
        let mut operands: Vec<f64> = Vec::new();
        let mut prec_lvl: i32 = 0;

        let end_line = loop {
            let Some(token) = self.current() else {
                return Err(SyntaxError::Expected { message: terminator.expected(),
                                                   line:    self.current_line(), }.into());
            };

            if token.kind == terminator.kind() {
                self.advance();
                break token.line;
            }

            match token.kind {
                TokenKind::Number(value) => operands.push(value),
                TokenKind::Variable => {
                    let value = if mode.is_live() {
                        self.lookup_variable(token.text, token.line)?
                    } else {
                        0.0
                    };
                    operands.push(value);
                },
                TokenKind::LParen => prec_lvl += 1,
                TokenKind::RParen => prec_lvl -= 1,
                kind => {
                    let Some(entry) = operator::lookup(kind) else {
                        return Err(SyntaxError::UnexpectedInExpression { terminator: terminator.symbol(),
                                                                         found:      token.text.to_string(),
                                                                         line:       token.line, }.into());
                    };

                    let incoming = PendingOp { entry,
                                               precedence: entry.precedence + MAX_PRECEDENCE * prec_lvl,
                                               line: token.line };

                    while let Some(top) = operators.last().copied()
                          && top.precedence >= incoming.precedence
                    {
                        operators.pop();
                        apply(top, &mut operands)?;
                    }

                    operators.push(incoming);
                },
            }

            self.advance();
        };

        if prec_lvl != 0 {
            warn!(line = end_line, depth = prec_lvl, "unbalanced parentheses in expression");
        }

        while let Some(op) = operators.pop() {
            apply(op, &mut operands)?;
        }

        match operands.as_slice() {
            [] => Err(SyntaxError::EmptyExpression { terminator: terminator.symbol(),
                                                     line:       end_line, }.into()),
            [value] => Ok(*value),
            _ => Err(SyntaxError::MissingOperator { line: end_line }.into()),
        }
    }

    /// Reads a declared variable.
    pub(crate) fn lookup_variable(&self, name: &str, line: usize) -> ExecResult<f64> {
        self.variables.get(name).ok_or_else(|| {
                                    RuntimeError::UnknownVariable { name: name.to_string(),
                                                                    line }.into()
                                })
    }
}

/// Pops the two topmost operands, applies `op` and pushes the result.
fn apply(op: PendingOp, operands: &mut Vec<f64>) -> ExecResult<()> {
    let missing = |side| RuntimeError::MissingOperand { side,
                                                        family: op.entry.family,
                                                        line: op.line };

    let right = operands.pop().ok_or_else(|| missing(Side::Right))?;
    let left = operands.pop().ok_or_else(|| missing(Side::Left))?;

    debug_assert_ne!(op.entry.family, OpFamily::Grouping);
    operands.push(op.entry.apply(left, right));
    Ok(())
}
