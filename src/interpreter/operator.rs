use std::fmt;

use crate::interpreter::lexer::TokenKind;

/// Precedence of the tightest-binding operators, and the amount every
/// enclosing pair of parentheses adds to an operator's precedence.
pub const MAX_PRECEDENCE: i32 = 6;

/// Groups operators by how they are applied.
///
/// Operators of one family can still differ in precedence, e.g. `+` and `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFamily {
    /// `(` and `)`; never applied, they only shift precedence.
    Grouping,
    /// `+ - * /`
    Arithmetic,
    /// `< > <= >= == !=`
    Comparison,
    /// `&& ||`
    Logical,
}

impl fmt::Display for OpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grouping => write!(f, "grouping"),
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Comparison => write!(f, "comparison"),
            Self::Logical => write!(f, "logical"),
        }
    }
}

/// One row of the operator table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpEntry {
    /// How the operator is applied.
    pub family:     OpFamily,
    /// Precedence outside of any parentheses.
    pub precedence: i32,
    /// The token that spells the operator.
    pub kind:       TokenKind,
}

const fn entry(family: OpFamily, precedence: i32, kind: TokenKind) -> OpEntry {
    OpEntry { family,
              precedence,
              kind }
}

static OPERATOR_TABLE: [OpEntry; 14] =
    [entry(OpFamily::Grouping, MAX_PRECEDENCE, TokenKind::LParen),
     entry(OpFamily::Grouping, MAX_PRECEDENCE, TokenKind::RParen),
     entry(OpFamily::Arithmetic, MAX_PRECEDENCE - 1, TokenKind::Star),
     entry(OpFamily::Arithmetic, MAX_PRECEDENCE - 1, TokenKind::Slash),
     entry(OpFamily::Arithmetic, MAX_PRECEDENCE - 2, TokenKind::Plus),
     entry(OpFamily::Arithmetic, MAX_PRECEDENCE - 2, TokenKind::Minus),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::Less),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::Greater),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::LessEqual),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::GreaterEqual),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::EqualEqual),
     entry(OpFamily::Comparison, MAX_PRECEDENCE - 3, TokenKind::BangEqual),
     entry(OpFamily::Logical, MAX_PRECEDENCE - 4, TokenKind::AndAnd),
     entry(OpFamily::Logical, MAX_PRECEDENCE - 5, TokenKind::OrOr)];

/// Looks up the operator spelled by a token kind.
///
/// # Example
/// ```
/// use jis::interpreter::{
///     lexer::TokenKind,
///     operator::{OpFamily, lookup},
/// };
///
/// let star = lookup(TokenKind::Star).unwrap();
/// let plus = lookup(TokenKind::Plus).unwrap();
///
/// assert_eq!(star.family, OpFamily::Arithmetic);
/// assert!(star.precedence > plus.precedence);
/// assert!(lookup(TokenKind::Semicolon).is_none());
/// ```
pub fn lookup(kind: TokenKind) -> Option<OpEntry> {
    OPERATOR_TABLE.iter().find(|op| op.kind == kind).copied()
}

/// A value of exactly zero is false; everything else, NaN included, is true.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0
}

const fn from_bool(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

impl OpEntry {
    /// Applies a binary operator to its operands.
    ///
    /// Comparison and logical operators always yield `1.0` or `0.0`. Division
    /// by zero follows IEEE-754 semantics. Grouping entries are never applied
    /// and yield `0.0`.
    #[allow(clippy::float_cmp)]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self.kind {
            TokenKind::Plus => left + right,
            TokenKind::Minus => left - right,
            TokenKind::Star => left * right,
            TokenKind::Slash => left / right,
            TokenKind::Less => from_bool(left < right),
            TokenKind::Greater => from_bool(left > right),
            TokenKind::LessEqual => from_bool(left <= right),
            TokenKind::GreaterEqual => from_bool(left >= right),
            TokenKind::EqualEqual => from_bool(left == right),
            TokenKind::BangEqual => from_bool(left != right),
            TokenKind::AndAnd => from_bool(is_truthy(left) && is_truthy(right)),
            TokenKind::OrOr => from_bool(is_truthy(left) || is_truthy(right)),
            _ => 0.0,
        }
    }
}
