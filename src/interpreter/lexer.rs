use std::fmt;

use logos::Logos;
use tracing::debug;

use crate::error::LexError;

/// The kind of a lexical token.
///
/// Identifiers are classified here rather than by the executor: keywords get
/// their own variants, uppercase-led names are task names and every other name
/// is a variable.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// Integer literal such as `42`, carried as a float.
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `print`
    #[token("print")]
    Print,
    /// `exec`
    #[token("exec")]
    Exec,
    /// Task names start with an uppercase letter, such as `Countdown`.
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    Task,
    /// Variable names, such as `i` or `total_sum`.
    #[regex(r"[a-z_][A-Za-z0-9_]*")]
    Variable,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// Line comments, such as `// note`.
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// A token together with the slice of source it was read from.
///
/// The text borrows from the source buffer, so the buffer has to outlive the
/// token sequence and everything keyed on token text (the variable and task
/// tables).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    /// What the token is.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: &'src str,
    /// The source line the token starts on.
    pub line: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.text, self.kind)
    }
}

/// Splits a source buffer into tokens.
///
/// Scanning does not stop at an unrecognized character: the character is
/// reported and skipped, so a single pass collects every lexical error in the
/// buffer.
///
/// # Errors
/// Returns every [`LexError`] found, in source order, if at least one
/// character could not be tokenized.
///
/// # Example
/// ```
/// use jis::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("x = 10; // ten").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Variable, TokenKind::Assign, TokenKind::Number(10.0), TokenKind::Semicolon]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(kind) = lexer.next() {
        let text = lexer.slice();
        let line = lexer.extras.line;

        match kind {
            Ok(kind) => tokens.push(Token { kind, text, line }),
            Err(()) => {
                let character = text.chars().next().unwrap_or_default();
                debug!(line, %character, "skipping unknown character");
                errors.push(LexError::UnknownCharacter { character, line });
            },
        }
    }

    if errors.is_empty() { Ok(tokens) } else { Err(errors) }
}

/// Parses a digit run into its float value.
fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}
