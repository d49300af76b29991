/// Execution context and cursor handling.
///
/// Holds the token sequence, the cursor and scope depth, the variable and
/// task tables and the output sink, together with the checkpoint/jump
/// primitives that loops and task calls are built on.
pub mod core;
/// Expression evaluation.
///
/// Reduces the tokens up to a terminator to a single number with an operator
/// stack and an operand stack, without building an expression tree.
pub mod expression;
/// The lexer module tokenizes source code.
///
/// Turns the raw source text into tokens that borrow their text from the
/// source and remember their line. Keywords, task names and variable names
/// are told apart here.
pub mod lexer;
/// The operator table.
///
/// Maps operator tokens to their family and base precedence, and applies
/// binary operators to operands.
pub mod operator;
/// Statement execution.
///
/// Walks statements one at a time, executing those on a live path and only
/// checking the syntax of the rest.
pub mod statement;
/// Variable and task tables.
///
/// Flat, insertion-ordered records owned by the execution context.
pub mod table;
