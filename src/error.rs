/// Lexical errors.
///
/// Defines the error types raised while tokenizing source text: unexpected
/// characters, unterminated strings and unterminated block comments. Each
/// carries the position where the defect begins.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree
/// from tokens: missing delimiters, invalid assignment targets, oversized
/// parameter lists and places where no expression can start. Every error is
/// attributed to the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// operand type mismatches, division by zero, undefined variables, wrong
/// call arity and invalid loop iterables. Every error is attributed to a
/// source token position.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
