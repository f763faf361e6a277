/// Binary expression parsing.
///
/// Implements the precedence ladder for assignment, logical, equality,
/// comparison, additive and multiplicative operators. All binary operators
/// are left-associative except assignment, which nests to the right.
pub mod binary;
/// Parser entry points.
///
/// Declares the parse result alias, the program-level entry point with its
/// panic-mode synchronizer, and the expression entry point that tops the
/// precedence ladder.
pub mod core;
/// Statement and declaration parsing.
///
/// Handles function declarations, variable declarations, conditionals,
/// loops, return statements, blocks and expression statements.
pub mod statement;
/// Unary, call and primary expression parsing.
///
/// Implements prefix operators, postfix call chains with their argument
/// lists, and the primary forms: literals, identifiers, array literals and
/// parenthesized groupings.
pub mod unary;
/// Shared parsing helpers.
///
/// Small utilities used across the parser: required-token consumption,
/// identifier extraction, comma-separated lists and offending-token
/// extraction for error reports.
pub mod utils;
