/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// manages the environment chain and invokes callables. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, closures and control flow.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens,
/// each corresponding to a meaningful language element such as a number,
/// identifier, operator, delimiter or keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and source
///   position.
/// - Handles numeric and string literals, identifiers and operators,
///   including CJK identifier characters.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of
/// expressions and statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and syntax, reporting errors with location info.
/// - Recovers to statement boundaries after an error before surfacing it.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value variants used during execution —
/// numbers, strings, booleans, `空`, arrays and callables — together with
/// the environment chain that scopes name bindings.
///
/// # Responsibilities
/// - Defines the `Value` enum and its truthiness, equality and rendering.
/// - Defines callable values and their captured closure environments.
/// - Implements the lexically-nested environment chain.
pub mod value;
