//! # vscript
//!
//! vscript is a tree-walking interpreter for a small scripting language
//! with Chinese keywords. It lexes source text into tokens, parses them
//! into an abstract syntax tree, and evaluates that tree against a
//! lexically-scoped environment chain with first-class closures, a handful
//! of builtin functions, and number/string/boolean/null/array values.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    error::{LexError, ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, lexer::scan, parser::core::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to the nodes runtime errors are attributed
///   to.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code.
/// It standardizes error reporting and carries source positions for every
/// failure, rendered in the language's Chinese diagnostic framings.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line/column positions and detailed messages.
/// - Integrates with the standard error traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the environment chain to provide a complete runtime
/// for source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides the entry points used by [`Interpreter`].
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Any failure a [`Interpreter::run`] call can surface.
///
/// The three kinds stay distinguishable so callers can tell scan-time,
/// parse-time and run-time failures apart; each renders its own framing.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// The source text could not be tokenized.
    Lex(LexError),
    /// The token stream could not be parsed.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl From<LexError> for RunError {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for RunError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for RunError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => error.fmt(f),
            Self::Parse(error) => error.fmt(f),
            Self::Runtime(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for RunError {}

/// A persistent interpreter instance.
///
/// Each [`run`](Self::run) call pushes one source unit through the full
/// pipeline — scan, parse, interpret — against a retained evaluation
/// context, so definitions accumulate across calls exactly as a REPL
/// session expects. Tokens and AST nodes are discarded after the call;
/// the global environment lives as long as the instance.
pub struct Interpreter {
    context: Context,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter whose `输出` builtin writes to standard
    /// output.
    #[must_use]
    pub fn new() -> Self {
        Self { context: Context::new() }
    }

    /// Creates an interpreter writing program output to the given sink.
    ///
    /// Used by embedders and tests that capture what `输出` produces.
    #[must_use]
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self { context: Context::with_output(output) }
    }

    /// Runs one source unit.
    ///
    /// Data flows strictly one way: the unit is tokenized, parsed into
    /// statements, and interpreted in order. The first error of any kind
    /// aborts the unit and is returned; state already mutated by earlier
    /// statements of the unit remains, which is what a REPL session wants.
    ///
    /// # Errors
    /// Returns a [`RunError`] wrapping the lexical, parse or runtime error
    /// that stopped the unit.
    ///
    /// # Example
    /// ```
    /// use vscript::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    ///
    /// // Definitions persist across calls.
    /// interpreter.run("就是 计数 = 41").unwrap();
    /// interpreter.run("计数 = 计数 + 1").unwrap();
    ///
    /// // An undefined name is a runtime error.
    /// assert!(interpreter.run("输出(不存在)").is_err());
    /// ```
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let tokens = scan(source)?;
        let statements = parse(&mut tokens.iter().peekable())?;
        self.context.interpret(&statements)?;

        Ok(())
    }
}
