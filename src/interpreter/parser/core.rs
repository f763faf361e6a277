use std::iter::Peekable;

use crate::{
    ast::{Expr, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_assignment, statement::parse_declaration},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// Declarations are parsed one after another until the end-of-input token.
/// On the first error the parser runs its panic-mode synchronizer (so the
/// token stream is left at a statement boundary) and surfaces that error;
/// no statements are returned for a unit that failed to parse.
///
/// # Parameters
/// - `tokens`: Token iterator produced by the lexer, ending in `Eof`.
///
/// # Returns
/// The list of parsed statements.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use vscript::interpreter::{lexer::scan, parser::core::parse};
///
/// let tokens = scan("就是 x = 1 + 2").unwrap();
/// let program = parse(&mut tokens.iter().peekable()).unwrap();
///
/// assert_eq!(program.len(), 1);
/// ```
pub fn parse<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a Token>
{
    let mut statements = Vec::new();

    while let Some(token) = tokens.peek() {
        if token.kind == TokenKind::Eof {
            break;
        }
        match parse_declaration(tokens) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                synchronize(tokens);
                return Err(error);
            },
        }
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_assignment(tokens)
}

/// Discards tokens until a likely statement boundary.
///
/// Consumption stops when the next token begins a declaration (`函数`,
/// `就是`, `如果`, `对于`, `返回`), when a `}` has just been consumed, or at
/// the end of input. Used after a parse error so the stream is positioned
/// where parsing could plausibly resume.
pub(in crate::interpreter::parser) fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while let Some(token) = tokens.peek() {
        match token.kind {
            TokenKind::Eof
            | TokenKind::Function
            | TokenKind::Let
            | TokenKind::If
            | TokenKind::For
            | TokenKind::Return => return,
            _ => {
                if let Some(consumed) = tokens.next()
                   && consumed.kind == TokenKind::RightBrace
                {
                    return;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::scan;

    fn parse_source(source: &str) -> ParseResult<Vec<Stmt>> {
        let tokens = scan(source).unwrap();
        parse(&mut tokens.iter().peekable())
    }

    #[test]
    fn empty_source_parses_to_nothing() {
        assert_eq!(parse_source("").unwrap(), Vec::new());
    }

    #[test]
    fn first_error_aborts_the_unit() {
        // The second statement is fine, but nothing is returned.
        let err = parse_source("就是 = 1 就是 x = 2").unwrap_err();
        assert!(err.to_string().contains("期望变量名"));
    }

    #[test]
    fn invalid_assignment_target_points_at_equals() {
        let err = parse_source("1 + 2 = 3").unwrap_err();
        assert_eq!(err.to_string(), "第 1 行，第 7 列，在 '=' 处：无效的赋值目标");
    }

    #[test]
    fn missing_paren_reports_end_of_input() {
        let err = parse_source("输出(1").unwrap_err();
        assert!(err.to_string().contains("文件末尾"));
    }
}
