use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, offending, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Prefix operators nest to the right: `非非x` parses as `非(非x)`. Both
/// `非` and `!` produce logical not; `-` produces numeric negation.
///
/// Grammar: `unary := ("非" | "!" | "-") unary | call`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    if let Some(token) = tokens.peek() {
        let op = match token.kind {
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Minus => Some(UnaryOperator::Negate),
            _ => None,
        };

        if let Some(op) = op {
            let pos = token.pos;
            tokens.next();
            let operand = parse_unary(tokens)?;
            return Ok(Expr::Unary { op,
                                    operand: Box::new(operand),
                                    pos });
        }
    }

    parse_call(tokens)
}

/// Parses a call chain.
///
/// A primary expression may be followed by any number of argument lists;
/// each `(` begins another call whose callee is everything parsed so far,
/// so `f(1)(2)` calls the result of `f(1)`.
///
/// Grammar: `call := primary ("(" argList? ")")*`
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens)?;

    while let Some(token) = tokens.peek() {
        if token.kind != TokenKind::LeftParen {
            break;
        }
        tokens.next();
        expr = finish_call(tokens, expr)?;
    }

    Ok(expr)
}

/// Parses the argument list of a call whose `(` is already consumed.
///
/// At most 255 arguments are accepted; the call node is attributed to the
/// closing parenthesis.
fn finish_call<'a, I>(tokens: &mut Peekable<I>, callee: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut arguments = Vec::new();

    if let Some(token) = tokens.peek()
       && token.kind != TokenKind::RightParen
    {
        loop {
            if arguments.len() >= 255
               && let Some(token) = tokens.peek()
            {
                let (lexeme, pos) = offending(token);
                return Err(ParseError::TooManyArguments { lexeme, pos });
            }

            arguments.push(parse_expression(tokens)?);

            match tokens.peek() {
                Some(token) if token.kind == TokenKind::Comma => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }

    let paren = expect(tokens, &TokenKind::RightParen, "期望 ')' 在参数之后")?;

    Ok(Expr::Call { callee:    Box::new(callee),
                    arguments,
                    pos:       paren.pos, })
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
/// primary := "假" | "真" | "空" | NUMBER | STRING
///          | "[" (expression ("," expression)*)? "]"
///          | IDENT
///          | "(" expression ")"
/// ```
///
/// # Errors
/// Returns [`ParseError::ExpectedExpression`] when the current token cannot
/// begin any primary form.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let Some(token) = tokens.peek() else {
        return Err(ParseError::ExpectedExpression { lexeme: None,
                                                    pos:    Pos::default(), });
    };
    let token = (*token).clone();

    match token.kind {
        TokenKind::Number(value) => {
            tokens.next();
            Ok(Expr::Literal { value: value.into() })
        },
        TokenKind::Str(value) => {
            tokens.next();
            Ok(Expr::Literal { value: value.into() })
        },
        TokenKind::Bool(value) => {
            tokens.next();
            Ok(Expr::Literal { value: value.into() })
        },
        TokenKind::Null => {
            tokens.next();
            Ok(Expr::Literal { value: LiteralValue::Null })
        },
        TokenKind::Identifier(name) => {
            tokens.next();
            Ok(Expr::Variable { name,
                                pos: token.pos })
        },
        TokenKind::LeftBracket => {
            tokens.next();
            parse_array_literal(tokens)
        },
        TokenKind::LeftParen => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RightParen, "期望 ')' 在表达式之后")?;
            Ok(Expr::Grouping { inner: Box::new(inner) })
        },
        _ => {
            let (lexeme, pos) = offending(&token);
            Err(ParseError::ExpectedExpression { lexeme, pos })
        },
    }
}

/// Parses an array literal whose `[` is already consumed.
///
/// Grammar: `array := "[" (expression ("," expression)*)? "]"`
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let elements = parse_comma_separated(tokens,
                                         parse_expression,
                                         &TokenKind::RightBracket,
                                         "期望 ']' 在数组元素之后")?;

    Ok(Expr::ArrayLiteral { elements })
}
