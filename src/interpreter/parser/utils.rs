use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Extracts the reportable identity of an offending token.
///
/// Returns the token's lexeme and position; the lexeme is `None` for the
/// end-of-input token so error reports can render `文件末尾` instead of an
/// empty quote.
pub(in crate::interpreter::parser) fn offending(token: &Token) -> (Option<String>, Pos) {
    let lexeme = match token.kind {
        TokenKind::Eof => None,
        _ => Some(token.lexeme.clone()),
    };

    (lexeme, token.pos)
}

/// Consumes the next token, which must be of the given kind.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The required token kind (a fieldless kind such as a
///   delimiter or keyword).
/// - `message`: Expectation description used when the requirement fails.
///
/// # Returns
/// The consumed token.
///
/// # Errors
/// Returns [`ParseError::Expected`] attributed to the token that was found
/// instead.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &TokenKind,
                                                    message: &'static str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek() {
        Some(token) if token.kind == *expected => Ok(tokens.next().unwrap()),
        Some(token) => {
            let (lexeme, pos) = offending(token);
            Err(ParseError::Expected { message, lexeme, pos })
        },
        None => {
            Err(ParseError::Expected { message,
                                       lexeme: None,
                                       pos: Pos::default() })
        },
    }
}

/// Consumes the next token, which must be an identifier, and returns its
/// name together with its position.
///
/// # Errors
/// Returns [`ParseError::Expected`] attributed to the token that was found
/// instead.
pub(in crate::interpreter::parser) fn expect_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                               message: &'static str)
                                                               -> ParseResult<(String, Pos)>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek() {
        Some(token) => {
            if let TokenKind::Identifier(name) = &token.kind {
                let name = name.clone();
                let pos = token.pos;
                tokens.next();
                Ok((name, pos))
            } else {
                let (lexeme, pos) = offending(token);
                Err(ParseError::Expected { message, lexeme, pos })
            }
        },
        None => {
            Err(ParseError::Expected { message,
                                       lexeme: None,
                                       pos: Pos::default() })
        },
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Repeatedly calls `parse_item` to parse one element, expecting either a
/// comma to continue the list or the closing token to end it. An
/// immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or the closer.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list.
/// - `message`: Expectation description when neither a comma nor the
///   closing token follows an item.
///
/// # Errors
/// Returns a [`ParseError`] when an item fails to parse or the list is not
/// properly continued or closed.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind,
    message: &'static str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();

    if let Some(token) = tokens.peek()
       && token.kind == *closing
    {
        tokens.next();
        return Ok(items);
    }

    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::Comma => {
                tokens.next();
            },
            Some(token) if token.kind == *closing => {
                tokens.next();
                break;
            },
            Some(token) => {
                let (lexeme, pos) = offending(token);
                return Err(ParseError::Expected { message, lexeme, pos });
            },
            None => {
                return Err(ParseError::Expected { message,
                                                  lexeme: None,
                                                  pos: Pos::default() });
            },
        }
    }

    Ok(items)
}
