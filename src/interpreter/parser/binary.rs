use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses an assignment expression.
///
/// Assignment is the lowest-precedence expression form and nests to the
/// right: `a = b = c` parses as `a = (b = c)`. After parsing the left-hand
/// side, a following `=` demands that the parsed side be a plain variable
/// reference; any other expression kind is an invalid assignment target,
/// reported at the `=` token.
///
/// Grammar: `assignment := or ("=" assignment)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed expression, an `Expr::Assign` when an `=` was consumed.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_or(tokens)?;

    if let Some(token) = tokens.peek()
       && token.kind == TokenKind::Equal
    {
        let equals_lexeme = token.lexeme.clone();
        let equals_pos = token.pos;
        tokens.next();

        let value = parse_assignment(tokens)?;

        return match expr {
            Expr::Variable { name, pos } => {
                Ok(Expr::Assign { name,
                                  pos,
                                  value: Box::new(value) })
            },
            _ => {
                Err(ParseError::InvalidAssignmentTarget { lexeme: Some(equals_lexeme),
                                                          pos:    equals_pos, })
            },
        };
    }

    Ok(expr)
}

/// Parses logical-or expressions.
///
/// `或` folds into an ordinary left-associative binary node; whether its
/// operands short-circuit is the evaluator's concern.
///
/// Grammar: `or := and ("或" and)*`
pub fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_and(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::Or)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_and(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical-and expressions.
///
/// Grammar: `and := equality ("并" equality)*`
pub fn parse_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_equality(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::And)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_equality(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses equality expressions.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_comparison(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_comparison(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses relational comparison expressions.
///
/// Grammar: `comparison := term (("<" | "<=" | ">" | ">=") term)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_term(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::LessEqual
                       | BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_term(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `term := factor (("+" | "-") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_factor(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_factor(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Grammar: `factor := unary (("*" | "/" | "%") unary)*`
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op,
                       BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let pos = token.pos;
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator (arithmetic, comparison, equality or logical), otherwise
/// `None`.
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
