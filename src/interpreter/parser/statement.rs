use std::iter::Peekable;

use crate::{
    ast::{FunctionDecl, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, expect_identifier, offending},
        },
    },
};

/// Parses a single declaration.
///
/// A declaration is a function declaration, a variable declaration, or any
/// other statement:
///
/// Grammar: `declaration := funcDecl | letDecl | statement`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a declaration.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek() {
        Some(token) if token.kind == TokenKind::Function => {
            tokens.next();
            parse_function_declaration(tokens)
        },
        Some(token) if token.kind == TokenKind::Let => {
            tokens.next();
            parse_let_declaration(tokens)
        },
        _ => parse_statement(tokens),
    }
}

/// Parses a function declaration whose `函数` keyword is already consumed.
///
/// Grammar: `funcDecl := "函数" IDENT "(" paramList? ")" "{" declaration* "}"`
///
/// At most 255 parameters are accepted. The body is the content of the
/// brace-delimited block; it executes in a fresh child of the environment
/// captured when the declaration runs.
///
/// # Errors
/// Returns a [`ParseError`] when the name, parameter list or body is
/// malformed.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let (name, pos) = expect_identifier(tokens, "期望函数名")?;
    expect(tokens, &TokenKind::LeftParen, "期望 '(' 在函数名之后")?;

    let mut params = Vec::new();
    if let Some(token) = tokens.peek()
       && token.kind != TokenKind::RightParen
    {
        loop {
            if params.len() >= 255
               && let Some(token) = tokens.peek()
            {
                let (lexeme, pos) = offending(token);
                return Err(ParseError::TooManyParameters { lexeme, pos });
            }

            let (param, _) = expect_identifier(tokens, "期望参数名")?;
            params.push(param);

            match tokens.peek() {
                Some(token) if token.kind == TokenKind::Comma => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }

    expect(tokens, &TokenKind::RightParen, "期望 ')' 在参数之后")?;
    expect(tokens, &TokenKind::LeftBrace, "期望 '{' 在函数体之前")?;
    let body = parse_block_statements(tokens)?;

    Ok(Stmt::Function(FunctionDecl { name,
                                     pos,
                                     params,
                                     body }))
}

/// Parses a variable declaration whose `就是` keyword is already consumed.
///
/// Grammar: `letDecl := "就是" IDENT ("=" expression)?`
///
/// Without an initializer the variable is bound to `空`.
fn parse_let_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let (name, pos) = expect_identifier(tokens, "期望变量名")?;

    let initializer = if let Some(token) = tokens.peek()
                         && token.kind == TokenKind::Equal
    {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(Stmt::Let { name,
                   pos,
                   initializer })
}

/// Parses a single statement.
///
/// Grammar: `statement := ifStmt | forStmt | returnStmt | block | exprStmt`
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek() {
        Some(token) if token.kind == TokenKind::If => {
            tokens.next();
            parse_if(tokens)
        },
        Some(token) if token.kind == TokenKind::For => {
            tokens.next();
            parse_for(tokens)
        },
        Some(token) if token.kind == TokenKind::Return => {
            let pos = tokens.next().unwrap().pos;
            parse_return(tokens, pos)
        },
        Some(token) if token.kind == TokenKind::LeftBrace => {
            tokens.next();
            let statements = parse_block_statements(tokens)?;
            Ok(Stmt::Block { statements })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            Ok(Stmt::Expression { expr })
        },
    }
}

/// Parses a conditional whose `如果` keyword is already consumed.
///
/// Grammar: `ifStmt := "如果" "(" expression ")" statement ("否则" statement)?`
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, &TokenKind::LeftParen, "期望 '(' 在 '如果' 之后")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RightParen, "期望 ')' 在条件之后")?;

    let then_branch = Box::new(parse_statement(tokens)?);
    let else_branch = if let Some(token) = tokens.peek()
                         && token.kind == TokenKind::Else
    {
        tokens.next();
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch })
}

/// Parses a loop whose `对于` keyword is already consumed.
///
/// Grammar: `forStmt := "对于" IDENT "在" expression statement`
///
/// The iterable must evaluate to an array at runtime; that check is the
/// evaluator's, attributed to the loop variable token recorded here.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let (var, pos) = expect_identifier(tokens, "期望循环变量名")?;
    expect(tokens, &TokenKind::In, "期望 '在' 在循环变量之后")?;
    let iterable = parse_expression(tokens)?;
    let body = Box::new(parse_statement(tokens)?);

    Ok(Stmt::For { var,
                   pos,
                   iterable,
                   body })
}

/// Parses a return statement whose `返回` keyword is already consumed.
///
/// Grammar: `returnStmt := "返回" expression?`
///
/// The expression is omitted exactly when the next token is `}` — a
/// function body may close immediately after a bare `返回`; any other
/// follow token forces expression parsing.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let value = match tokens.peek() {
        Some(token) if token.kind == TokenKind::RightBrace => None,
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Stmt::Return { pos, value })
}

/// Parses the declarations of a block whose `{` is already consumed,
/// including the closing `}`.
///
/// Grammar: `block := "{" declaration* "}"`
pub(in crate::interpreter::parser) fn parse_block_statements<'a, I>(tokens: &mut Peekable<I>)
                                                                    -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a Token>
{
    let mut statements = Vec::new();

    while let Some(token) = tokens.peek() {
        if matches!(token.kind, TokenKind::RightBrace | TokenKind::Eof) {
            break;
        }
        statements.push(parse_declaration(tokens)?);
    }

    expect(tokens, &TokenKind::RightBrace, "期望 '}' 在代码块之后")?;

    Ok(statements)
}
