use logos::{FilterResult, Logos};

use crate::error::LexError;

/// Represents a lexical token kind in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keyword and identifier lexemes may contain any code point in the CJK
/// Unified Ideographs range (U+4E00–U+9FA5) in addition to ASCII letters,
/// digits and underscores.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42` or `3.14`. A trailing `.` that is
    /// not followed by a digit is not part of the literal.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens. The opening `"` hands over to a callback that
    /// consumes every character verbatim (including raw newlines) up to the
    /// closing `"`. No escape sequences are interpreted.
    #[token("\"", lex_string)]
    Str(String),
    /// Boolean literal tokens: `真` or `假`.
    #[token("真", parse_bool)]
    #[token("假", parse_bool)]
    Bool(bool),
    /// `空`
    #[token("空")]
    Null,
    /// `函数`
    #[token("函数")]
    Function,
    /// `如果`
    #[token("如果")]
    If,
    /// `否则`
    #[token("否则")]
    Else,
    /// `返回`
    #[token("返回")]
    Return,
    /// `对于`
    #[token("对于")]
    For,
    /// `在`
    #[token("在")]
    In,
    /// `就是`
    #[token("就是")]
    Let,
    /// `并`
    #[token("并")]
    And,
    /// `或`
    #[token("或")]
    Or,
    /// Logical not: both `非` and `!` produce this kind.
    #[token("非")]
    #[token("!")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `阶乘`.
    #[regex(r"[A-Za-z_\u{4e00}-\u{9fa5}][A-Za-z0-9_\u{4e00}-\u{9fa5}]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
    /// ```text
    /// /* Block comments. */
    /// ```
    /// Consumed by a callback so an unterminated comment is reported as a
    /// lexical error instead of a stray `/` and `*`.
    #[token("/*", lex_block_comment)]
    BlockComment,
    /// Spaces, tabs, carriage returns and newlines between lexemes.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    /// End of input. Never produced by the generated scanner; [`scan`]
    /// appends exactly one after the final lexeme.
    Eof,
}

/// Classifies a lexical failure while the generated scanner is running.
///
/// The `Default` kind covers any character no rule matches; the other kinds
/// are produced by the string and block-comment callbacks. [`scan`] attaches
/// the source position and converts these into [`LexError`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that cannot begin any lexeme.
    #[default]
    UnexpectedCharacter,
    /// A `"` whose closing counterpart is missing.
    UnterminatedString,
    /// A `/*` whose closing `*/` is missing.
    UnterminatedBlockComment,
}

/// A 1-based source position.
///
/// `line` counts newlines; `column` counts characters (not bytes) from the
/// start of the line, so a CJK ideograph advances the column by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number, starting at 1 at the first character of each line.
    pub column: usize,
}

impl Default for Pos {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// A lexical token together with its exact source slice and position.
///
/// The decoded literal value of number, string, boolean and identifier
/// tokens lives inside [`TokenKind`]; `lexeme` is always the verbatim source
/// text and `pos` points at its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind, carrying decoded literal payloads where applicable.
    pub kind:   TokenKind,
    /// The exact source slice this token was produced from.
    pub lexeme: String,
    /// Position of the first character of `lexeme`.
    pub pos:    Pos,
}

/// Tokenizes a complete source string.
///
/// Runs the generated scanner over `source` and pairs every lexeme with its
/// 1-based line/column position. Positions are computed by sweeping the raw
/// source once, so lexemes that span lines (strings, block comments) keep
/// later tokens accurate. The returned sequence always ends in exactly one
/// [`TokenKind::Eof`] token positioned after the final character.
///
/// # Errors
/// Returns a [`LexError`] for an unexpected character, an unterminated
/// string or an unterminated block comment, positioned where the defect
/// begins.
///
/// # Example
/// ```
/// use vscript::interpreter::lexer::{TokenKind, scan};
///
/// let tokens = scan("就是 年龄 = 30").unwrap();
///
/// assert_eq!(tokens[0].kind, TokenKind::Let);
/// assert_eq!(tokens[1].kind, TokenKind::Identifier("年龄".to_string()));
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    let mut line = 1;
    let mut column = 1;
    let mut consumed = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        advance_position(&source[consumed..span.start], &mut line, &mut column);
        let pos = Pos { line, column };

        match result {
            Ok(kind) => {
                tokens.push(Token { kind,
                                    lexeme: lexer.slice().to_string(),
                                    pos });
            },
            Err(kind) => {
                return Err(match kind {
                    LexErrorKind::UnexpectedCharacter => {
                        LexError::UnexpectedCharacter { lexeme: lexer.slice().to_string(),
                                                        pos }
                    },
                    LexErrorKind::UnterminatedString => LexError::UnterminatedString { pos },
                    LexErrorKind::UnterminatedBlockComment => {
                        LexError::UnterminatedBlockComment { pos }
                    },
                });
            },
        }

        advance_position(&source[span.start..span.end], &mut line, &mut column);
        consumed = span.end;
    }

    advance_position(&source[consumed..], &mut line, &mut column);
    tokens.push(Token { kind:   TokenKind::Eof,
                        lexeme: String::new(),
                        pos:    Pos { line, column }, });

    Ok(tokens)
}

/// Advances a line/column pair over `text`, character by character.
fn advance_position(text: &str, line: &mut usize, column: &mut usize) {
    for ch in text.chars() {
        if ch == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`真` or `假`).
fn parse_bool(lex: &logos::Lexer<TokenKind>) -> Option<bool> {
    match lex.slice() {
        "真" => Some(true),
        "假" => Some(false),
        _ => None,
    }
}

/// Consumes a string literal after its opening `"`.
///
/// Every character up to the next `"` is taken verbatim; there are no escape
/// sequences. The literal value is the inner substring. A missing closing
/// quote consumes the rest of the input and reports an unterminated string.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    match lex.remainder().find('"') {
        Some(offset) => {
            let content = lex.remainder()[..offset].to_string();
            lex.bump(offset + 1);
            Ok(content)
        },
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedString)
        },
    }
}

/// Consumes a block comment after its opening `/*`, including the closing
/// `*/`. A missing terminator consumes the rest of the input and reports an
/// unterminated block comment.
fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(offset) => {
            lex.bump(offset + 2);
            FilterResult::Skip
        },
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedBlockComment)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn operators_and_delimiters() {
        use TokenKind::*;

        let actual = kinds("( ) { } [ ] , + - * / % = == != < <= > >= ! 非");
        let expected = vec![LeftParen,
                            RightParen,
                            LeftBrace,
                            RightBrace,
                            LeftBracket,
                            RightBracket,
                            Comma,
                            Plus,
                            Minus,
                            Star,
                            Slash,
                            Percent,
                            Equal,
                            EqualEqual,
                            BangEqual,
                            Less,
                            LessEqual,
                            Greater,
                            GreaterEqual,
                            Not,
                            Not,
                            Eof];

        assert_eq!(actual, expected);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        use TokenKind::*;

        let actual = kinds("函数 如果 否则 返回 对于 在 就是 真 假 空 并 或 非");
        let expected = vec![Function,
                            If,
                            Else,
                            Return,
                            For,
                            In,
                            Let,
                            Bool(true),
                            Bool(false),
                            Null,
                            And,
                            Or,
                            Not,
                            Eof];

        assert_eq!(actual, expected);
    }

    #[test]
    fn keyword_prefix_extends_into_identifier() {
        // Maximal munch: a longer alphanumeric run beats the keyword.
        let actual = kinds("如果有");
        assert_eq!(actual,
                   vec![TokenKind::Identifier("如果有".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn number_literals() {
        assert_eq!(kinds("42 3.14"),
                   vec![TokenKind::Number(42.0), TokenKind::Number(3.14), TokenKind::Eof]);
    }

    #[test]
    fn trailing_dot_is_not_consumed() {
        let err = scan("123.").unwrap_err();
        assert!(err.to_string().contains("意外的字符"));
    }

    #[test]
    fn string_literals_keep_raw_newlines() {
        let tokens = scan("\"你好\n世界\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str("你好\n世界".to_string()));

        // The end-of-input token lands on the second line.
        assert_eq!(tokens[1].pos.line, 2);
    }

    #[test]
    fn comments_are_skipped() {
        let actual = kinds("1 // 注释\n/* 多行\n注释 */ 2");
        assert_eq!(actual,
                   vec![TokenKind::Number(1.0), TokenKind::Number(2.0), TokenKind::Eof]);
    }

    #[test]
    fn positions_count_characters() {
        let tokens = scan("就是 甲 = 1\n甲 = 2").unwrap();

        // 就是 spans columns 1-2, the identifier starts at column 4.
        assert_eq!(tokens[0].pos, Pos { line: 1, column: 1 });
        assert_eq!(tokens[1].pos, Pos { line: 1, column: 4 });
        assert_eq!(tokens[2].pos, Pos { line: 1, column: 6 });

        // Second line restarts the column counter.
        assert_eq!(tokens[4].pos, Pos { line: 2, column: 1 });
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = scan("就是 x = \"abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.to_string(), "第 1 行，第 8 列：未终止的字符串");
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let err = scan("1 /* 注释").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlockComment { .. }));
    }

    #[test]
    fn exactly_one_eof_token() {
        let tokens = scan("1 + 2").unwrap();
        let eof_count = tokens.iter()
                              .filter(|t| t.kind == TokenKind::Eof)
                              .count();

        assert_eq!(eof_count, 1);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}
