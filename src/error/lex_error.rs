use crate::interpreter::lexer::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
///
/// Positions point at the first character of the offending input: the
/// unexpected character itself, the opening `"` of an unterminated string,
/// or the `/*` of an unterminated block comment.
pub enum LexError {
    /// A character that cannot begin any lexeme.
    UnexpectedCharacter {
        /// The offending source slice.
        lexeme: String,
        /// Where the character was found.
        pos:    Pos,
    },
    /// A string literal whose closing `"` is missing.
    UnterminatedString {
        /// Where the string begins.
        pos: Pos,
    },
    /// A block comment whose closing `*/` is missing.
    UnterminatedBlockComment {
        /// Where the comment begins.
        pos: Pos,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { lexeme, pos } => {
                write!(f,
                       "第 {} 行，第 {} 列：意外的字符 '{lexeme}'",
                       pos.line, pos.column)
            },
            Self::UnterminatedString { pos } => {
                write!(f, "第 {} 行，第 {} 列：未终止的字符串", pos.line, pos.column)
            },
            Self::UnterminatedBlockComment { pos } => {
                write!(f, "第 {} 行，第 {} 列：未终止的块注释", pos.line, pos.column)
            },
        }
    }
}

impl std::error::Error for LexError {}
