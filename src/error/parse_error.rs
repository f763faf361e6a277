use crate::interpreter::lexer::Pos;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while parsing a token stream.
///
/// Each variant records the offending token: its lexeme (`None` when the
/// parser ran into the end of input) and its position. The rendered form is
/// `第 L 行，第 C 列，在 WHERE 处：MSG`, where `WHERE` is the quoted lexeme
/// or `文件末尾`.
pub enum ParseError {
    /// A required token was missing; `message` names what was expected.
    Expected {
        /// Human-readable description of the expectation.
        message: &'static str,
        /// Lexeme of the token that was found instead, `None` at end of
        /// input.
        lexeme:  Option<String>,
        /// Position of the offending token.
        pos:     Pos,
    },
    /// No expression can begin at the current token.
    ExpectedExpression {
        /// Lexeme of the offending token, `None` at end of input.
        lexeme: Option<String>,
        /// Position of the offending token.
        pos:    Pos,
    },
    /// The left-hand side of `=` is not a plain variable reference.
    InvalidAssignmentTarget {
        /// Lexeme of the `=` token.
        lexeme: Option<String>,
        /// Position of the `=` token.
        pos:    Pos,
    },
    /// A function declaration carries more than 255 parameters.
    TooManyParameters {
        /// Lexeme of the parameter that overflowed the limit.
        lexeme: Option<String>,
        /// Position of that parameter.
        pos:    Pos,
    },
    /// A call expression carries more than 255 arguments.
    TooManyArguments {
        /// Lexeme of the argument token that overflowed the limit.
        lexeme: Option<String>,
        /// Position of that argument.
        pos:    Pos,
    },
}

impl ParseError {
    /// The offending token's lexeme, or `None` for the end of input.
    #[must_use]
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::Expected { lexeme, .. }
            | Self::ExpectedExpression { lexeme, .. }
            | Self::InvalidAssignmentTarget { lexeme, .. }
            | Self::TooManyParameters { lexeme, .. }
            | Self::TooManyArguments { lexeme, .. } => lexeme.as_deref(),
        }
    }

    /// The offending token's position.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Expected { pos, .. }
            | Self::ExpectedExpression { pos, .. }
            | Self::InvalidAssignmentTarget { pos, .. }
            | Self::TooManyParameters { pos, .. }
            | Self::TooManyArguments { pos, .. } => *pos,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Expected { message, .. } => (*message).to_string(),
            Self::ExpectedExpression { .. } => "期望表达式".to_string(),
            Self::InvalidAssignmentTarget { .. } => "无效的赋值目标".to_string(),
            Self::TooManyParameters { .. } => "参数数量不能超过 255 个".to_string(),
            Self::TooManyArguments { .. } => "实参数量不能超过 255 个".to_string(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pos = self.pos();
        let location = match self.lexeme() {
            Some(lexeme) => format!("'{lexeme}'"),
            None => "文件末尾".to_string(),
        };

        write!(f,
               "第 {} 行，第 {} 列，在 {location} 处：{}",
               pos.line,
               pos.column,
               self.message())
    }
}

impl std::error::Error for ParseError {}
