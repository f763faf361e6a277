use crate::interpreter::lexer::Pos;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can be raised during evaluation.
///
/// Every variant is attributed to a source token position (usually the
/// operator, the call's closing parenthesis or the loop variable). The
/// rendered form is `运行时错误（第 L 行，第 C 列）：MSG`.
pub enum RuntimeError {
    /// A name that is not bound in any enclosing scope.
    UndefinedVariable {
        /// The name that failed to resolve.
        name: String,
        /// Position of the referencing token.
        pos:  Pos,
    },
    /// An arithmetic or comparison operator was applied to a non-number.
    OperandsMustBeNumbers {
        /// Position of the operator token.
        pos: Pos,
    },
    /// `+` was applied to anything other than two numbers or two strings.
    OperandsMustBeNumbersOrStrings {
        /// Position of the `+` token.
        pos: Pos,
    },
    /// Division with a zero divisor.
    DivisionByZero {
        /// Position of the `/` token.
        pos: Pos,
    },
    /// A call whose callee is not a function value.
    NotCallable {
        /// Position of the call's closing parenthesis.
        pos: Pos,
    },
    /// A call whose argument count does not match the callee's arity.
    ArityMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments the call supplied.
        found:    usize,
        /// Position of the call's closing parenthesis.
        pos:      Pos,
    },
    /// A `对于` loop whose iterable is not an array.
    ForLoopNeedsArray {
        /// Position of the loop variable token.
        pos: Pos,
    },
    /// `范围` received a non-number argument.
    RangeNeedsNumbers {
        /// Position of the call's closing parenthesis.
        pos: Pos,
    },
    /// `长度` received a value that is neither an array nor a string.
    LengthNeedsArrayOrString {
        /// Position of the call's closing parenthesis.
        pos: Pos,
    },
}

impl RuntimeError {
    /// The position of the token this error is attributed to.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UndefinedVariable { pos, .. }
            | Self::OperandsMustBeNumbers { pos }
            | Self::OperandsMustBeNumbersOrStrings { pos }
            | Self::DivisionByZero { pos }
            | Self::NotCallable { pos }
            | Self::ArityMismatch { pos, .. }
            | Self::ForLoopNeedsArray { pos }
            | Self::RangeNeedsNumbers { pos }
            | Self::LengthNeedsArrayOrString { pos } => *pos,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UndefinedVariable { name, .. } => format!("未定义的变量 '{name}'"),
            Self::OperandsMustBeNumbers { .. } => "操作数必须是数字".to_string(),
            Self::OperandsMustBeNumbersOrStrings { .. } => {
                "操作数必须是两个数字或两个字符串".to_string()
            },
            Self::DivisionByZero { .. } => "除数不能为零".to_string(),
            Self::NotCallable { .. } => "只能调用函数".to_string(),
            Self::ArityMismatch { expected, found, .. } => {
                format!("期望 {expected} 个参数但得到 {found} 个")
            },
            Self::ForLoopNeedsArray { .. } => "'对于' 循环需要一个数组".to_string(),
            Self::RangeNeedsNumbers { .. } => "范围函数需要两个数字参数".to_string(),
            Self::LengthNeedsArrayOrString { .. } => "长度函数需要数组或字符串参数".to_string(),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pos = self.pos();
        write!(f,
               "运行时错误（第 {} 行，第 {} 列）：{}",
               pos.line,
               pos.column,
               self.message())
    }
}

impl std::error::Error for RuntimeError {}
