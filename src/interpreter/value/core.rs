use std::rc::Rc;

use crate::{ast::LiteralValue, interpreter::value::callable::Callable};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// variable bindings, function arguments and return values. Arrays and
/// callables are reference-counted: copying a value shares the underlying
/// storage, and equality between two of them is identity, not structure.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (IEEE-754 double precision).
    Number(f64),
    /// A string value.
    Str(String),
    /// A boolean value (`真` or `假`).
    Bool(bool),
    /// The null value (`空`).
    Null,
    /// An array of values. There is no element-mutation syntax; arrays are
    /// produced whole by literals and by `范围`.
    Array(Rc<Vec<Self>>),
    /// A callable value: a user-declared function or a native one.
    Callable(Rc<Callable>),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(Rc::new(value))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Str(s) => s.clone().into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Converts the value to a boolean following the language's truthiness
    /// rule: `空` is false, a boolean is itself, and every other value —
    /// including `0`, the empty string and the empty array — is true.
    ///
    /// # Example
    /// ```
    /// use vscript::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Null.truthy());
    /// assert!(!Value::Bool(false).truthy());
    /// assert!(Value::Number(0.0).truthy());
    /// assert!(Value::Str(String::new()).truthy());
    /// ```
    #[must_use]
    pub const fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            _ => true,
        }
    }

    /// The language-level type tag of this value, as reported by `类型`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "数字",
            Self::Str(_) => "字符串",
            Self::Bool(_) => "布尔",
            Self::Null => "空",
            Self::Array(_) => "数组",
            Self::Callable(_) => "函数",
        }
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }
}

/// Language equality: `空` equals only `空`, numbers compare numerically,
/// strings by content, booleans by value, and arrays and callables by
/// identity. Values of different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Callable(a), Self::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "真"),
            Self::Bool(false) => write!(f, "假"),
            Self::Null => write!(f, "空"),
            Self::Array(elements) => {
                write!(f, "[")?;

                for (index, value) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Callable(callable) => write!(f, "{callable}"),
        }
    }
}
