use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two fully evaluated values.
    ///
    /// Both operands have already been computed, left first — the logical
    /// operators therefore do **not** short-circuit: `并` and `或` combine
    /// the truthiness of two values that were both evaluated.
    ///
    /// Type rules:
    /// - `+` accepts two numbers (sum) or two strings (concatenation).
    /// - `-`, `*`, `/`, `%` and the comparisons accept numbers only; `/`
    ///   rejects a zero divisor.
    /// - `==` and `!=` accept any pair of values.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `pos`: Position of the operator token for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed result.
    ///
    /// # Example
    /// ```
    /// use vscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Pos, value::core::Value},
    /// };
    ///
    /// let left = Value::Str("你好".to_string());
    /// let right = Value::Str("，世界".to_string());
    ///
    /// let result =
    ///     Context::eval_binary(BinaryOperator::Add, &left, &right, Pos::default()).unwrap();
    /// assert_eq!(result, Value::Str("你好，世界".to_string()));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       pos: Pos)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        use Value::{Number, Str};

        match (op, left, right) {
            (Add, Number(a), Number(b)) => Ok(Number(a + b)),
            (Add, Str(a), Str(b)) => Ok(Str(format!("{a}{b}"))),
            (Add, _, _) => Err(RuntimeError::OperandsMustBeNumbersOrStrings { pos }),

            (Sub, Number(a), Number(b)) => Ok(Number(a - b)),
            (Mul, Number(a), Number(b)) => Ok(Number(a * b)),
            (Div, Number(a), Number(b)) => {
                if *b == 0.0 {
                    Err(RuntimeError::DivisionByZero { pos })
                } else {
                    Ok(Number(a / b))
                }
            },
            // Host float modulo: the result carries the dividend's sign.
            (Mod, Number(a), Number(b)) => Ok(Number(a % b)),

            (Less, Number(a), Number(b)) => Ok(Value::Bool(a < b)),
            (LessEqual, Number(a), Number(b)) => Ok(Value::Bool(a <= b)),
            (Greater, Number(a), Number(b)) => Ok(Value::Bool(a > b)),
            (GreaterEqual, Number(a), Number(b)) => Ok(Value::Bool(a >= b)),

            (Sub | Mul | Div | Mod | Less | LessEqual | Greater | GreaterEqual, _, _) => {
                Err(RuntimeError::OperandsMustBeNumbers { pos })
            },

            (Equal, a, b) => Ok(Value::Bool(a == b)),
            (NotEqual, a, b) => Ok(Value::Bool(a != b)),

            (And, a, b) => Ok(Value::Bool(a.truthy() && b.truthy())),
            (Or, a, b) => Ok(Value::Bool(a.truthy() || b.truthy())),
        }
    }
}
