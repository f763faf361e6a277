use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operator applied to a fully evaluated value.
    ///
    /// Negation requires a number; logical not returns the negation of the
    /// operand's truthiness and accepts any value.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: The evaluated operand.
    /// - `pos`: Position of the operator token for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed result.
    pub fn eval_unary(op: UnaryOperator, operand: &Value, pos: Pos) -> EvalResult<Value> {
        match (op, operand) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Negate, _) => Err(RuntimeError::OperandsMustBeNumbers { pos }),
            (UnaryOperator::Not, value) => Ok(Value::Bool(!value.truthy())),
        }
    }
}
