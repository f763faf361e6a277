use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::{
            callable::{Callable, NativeFunction},
            core::Value,
            environment::Environment,
        },
    },
    util::num::usize_to_f64,
};

/// Defines the builtin functions by generating a static lookup table.
///
/// Each entry provides a registered name, an exact arity, and a function
/// pointer implementing the builtin. Arity is enforced by the call
/// machinery before the implementation runs, so the functions index their
/// argument slice freely.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "输出" => { arity: 1, func: print },
    "范围" => { arity: 2, func: range },
    "长度" => { arity: 1, func: length },
    "类型" => { arity: 1, func: type_of },
}

/// Registers every builtin in the given global environment.
///
/// Called once when a [`Context`] is constructed; the builtins live for the
/// lifetime of the interpreter instance.
pub fn install(globals: &Rc<RefCell<Environment>>) {
    let mut globals = globals.borrow_mut();

    for native in BUILTIN_TABLE {
        globals.define(native.name,
                       Value::Callable(Rc::new(Callable::Native(native.clone()))));
    }
}

/// `输出`: writes the argument's human-readable rendering to the context's
/// output sink, followed by a newline, and returns the value unchanged.
fn print(context: &mut Context, args: &[Value], _pos: Pos) -> EvalResult<Value> {
    let _ = writeln!(context.output, "{}", args[0]);
    Ok(args[0].clone())
}

/// `范围`: returns the array `[start, start+1, …]` of values strictly below
/// `end`, stepping by one. `end <= start` yields an empty array.
/// Non-integer numeric arguments step through plain float arithmetic.
fn range(_context: &mut Context, args: &[Value], pos: Pos) -> EvalResult<Value> {
    let (Value::Number(start), Value::Number(end)) = (&args[0], &args[1]) else {
        return Err(RuntimeError::RangeNeedsNumbers { pos });
    };

    let mut elements = Vec::new();
    let mut current = *start;
    while current < *end {
        elements.push(Value::Number(current));
        current += 1.0;
    }

    Ok(elements.into())
}

/// `长度`: the element count of an array, or the code-unit count of a
/// string.
fn length(_context: &mut Context, args: &[Value], pos: Pos) -> EvalResult<Value> {
    match &args[0] {
        Value::Array(elements) => Ok(Value::Number(usize_to_f64(elements.len()))),
        Value::Str(s) => Ok(Value::Number(usize_to_f64(s.encode_utf16().count()))),
        _ => Err(RuntimeError::LengthNeedsArrayOrString { pos }),
    }
}

/// `类型`: the language-level type tag of the argument, as a string.
fn type_of(_context: &mut Context, args: &[Value], _pos: Pos) -> EvalResult<Value> {
    Ok(Value::Str(args[0].type_name().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(func: crate::interpreter::value::callable::NativeFn,
            args: &[Value])
            -> EvalResult<Value> {
        let mut context = Context::with_output(Box::new(std::io::sink()));
        func(&mut context, args, Pos::default())
    }

    #[test]
    fn range_produces_half_open_integers() {
        let result = call(range, &[Value::Number(0.0), Value::Number(3.0)]).unwrap();
        assert_eq!(result.to_string(), "[0, 1, 2]");
    }

    #[test]
    fn range_is_empty_when_end_is_not_above_start() {
        let result = call(range, &[Value::Number(5.0), Value::Number(5.0)]).unwrap();
        assert_eq!(result.to_string(), "[]");

        let result = call(range, &[Value::Number(5.0), Value::Number(2.0)]).unwrap();
        assert_eq!(result.to_string(), "[]");
    }

    #[test]
    fn range_rejects_non_numbers() {
        let err = call(range, &[Value::Null, Value::Number(3.0)]).unwrap_err();
        assert!(matches!(err, RuntimeError::RangeNeedsNumbers { .. }));
    }

    #[test]
    fn length_counts_code_units() {
        let result = call(length, &[Value::Str("你好".to_string())]).unwrap();
        assert_eq!(result, Value::Number(2.0));

        let result = call(length, &[Value::from(vec![Value::Null, Value::Null])]).unwrap();
        assert_eq!(result, Value::Number(2.0));
    }

    #[test]
    fn length_rejects_other_types() {
        let err = call(length, &[Value::Number(1.0)]).unwrap_err();
        assert!(matches!(err, RuntimeError::LengthNeedsArrayOrString { .. }));
    }

    #[test]
    fn type_of_reports_language_tags() {
        let tag = |value| call(type_of, &[value]).unwrap();

        assert_eq!(tag(Value::Number(1.0)), Value::Str("数字".to_string()));
        assert_eq!(tag(Value::Null), Value::Str("空".to_string()));
        assert_eq!(tag(Value::from(Vec::new())), Value::Str("数组".to_string()));
    }
}
