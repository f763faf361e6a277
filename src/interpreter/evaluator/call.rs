use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        lexer::Pos,
        value::{callable::Callable, core::Value, environment::Environment},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument in source order.
    /// The callee must be a callable value and the argument count must
    /// match its arity exactly; both failures are attributed to the call's
    /// closing parenthesis.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the callee.
    /// - `arguments`: Argument expressions in source order.
    /// - `pos`: Position of the closing parenthesis.
    ///
    /// # Returns
    /// The callee's result; a user function that completes without `返回`
    /// yields `空`.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            pos: Pos)
                            -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { pos });
        };

        if args.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found:    args.len(),
                                                     pos });
        }

        self.invoke(&callable, &args, pos)
    }

    /// Invokes an arity-checked callable with evaluated arguments.
    ///
    /// A user function runs its body in a fresh child of the environment it
    /// closed over — never of the caller's — with the parameters bound
    /// positionally. An unwinding `返回` becomes the call's value.
    fn invoke(&mut self, callable: &Callable, args: &[Value], pos: Pos) -> EvalResult<Value> {
        match callable {
            Callable::Function { declaration, closure } => {
                let environment = Rc::new(RefCell::new(Environment::with_enclosing(closure)));

                for (param, arg) in declaration.params.iter().zip(args) {
                    environment.borrow_mut().define(param, arg.clone());
                }

                match self.execute_block(&declaration.body, environment)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Null),
                }
            },
            Callable::Native(native) => (native.func)(self, args, pos),
        }
    }
}
