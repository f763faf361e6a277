use std::{cell::RefCell, mem, rc::Rc};

use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        lexer::Pos,
        value::{core::Value, environment::Environment},
    },
};

impl Context {
    /// Evaluates a `对于 v 在 iterable` loop.
    ///
    /// The iterable is evaluated once and must be an array. A single loop
    /// environment is created as a child of the current one; each element
    /// rebinds the loop variable in that environment before the body runs
    /// inside it. An unwinding `返回` from the body leaves the loop
    /// immediately; the loop environment is dropped on every exit path.
    ///
    /// # Parameters
    /// - `var`: The loop variable name.
    /// - `pos`: Position of the loop variable token for error reporting.
    /// - `iterable`: Expression producing the array.
    /// - `body`: The loop body statement.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ForLoopNeedsArray`] when the iterable is not
    /// an array, or whatever error the body raises.
    pub(crate) fn execute_for(&mut self,
                              var: &str,
                              pos: Pos,
                              iterable: &Expr,
                              body: &Stmt)
                              -> EvalResult<Flow> {
        let Value::Array(elements) = self.eval(iterable)? else {
            return Err(RuntimeError::ForLoopNeedsArray { pos });
        };

        let environment = Rc::new(RefCell::new(Environment::with_enclosing(&self.environment)));
        let previous = mem::replace(&mut self.environment, environment);

        let mut flow = Ok(Flow::Normal);
        for element in elements.iter() {
            self.environment.borrow_mut().define(var, element.clone());

            match self.execute(body) {
                Ok(Flow::Normal) => {},
                other => {
                    flow = other;
                    break;
                },
            }
        }

        self.environment = previous;
        flow
    }
}
