use std::{cell::RefCell, io::Write, mem, rc::Rc};

use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::value::{
        callable::Callable,
        core::Value,
        environment::Environment,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing one statement.
///
/// `返回` does not use the error channel: it travels through this
/// discriminant so the top-level handler can never mistake an unwinding
/// return for a failure. Every statement executor propagates `Return`
/// outward immediately; the call machinery turns it back into a plain
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement completed; execution continues with the next one.
    Normal,
    /// A `返回` is unwinding with the given value.
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the global environment (which
/// owns the builtin functions and lives as long as the context), the
/// current environment pointer the tree walk descends with, and the sink
/// `输出` writes to.
///
/// ## Usage
///
/// A `Context` is created once and reused across `interpret` calls, so a
/// REPL session accumulates definitions in the global environment.
pub struct Context {
    /// The root of the environment chain.
    pub(crate) globals:     Rc<RefCell<Environment>>,
    /// The environment the walker currently resolves names against.
    pub(crate) environment: Rc<RefCell<Environment>>,
    /// Where `输出` writes its rendering.
    pub(crate) output:      Box<dyn Write>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context whose `输出` writes to standard output. The builtin
    /// functions are registered in the fresh global environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }

    /// Creates a context writing `输出` renderings to the given sink.
    ///
    /// Used by embedders and tests that capture program output.
    #[must_use]
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        super::builtins::install(&globals);

        Self { globals: Rc::clone(&globals),
               environment: globals,
               output }
    }

    /// Executes a list of top-level statements in order.
    ///
    /// A `返回` at the top level stops the list quietly; it is control
    /// flow, not an error.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised by any statement.
    ///
    /// # Example
    /// ```
    /// use vscript::interpreter::{evaluator::core::Context, lexer::scan, parser::core::parse};
    ///
    /// let tokens = scan("就是 x = 2 + 3").unwrap();
    /// let program = parse(&mut tokens.iter().peekable()).unwrap();
    ///
    /// let mut context = Context::new();
    /// assert!(context.interpret(&program).is_ok());
    /// ```
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            if let Flow::Return(_) = self.execute(statement)? {
                break;
            }
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// Exactly one arm runs per statement variant. Declarations mutate the
    /// current environment; control-flow statements delegate back into
    /// `execute` for their branches and propagate any unwinding `Return`
    /// outward unchanged.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when any contained expression fails.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Expression { expr } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Stmt::Let { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(Flow::Normal)
            },
            Stmt::Function(declaration) => {
                // The closure is the environment current at the declaration
                // site; the function is not hoisted.
                let function = Callable::Function { declaration: declaration.clone(),
                                                    closure:     Rc::clone(&self.environment), };
                self.environment
                    .borrow_mut()
                    .define(&declaration.name, Value::Callable(Rc::new(function)));
                Ok(Flow::Normal)
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.eval(condition)?.truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Stmt::While { condition, body } => {
                while self.eval(condition)?.truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },
            Stmt::Block { statements } => {
                let environment =
                    Rc::new(RefCell::new(Environment::with_enclosing(&self.environment)));
                self.execute_block(statements, environment)
            },
            Stmt::For { var,
                        pos,
                        iterable,
                        body, } => self.execute_for(var, *pos, iterable, body),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Sub-expressions are evaluated strictly left to right before their
    /// parent operator fires; this order is observable through side effects
    /// of calls.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] attributed to the operator, name or
    /// closing-parenthesis token of the failing node.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value)),
            Expr::Grouping { inner } => self.eval(inner),
            Expr::Variable { name, pos } => {
                self.environment
                    .borrow()
                    .get(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                     pos:  *pos, })
            },
            Expr::Assign { name, pos, value } => {
                let value = self.eval(value)?;
                if self.environment.borrow_mut().assign(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                          pos:  *pos, })
                }
            },
            Expr::Unary { op, operand, pos } => {
                let operand = self.eval(operand)?;
                Self::eval_unary(*op, &operand, *pos)
            },
            Expr::Binary { left, op, right, pos } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *pos)
            },
            Expr::Call { callee, arguments, pos } => self.eval_call(callee, arguments, *pos),
            Expr::ArrayLiteral { elements } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Ok(values.into())
            },
        }
    }

    /// Executes statements inside the given environment.
    ///
    /// The current environment is swapped for `environment` and restored on
    /// every exit path — normal completion, runtime error and return
    /// unwind — so scope visibility stays intact for whatever runs next.
    pub(crate) fn execute_block(&mut self,
                                statements: &[Stmt],
                                environment: Rc<RefCell<Environment>>)
                                -> EvalResult<Flow> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut flow = Ok(Flow::Normal);
        for statement in statements {
            match self.execute(statement) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, LiteralValue},
        interpreter::{
            lexer::{Pos, scan},
            parser::core::parse,
        },
    };

    fn run(context: &mut Context, source: &str) -> EvalResult<()> {
        let tokens = scan(source).unwrap();
        let program = parse(&mut tokens.iter().peekable()).unwrap();
        context.interpret(&program)
    }

    fn global(context: &Context, name: &str) -> Option<Value> {
        context.globals.borrow().get(name)
    }

    #[test]
    fn while_variant_is_a_pretest_loop() {
        // No surface keyword builds this node; drive it straight from the
        // tree to keep the dormant variant honest.
        let mut context = Context::new();
        run(&mut context, "就是 i = 0").unwrap();

        let statement =
            Stmt::While { condition: Expr::Binary { left:  Box::new(Expr::Variable { name: "i".to_string(),
                                                                                     pos:  Pos::default(), }),
                                                    op:    BinaryOperator::Less,
                                                    right: Box::new(Expr::Literal { value: 3.0.into() }),
                                                    pos:   Pos::default(), },
                          body:      Box::new(Stmt::Expression { expr: Expr::Assign { name:  "i".to_string(),
                                                                                      pos:   Pos::default(),
                                                                                      value: Box::new(Expr::Binary { left:  Box::new(Expr::Variable { name: "i".to_string(),
                                                                                                                                                       pos:  Pos::default(), }),
                                                                                                                     op:    BinaryOperator::Add,
                                                                                                                     right: Box::new(Expr::Literal { value: 1.0.into() }),
                                                                                                                     pos:   Pos::default(), }), }, }), };

        assert_eq!(context.execute(&statement).unwrap(), Flow::Normal);
        assert_eq!(global(&context, "i"), Some(Value::Number(3.0)));
    }

    #[test]
    fn while_with_falsy_condition_never_runs() {
        let mut context = Context::new();

        let statement = Stmt::While { condition: Expr::Literal { value: LiteralValue::Null },
                                      body:      Box::new(Stmt::Expression { expr: Expr::Variable { name: "未绑定".to_string(),
                                                                                                    pos:  Pos::default(), }, }), };

        assert_eq!(context.execute(&statement).unwrap(), Flow::Normal);
    }

    #[test]
    fn block_scope_is_restored_after_an_error() {
        let mut context = Context::new();
        run(&mut context, "就是 x = 1").unwrap();

        // The failing block defines a shadowing binding that must not leak.
        assert!(run(&mut context, "{ 就是 x = 2 不存在 }").is_err());
        assert_eq!(global(&context, "x"), Some(Value::Number(1.0)));

        // The session keeps working in the original scope.
        run(&mut context, "x = x + 1").unwrap();
        assert_eq!(global(&context, "x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn top_level_return_stops_quietly() {
        let mut context = Context::new();
        run(&mut context, "就是 x = 1 返回 9 x = 2").unwrap();

        assert_eq!(global(&context, "x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn declarations_persist_across_interpret_calls() {
        let mut context = Context::new();
        run(&mut context, "就是 计数 = 41").unwrap();
        run(&mut context, "计数 = 计数 + 1").unwrap();

        assert_eq!(global(&context, "计数"), Some(Value::Number(42.0)));
    }
}
