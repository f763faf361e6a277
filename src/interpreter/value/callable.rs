use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::FunctionDecl,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::{core::Value, environment::Environment},
    },
};

/// Signature shared by all native function implementations.
///
/// A native receives the evaluation context (for output), the already
/// evaluated arguments, and the position of the call's closing parenthesis
/// for error attribution. Arity is checked by the call machinery before the
/// function runs.
pub type NativeFn = fn(&mut Context, &[Value], Pos) -> EvalResult<Value>;

/// A callable runtime value.
///
/// User functions carry their declaration and the environment captured at
/// declaration time; invoking one executes the body in a fresh child of
/// that environment, never of the caller's. Native functions are plain
/// host-implemented entry points.
#[derive(Debug)]
pub enum Callable {
    /// A function declared with `函数`.
    Function {
        /// The parsed declaration (name, parameters, body).
        declaration: FunctionDecl,
        /// The environment that was current at the declaration site.
        closure:     Rc<RefCell<Environment>>,
    },
    /// A host-implemented function registered in the global environment.
    Native(NativeFunction),
}

/// A host-implemented function: display name, arity and implementation.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    /// The name the function is registered under.
    pub name:  &'static str,
    /// The exact number of arguments the function requires.
    pub arity: usize,
    /// The host implementation.
    pub func:  NativeFn,
}

impl Callable {
    /// The exact number of positional arguments this callable requires.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Function { declaration, .. } => declaration.params.len(),
            Self::Native(native) => native.arity,
        }
    }

    /// The display name used when the value is rendered.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function { declaration, .. } => &declaration.name,
            Self::Native(native) => native.name,
        }
    }
}

impl std::fmt::Display for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<函数 {}>", self.name())
    }
}
