use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A lexically-nested mapping from names to values.
///
/// Environments form a chain through `enclosing`; the root of the chain is
/// the interpreter's global environment. Environments are shared by
/// reference (`Rc<RefCell<_>>`): a closure captures the environment pointer
/// that was current at its declaration, so mutations made through one
/// holder are visible to every other holder of the same scope.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a root environment with no enclosing scope.
    #[must_use]
    pub fn new() -> Self {
        Self { values:    HashMap::new(),
               enclosing: None, }
    }

    /// Creates an environment nested inside `enclosing`.
    #[must_use]
    pub fn with_enclosing(enclosing: &Rc<RefCell<Self>>) -> Self {
        Self { values:    HashMap::new(),
               enclosing: Some(Rc::clone(enclosing)), }
    }

    /// Unconditionally sets `name` in **this** scope.
    ///
    /// A name already bound here is silently rebound; enclosing scopes are
    /// never consulted.
    ///
    /// # Example
    /// ```
    /// use vscript::interpreter::value::{core::Value, environment::Environment};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Number(1.0));
    /// env.define("x", Value::Number(2.0));
    ///
    /// assert_eq!(env.get("x"), Some(Value::Number(2.0)));
    /// ```
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Overwrites the binding of `name` in the nearest enclosing scope that
    /// contains it.
    ///
    /// Returns `true` when a binding was found and updated. Assignment
    /// never creates a binding; a miss across the whole chain returns
    /// `false` and the caller reports the undefined variable.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Looks up `name`, walking outward through the enclosing chain.
    ///
    /// Returns a clone of the bound value, or `None` when no scope in the
    /// chain contains the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }

        self.enclosing
            .as_ref()
            .and_then(|enclosing| enclosing.borrow().get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_updates_the_nearest_holder() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().define("x", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(&outer);
        assert!(inner.assign("x", Value::Number(2.0)));

        assert_eq!(outer.borrow().get("x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn assign_never_creates_a_binding() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        let mut inner = Environment::with_enclosing(&outer);

        assert!(!inner.assign("missing", Value::Null));
        assert_eq!(inner.get("missing"), None);
        assert_eq!(outer.borrow().get("missing"), None);
    }

    #[test]
    fn inner_definitions_shadow_outer_ones() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().define("x", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(&outer);
        inner.define("x", Value::Number(2.0));

        assert_eq!(inner.get("x"), Some(Value::Number(2.0)));
        assert_eq!(outer.borrow().get("x"), Some(Value::Number(1.0)));
    }
}
