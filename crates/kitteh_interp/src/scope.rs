use std::collections::HashMap;

use crate::error::{EvalResult, RuntimeErrorKind};
use crate::value::Value;

/// The implicit result register.
pub const IT: &str = "IT";

/// The variables of one program scope: the top level or one function call.
#[derive(Debug, Clone)]
pub struct Scope {
    vars: HashMap<String, Value>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert(IT.to_owned(), Value::Noob);

        Self { vars }
    }

    pub fn get(&self, name: &str) -> EvalResult<&Value> {
        self.vars
            .get(name)
            .ok_or_else(|| RuntimeErrorKind::UndeclaredVariable(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn declare(&mut self, name: &str, value: Value) -> EvalResult<()> {
        if self.contains(name) {
            return Err(RuntimeErrorKind::AlreadyDeclared(name.to_owned()));
        }

        self.vars.insert(name.to_owned(), value);
        Ok(())
    }

    pub fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        match self.vars.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeErrorKind::UndeclaredVariable(name.to_owned())),
        }
    }

    /// Binds `name` whether or not it already exists, returning the old value.
    pub fn bind(&mut self, name: &str, value: Value) -> Option<Value> {
        self.vars.insert(name.to_owned(), value)
    }

    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn it(&self) -> &Value {
        // `IT` is never unbound
        self.vars.get(IT).unwrap_or(&Value::Noob)
    }

    pub fn set_it(&mut self, value: Value) {
        self.vars.insert(IT.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_it() {
        let scope = Scope::new();
        assert_eq!(scope.get(IT), Ok(&Value::Noob));
        assert_eq!(
            scope.get("x"),
            Err(RuntimeErrorKind::UndeclaredVariable("x".to_owned()))
        );
    }

    #[test]
    fn declare_and_assign() {
        let mut scope = Scope::new();

        assert_eq!(
            scope.assign("x", Value::Numbr(1)),
            Err(RuntimeErrorKind::UndeclaredVariable("x".to_owned()))
        );

        scope.declare("x", Value::Noob).unwrap();
        scope.assign("x", Value::Numbr(1)).unwrap();
        assert_eq!(scope.get("x"), Ok(&Value::Numbr(1)));

        assert_eq!(
            scope.declare("x", Value::Noob),
            Err(RuntimeErrorKind::AlreadyDeclared("x".to_owned()))
        );
    }
}
