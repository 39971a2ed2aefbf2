use std::fmt;

use kitteh_frontend::ast::{Constant, ValueType};

/// A runtime value. The variant is the value's type, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Noob,
    Troof(bool),
    Numbr(i64),
    Numbar(f64),
    Yarn(String),
}

impl Value {
    pub fn ty(&self) -> ValueType {
        match self {
            Value::Noob => ValueType::Noob,
            Value::Troof(_) => ValueType::Troof,
            Value::Numbr(_) => ValueType::Numbr,
            Value::Numbar(_) => ValueType::Numbar,
            Value::Yarn(_) => ValueType::Yarn,
        }
    }
}

impl From<&Constant> for Value {
    fn from(constant: &Constant) -> Self {
        match constant {
            Constant::Bool(b) => Value::Troof(*b),
            Constant::Integer(n) => Value::Numbr(*n),
            Constant::Float(n) => Value::Numbar(*n),
            Constant::String(s) => Value::Yarn(s.clone()),
        }
    }
}

/// Renders the value the way it would be written in a program, for messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Noob => f.write_str("NOOB"),
            Value::Troof(true) => f.write_str("WIN"),
            Value::Troof(false) => f.write_str("FAIL"),
            Value::Numbr(n) => write!(f, "{n}"),
            Value::Numbar(n) => write!(f, "{n:?}"),
            Value::Yarn(s) => write!(f, "{s:?}"),
        }
    }
}
