
mod eval;
mod scope;

pub mod cast;
pub mod error;
pub mod value;

pub use error::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use eval::Interpreter;
pub use value::Value;
