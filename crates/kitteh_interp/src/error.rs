use std::io;

use kitteh_frontend::ast::ValueType;
use kitteh_session::diagnostics::prelude::*;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeErrorKind {
    #[error("variable `{0}` is not declared")]
    UndeclaredVariable(String),

    #[error("variable `{0}` is already declared")]
    AlreadyDeclared(String),

    #[error("function `{0}` is not declared")]
    UndeclaredFunction(String),

    #[error("function `{0}` is already declared")]
    FunctionAlreadyDeclared(String),

    #[error("function `{name}` expects {expected} argument(s), {found} passed")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("NOOB cannot be implicitly cast into {0}")]
    IllegalNoobCast(ValueType),

    #[error("`{0}` is not a valid integer")]
    InvalidInteger(String),

    #[error("`{0}` is not a valid float")]
    InvalidFloat(String),

    #[error("operands must have the same type, found {lhs} and {rhs}")]
    OperandTypeMismatch { lhs: ValueType, rhs: ValueType },

    #[error("case literal {0} appears more than once")]
    DuplicateCaseLiteral(Value),

    #[error("illegal break statement")]
    IllegalBreak,

    #[error("illegal return statement")]
    IllegalReturn,

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("i/o error: {0}")]
    Io(String),
}

impl From<io::Error> for RuntimeErrorKind {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors raised below statement level, before the failing line is known.
pub(crate) type EvalResult<T> = Result<T, RuntimeErrorKind>;

impl IntoDiagnostic<SourceId> for RuntimeError {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        let diagnostic = Diagnostic::error().with_message(format!("runtime error: {}", self.kind));

        if self.line == 0 {
            return diagnostic;
        }

        diagnostic.with_snippet(Snippet::primary(
            "while running this statement",
            source_id,
            Span::line(self.line),
        ))
    }
}
