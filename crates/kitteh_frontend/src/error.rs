use std::io;

use kitteh_session::diagnostics::prelude::*;

#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("unknown token `{0}`")]
    UnknownToken(String),

    #[error("unterminated string constant")]
    UnterminatedString,

    #[error("unterminated multi-line comment")]
    UnterminatedComment,

    #[error("line continuation may not be followed by an empty line")]
    EmptyContinuationLine,

    #[error("integer literal `{0}` is too large")]
    IntegerOverflow(String),

    #[error("loop labels don't match: `{open}` and `{close}`")]
    MismatchedLoopLabels { open: String, close: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },

    #[error("function `{name}` expects {expected} argument(s), {found} passed")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("function `{0}` is already defined")]
    DuplicateFunction(String),

    #[error("couldn't read source: {0}")]
    Read(String),
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }

    pub fn read(err: &io::Error, line: u32) -> Self {
        Self::new(SyntaxErrorKind::Read(err.to_string()), line, 0)
    }

    /// Whether more input could have turned this error into a valid parse.
    ///
    /// Used by the interactive session to decide between reporting an error
    /// and asking for another line.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self.kind,
            SyntaxErrorKind::UnterminatedComment | SyntaxErrorKind::UnexpectedEof { .. }
        )
    }

    fn label(&self) -> &'static str {
        match &self.kind {
            SyntaxErrorKind::UnterminatedString => "string starts here",
            SyntaxErrorKind::UnterminatedComment => "comment starts here",
            SyntaxErrorKind::EmptyContinuationLine => "continued here",
            SyntaxErrorKind::MismatchedLoopLabels { .. } => "loop starts here",
            SyntaxErrorKind::WrongArgumentCount { .. } => "in this call",
            SyntaxErrorKind::DuplicateFunction(_) => "defined again here",
            _ => "here",
        }
    }
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl IntoDiagnostic<SourceId> for SyntaxError {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        let diagnostic = Diagnostic::error().with_message(format!("syntax error: {}", self.kind));

        if self.line == 0 {
            return diagnostic;
        }

        let span = if self.column == 0 {
            Span::line(self.line)
        } else {
            Span::point(self.line, self.column)
        };

        diagnostic.with_snippet(Snippet::primary(self.label(), source_id, span))
    }
}
