/// A location in a source, measured in characters.
///
/// Lines and columns are 1-based. A column of `0` marks a span that covers
/// its whole line, which is what runtime errors use since they only know the
/// line of the failing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: u32,
    pub column: u32,
    pub len: u32,
}

impl Span {
    pub fn new(line: u32, column: u32, len: u32) -> Self {
        Self { line, column, len }
    }

    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, 1)
    }

    pub fn line(line: u32) -> Self {
        Self::new(line, 0, 0)
    }

    pub fn is_whole_line(&self) -> bool {
        self.column == 0
    }
}

pub trait AsSpan {
    fn as_span(&self) -> Span;
}

impl AsSpan for Span {
    fn as_span(&self) -> Span {
        *self
    }
}

/// `(line, column)` pairs point at a single character.
impl AsSpan for (u32, u32) {
    fn as_span(&self) -> Span {
        Span::point(self.0, self.1)
    }
}
