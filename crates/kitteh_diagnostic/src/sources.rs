use std::path::{Path, PathBuf};

pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

impl Source for (String, PathBuf, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.1)
    }

    fn source_str(&self) -> &str {
        &self.2
    }
}

/// A source along with the byte offset of each line start.
///
/// `\n`, `\r\n` and a bare `\r` all end a line, matching the lexer.
#[derive(Debug, Clone)]
pub struct Cached<S: Source> {
    source: S,
    line_starts: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let source_str = source.source_str();

        let mut line_starts = vec![0];
        let mut chars = source_str.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => {}
                '\r' | '\n' => line_starts.push(i + 1),
                _ => {}
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the text of the 0-based line `index`, without its terminator.
    pub fn line_str(&self, index: usize) -> Option<&str> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_to_byte(index + 1)
            .unwrap_or(self.source_str().len());

        let s = &self.source_str()[start..end];
        let s = s.strip_suffix('\n').unwrap_or(s);
        let s = s.strip_suffix('\r').unwrap_or(s);

        Some(s)
    }

    pub fn num_lines(&self) -> usize {
        self.line_starts.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;

    fn cached_str(s: impl Into<String>) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.into()))
    }

    #[test]
    fn test_line_to_byte() {
        let cached = cached_str("");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), None);

        let cached = cached_str("\n");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), Some(1));
        assert_eq!(cached.line_to_byte(2), None);

        let cached = cached_str("x\r\ny\rz");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), Some(3));
        assert_eq!(cached.line_to_byte(2), Some(5));
        assert_eq!(cached.line_to_byte(3), None);
    }

    #[test]
    fn test_line_str() {
        let cached = cached_str("");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), None);

        let cached = cached_str("\n");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), Some(""));
        assert_eq!(cached.line_str(2), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.line_str(0), Some("x"));
        assert_eq!(cached.line_str(1), Some(""));
        assert_eq!(cached.line_str(2), None);

        let cached = cached_str("a\r\nb\rc");
        assert_eq!(cached.line_str(0), Some("a"));
        assert_eq!(cached.line_str(1), Some("b"));
        assert_eq!(cached.line_str(2), Some("c"));
        assert_eq!(cached.num_lines(), 3);
    }
}
