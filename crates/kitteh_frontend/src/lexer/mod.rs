#[cfg(test)]
mod tests;

mod escape;

use std::collections::VecDeque;
use std::io::BufRead;

use kitteh_session::diagnostics::prelude::*;
use kitteh_utils::lookahead::Produce;
use kitteh_utils::peek::Peek;

use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::unicode::{CharNames, NoCharNames};

/// A raw fragment of source text. `text` is `None` once the input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Lexeme {
    pub text: Option<String>,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LexerWarning {
    pub kind: LexerWarningKind,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
pub enum LexerWarningKind {
    #[error("`:({0})` is not a valid code point")]
    InvalidCodePoint(String),

    #[error("unknown character name `:[{0}]`")]
    UnknownCharName(String),
}

impl IntoDiagnostic<SourceId> for LexerWarning {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        Diagnostic::warning()
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary(
                "kept as written",
                source_id,
                (self.line, self.column),
            ))
    }
}

pub struct Lexer<R> {
    input: R,
    char_names: Box<dyn CharNames>,
    warnings: Vec<LexerWarning>,

    // physical lines read but not yet lexed, each ending in `\n`
    pending: VecDeque<String>,
    finished: bool,

    line: Vec<char>,
    line_no: u32,
    pos: usize,

    last_lexeme: String,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(input: R) -> Self {
        Self::with_char_names(input, Box::new(NoCharNames))
    }

    pub fn with_char_names(input: R, char_names: Box<dyn CharNames>) -> Self {
        Self {
            input,
            char_names,
            warnings: vec![],

            pending: VecDeque::new(),
            finished: false,

            line: vec![],
            line_no: 0,
            pos: 0,

            last_lexeme: "\n".to_owned(),
        }
    }

    pub fn take_warnings(&mut self) -> Vec<LexerWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn next_lexeme(&mut self) -> SyntaxResult<Lexeme> {
        loop {
            if self.finished {
                return Ok(Lexeme {
                    text: None,
                    line: self.line_no,
                    column: 0,
                });
            }

            if self.pos >= self.line.len() {
                match self.next_line()? {
                    Some(line) => self.line = line,
                    None => self.finished = true,
                }
                continue;
            }

            while matches!(self.at(self.pos), Some(' ' | '\t')) {
                self.pos += 1;
            }

            // line continuation
            if self.starts_with_at(self.pos, "...\n") || self.starts_with_at(self.pos, "…\n") {
                let (line_no, column) = (self.line_no, self.column());

                match self.next_line()? {
                    Some(line) if !line.iter().all(|ch| ch.is_whitespace()) => {
                        self.line = line;
                        continue;
                    }
                    _ => {
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::EmptyContinuationLine,
                            line_no,
                            column,
                        ))
                    }
                }
            }

            if self.starts_with_at(self.pos, "BTW") {
                // the newline still ends the statement
                self.pos = self.line.len() - 1;
                continue;
            }

            if self.last_lexeme == "\n" && self.starts_with_at(self.pos, "OBTW") {
                self.skip_block_comment()?;
                continue;
            }

            let (line, column) = (self.line_no, self.column());

            let text = match self.at(self.pos) {
                Some(ch @ ('\n' | '!')) => {
                    self.pos += 1;
                    ch.to_string()
                }
                Some(',') => {
                    self.pos += 1;
                    "\n".to_owned()
                }
                Some('"') => self.lex_string()?,
                Some(_) => self.lex_word(),
                None => continue,
            };

            self.last_lexeme.clone_from(&text);

            return Ok(Lexeme {
                text: Some(text),
                line,
                column,
            });
        }
    }

    fn skip_block_comment(&mut self) -> SyntaxResult<()> {
        let (line_no, column) = (self.line_no, self.column());

        loop {
            let Some(line) = self.next_line()? else {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedComment,
                    line_no,
                    column,
                ));
            };

            if let Some(end) = find_comment_end(&line) {
                self.line = line;
                self.pos = end;
                return Ok(());
            }
        }
    }

    fn lex_string(&mut self) -> SyntaxResult<String> {
        let start = self.pos;
        let unterminated =
            || SyntaxError::new(SyntaxErrorKind::UnterminatedString, self.line_no, self.column());

        let mut end = start + 1;
        loop {
            match self.at(end) {
                Some('"') => break,
                Some(':') => end += 2,
                Some('\n') | None => return Err(unterminated()),
                Some(_) => end += 1,
            }
        }

        if !self.is_delimiter(end + 1) {
            return Err(unterminated());
        }

        let body: String = self.line[start + 1..end].iter().collect();
        let body = escape::substitute_escapes(
            &body,
            self.char_names.as_ref(),
            (self.line_no, self.column()),
            &mut self.warnings,
        );

        self.pos = end + 1;

        Ok(format!("\"{body}\""))
    }

    fn lex_word(&mut self) -> String {
        let start = self.pos;

        while !self.is_delimiter(self.pos) {
            self.pos += 1;
        }

        // an ellipsis that doesn't end the line is a lexeme of its own
        if self.pos == start {
            self.pos += if self.at(start) == Some('…') { 1 } else { 3 };
            self.pos = self.pos.min(self.line.len());
        }

        self.line[start..self.pos].iter().collect()
    }

    fn next_line(&mut self) -> SyntaxResult<Option<Vec<char>>> {
        if self.pending.is_empty() {
            self.read_lines()?;
        }

        let Some(line) = self.pending.pop_front() else {
            return Ok(None);
        };

        self.line_no += 1;
        self.pos = 0;

        Ok(Some(line.chars().collect()))
    }

    /// Reads up to the next `\n` and splits the chunk on every line ending.
    fn read_lines(&mut self) -> SyntaxResult<()> {
        let mut buf = vec![];
        self.input
            .read_until(b'\n', &mut buf)
            .map_err(|err| SyntaxError::read(&err, self.line_no))?;

        let chunk = String::from_utf8_lossy(&buf);
        let mut chars = chunk.chars();
        let mut line = String::new();

        while let Some(ch) = chars.next() {
            match ch {
                '\r' | '\n' => {
                    if ch == '\r' {
                        chars.eat('\n');
                    }

                    line.push('\n');
                    self.pending.push_back(std::mem::take(&mut line));
                }
                ch => line.push(ch),
            }
        }

        if !line.is_empty() {
            line.push('\n');
            self.pending.push_back(line);
        }

        Ok(())
    }

    fn at(&self, pos: usize) -> Option<char> {
        self.line.get(pos).copied()
    }

    fn starts_with_at(&self, pos: usize, s: &str) -> bool {
        let mut i = pos;
        for ch in s.chars() {
            if self.at(i) != Some(ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn is_delimiter(&self, pos: usize) -> bool {
        match self.at(pos) {
            Some(' ' | '\t' | '!' | ',' | '\n' | '…') | None => true,
            Some(_) => self.starts_with_at(pos, "..."),
        }
    }

    fn column(&self) -> u32 {
        self.pos as u32 + 1
    }
}

impl<R: BufRead> Produce for Lexer<R> {
    type Item = Lexeme;
    type Error = SyntaxError;

    fn produce(&mut self) -> SyntaxResult<Lexeme> {
        self.next_lexeme()
    }
}

/// Finds `TLDR` at the start of the line or after whitespace, followed by
/// nothing but whitespace and an optional comma. Returns the position just
/// past the terminator.
fn find_comment_end(line: &[char]) -> Option<usize> {
    let line = match line.split_last() {
        Some(('\n', rest)) => rest,
        _ => line,
    };

    (0..line.len()).find_map(|i| {
        let at_word_start = i == 0 || line[i - 1].is_whitespace();
        if !at_word_start || !line[i..].starts_with(&['T', 'L', 'D', 'R']) {
            return None;
        }

        let mut end = i + 4;
        while line.get(end).is_some_and(|ch| ch.is_whitespace()) {
            end += 1;
        }

        match line.get(end) {
            None => Some(end),
            Some(',') => Some(end + 1),
            Some(_) => None,
        }
    })
}
