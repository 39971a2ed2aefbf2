#[cfg(test)]
mod tests;

mod trie;

use std::io::BufRead;

use kitteh_utils::lookahead::{Lookahead, Produce};

use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::lexer::{Lexer, LexerWarning};
use crate::literal::{is_float_literal, is_identifier, is_integer_literal};
use crate::token::{Keyword, Token, TokenKind};
use trie::KeywordTrie;

/// Turns lexemes into tokens, merging multi-word keywords.
pub struct Tokenizer<R: BufRead> {
    lexemes: Lookahead<Lexer<R>>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexemes: Lookahead::new(lexer),
        }
    }

    pub fn from_reader(input: R) -> Self {
        Self::new(Lexer::new(input))
    }

    pub fn take_warnings(&mut self) -> Vec<LexerWarning> {
        self.lexemes.producer_mut().take_warnings()
    }

    pub fn next_token(&mut self) -> SyntaxResult<Token> {
        let lexeme = self.lexemes.consume()?;
        let (line, column) = (lexeme.line, lexeme.column);

        let kind = match lexeme.text {
            Some(text) => self.classify(text, line, column)?,
            None => TokenKind::Eof,
        };

        Ok(Token { kind, line, column })
    }

    fn classify(&mut self, text: String, line: u32, column: u32) -> SyntaxResult<TokenKind> {
        let error = |kind| SyntaxError::new(kind, line, column);

        if let Some(quoted) = text.strip_prefix('"') {
            let body = quoted.strip_suffix('"').unwrap_or(quoted);
            return Ok(TokenKind::String(body.to_owned()));
        }

        if is_integer_literal(&text) {
            return text
                .parse()
                .map(TokenKind::Integer)
                .map_err(|_| error(SyntaxErrorKind::IntegerOverflow(text.clone())));
        }

        if is_float_literal(&text) {
            return text
                .parse()
                .map(TokenKind::Float)
                .map_err(|_| error(SyntaxErrorKind::UnknownToken(text.clone())));
        }

        match text.as_str() {
            "WIN" => return Ok(TokenKind::Bool(true)),
            "FAIL" => return Ok(TokenKind::Bool(false)),
            "!" => return Ok(TokenKind::Bang),
            "\n" => return Ok(TokenKind::Newline),
            _ => {}
        }

        if let Some((keyword, extra_words)) = self.match_keyword(&text)? {
            for _ in 0..extra_words {
                self.lexemes.consume()?;
            }

            return Ok(TokenKind::Keyword(keyword));
        }

        if is_identifier(&text) {
            Ok(TokenKind::Identifier(text))
        } else {
            Err(error(SyntaxErrorKind::UnknownToken(text)))
        }
    }

    /// Finds the longest keyword starting with `first`, peeking at the
    /// following lexemes as far as the trie allows. Returns the keyword and
    /// how many lexemes after `first` it spans.
    fn match_keyword(&mut self, first: &str) -> SyntaxResult<Option<(Keyword, usize)>> {
        let Some(mut node) = KeywordTrie::get().child(first) else {
            return Ok(None);
        };

        let mut best = node.keyword().map(|kw| (kw, 0));
        let mut depth = 0;

        while !node.is_leaf() {
            let lexeme = self.lexemes.peek()?;
            let Some(next) = lexeme.text.as_deref().and_then(|word| node.child(word)) else {
                break;
            };

            node = next;
            depth += 1;

            if let Some(kw) = node.keyword() {
                best = Some((kw, depth));
            }
        }

        self.lexemes.reset_peek();

        Ok(best)
    }
}

impl<R: BufRead> Produce for Tokenizer<R> {
    type Item = Token;
    type Error = SyntaxError;

    fn produce(&mut self) -> SyntaxResult<Token> {
        self.next_token()
    }
}
