use std::io::BufRead;

use super::{unexpected, Parser};
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::token::{Keyword, TokenKind, TokenTag};

impl<R: BufRead> Parser<R> {
    /// Scans the whole token stream for function headers and records each
    /// function's parameters, without consuming anything.
    pub fn register_functions(&mut self) -> SyntaxResult<()> {
        self.tokens.reset_peek();

        loop {
            match self.tokens.peek()?.tag() {
                TokenTag::Eof => break,
                TokenTag::Keyword(Keyword::HowDuzI) => self.register_function_header()?,
                _ => {}
            }
        }

        self.tokens.reset_peek();

        Ok(())
    }

    // HOW DUZ I <name> [YR <param> (AN YR <param>)*] <newline>
    fn register_function_header(&mut self) -> SyntaxResult<()> {
        let name_token = self.tokens.peek()?;
        let TokenKind::Identifier(name) = &name_token.kind else {
            return Err(unexpected(&name_token, "a function name"));
        };

        let mut params = vec![];
        let mut token = self.tokens.peek()?;

        if token.tag() == TokenTag::Keyword(Keyword::Yr) {
            loop {
                let param = self.tokens.peek()?;
                match param.kind {
                    TokenKind::Identifier(ident) => params.push(ident),
                    _ => return Err(unexpected(&param, "a parameter name")),
                }

                token = self.tokens.peek()?;
                if token.tag() != TokenTag::Keyword(Keyword::AnYr) {
                    break;
                }
            }
        }

        if token.tag() != TokenTag::Newline {
            return Err(unexpected(&token, "newline"));
        }

        if self.functions.contains_key(name) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::DuplicateFunction(name.clone()),
                name_token.line,
                name_token.column,
            ));
        }

        self.functions.insert(name.clone(), params);
        self.registered.insert(name.clone());

        Ok(())
    }
}
