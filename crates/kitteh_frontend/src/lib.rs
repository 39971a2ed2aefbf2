#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;
mod tokenizer;

pub mod ast;
pub mod error;
pub mod literal;
pub mod token;
pub mod unicode;

use std::io::BufRead;

pub use error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
pub use lexer::{Lexeme, Lexer, LexerWarning, LexerWarningKind};
pub use parser::{FunctionTable, Parser};
pub use tokenizer::Tokenizer;
pub use unicode::{CharNames, NoCharNames};

use ast::Program;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Parses a complete program, returning it along with any lexer warnings.
pub fn parse_program<R: BufRead>(input: R) -> (SyntaxResult<Program>, Vec<LexerWarning>) {
    let mut parser = Parser::from_reader(input);
    let program = parser.parse_program();

    (program, parser.take_warnings())
}
