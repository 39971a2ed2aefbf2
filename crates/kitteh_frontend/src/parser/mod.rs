#[cfg(test)]
mod tests;

mod expr;
mod functions;
mod stmt;

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use kitteh_utils::lookahead::Lookahead;

use crate::ast::*;
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::lexer::LexerWarning;
use crate::token::{Keyword, Token, TokenKind, TokenTag};
use crate::tokenizer::Tokenizer;

/// Function name to formal parameter names.
pub type FunctionTable = HashMap<String, Vec<String>>;

pub struct Parser<R: BufRead> {
    tokens: Lookahead<Tokenizer<R>>,
    functions: FunctionTable,

    /// Functions whose headers this parser's first pass has already read.
    registered: HashSet<String>,
}

/// What the statement at the front of the stream turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StmtStart {
    Cast,
    Print,
    Input,
    Assign,
    Declare,
    Condition,
    Switch,
    Break,
    Return,
    Loop,
    FuncDef,
    Expr,
}

impl<R: BufRead> Parser<R> {
    pub fn new(tokenizer: Tokenizer<R>) -> Self {
        Self {
            tokens: Lookahead::new(tokenizer),
            functions: FunctionTable::new(),
            registered: HashSet::new(),
        }
    }

    pub fn from_reader(input: R) -> Self {
        Self::new(Tokenizer::from_reader(input))
    }

    /// Starts from functions known from an earlier parse.
    #[must_use]
    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    pub fn into_functions(self) -> FunctionTable {
        self.functions
    }

    pub fn take_warnings(&mut self) -> Vec<LexerWarning> {
        self.tokens.producer_mut().take_warnings()
    }

    /// Parses a whole `HAI ... KTHXBYE` program, registering every function
    /// header first so calls can come before definitions.
    pub fn parse_program(&mut self) -> SyntaxResult<Program> {
        self.register_functions()?;

        self.skip_newlines()?;
        self.expect(TokenTag::Keyword(Keyword::Hai))?;

        let version = match self.next()? {
            Token {
                kind: TokenKind::Float(version),
                ..
            } => version,
            Token {
                kind: TokenKind::Integer(version),
                ..
            } => version as f64,
            other => return Err(unexpected(&other, "a version number")),
        };

        self.expect(TokenTag::Newline)?;
        let block = self.parse_block()?;
        self.expect(TokenTag::Keyword(Keyword::Kthxbye))?;

        self.skip_newlines()?;
        self.expect(TokenTag::Eof)?;

        Ok(Program { version, block })
    }

    /// Parses the next statement outside of any program frame, or returns
    /// `None` at the end of input.
    pub fn parse_statement(&mut self) -> SyntaxResult<Option<Stmt>> {
        self.skip_newlines()?;

        if self.next_is(TokenTag::Eof)? {
            return Ok(None);
        }

        match self.next_stmt()? {
            Some(start) => self.parse_stmt(start).map(Some),
            None => Err(unexpected(&self.peek()?, "a statement")),
        }
    }

    fn parse_block(&mut self) -> SyntaxResult<Block> {
        let mut stmts = vec![];

        loop {
            self.skip_newlines()?;

            let Some(start) = self.next_stmt()? else {
                break;
            };

            stmts.push(self.parse_stmt(start)?);
        }

        Ok(Block { stmts })
    }

    fn next_stmt(&mut self) -> SyntaxResult<Option<StmtStart>> {
        use Keyword as K;

        if self.try_tags(&[TokenTag::Identifier, TokenTag::Keyword(K::IsNowA)])? {
            return Ok(Some(StmtStart::Cast));
        }

        let start = match self.peek()?.tag() {
            TokenTag::Keyword(K::Visible) => StmtStart::Print,
            TokenTag::Keyword(K::Gimmeh) => StmtStart::Input,
            TokenTag::Identifier if self.try_tags(&[TokenTag::Identifier, TokenTag::Keyword(K::R)])? => {
                StmtStart::Assign
            }
            TokenTag::Keyword(K::IHasA) => StmtStart::Declare,
            TokenTag::Keyword(K::ORly) => StmtStart::Condition,
            TokenTag::Keyword(K::Wtf) => StmtStart::Switch,
            TokenTag::Keyword(K::Gtfo) => StmtStart::Break,
            TokenTag::Keyword(K::FoundYr) => StmtStart::Return,
            TokenTag::Keyword(K::ImInYr) => StmtStart::Loop,
            TokenTag::Keyword(K::HowDuzI) => StmtStart::FuncDef,
            _ => return Ok(self.next_expr()?.map(|_| StmtStart::Expr)),
        };

        Ok(Some(start))
    }

    fn parse_stmt(&mut self, start: StmtStart) -> SyntaxResult<Stmt> {
        let line = self.peek()?.line;

        let kind = match start {
            StmtStart::Cast => self.parse_cast_stmt()?,
            StmtStart::Print => self.parse_print_stmt()?,
            StmtStart::Input => self.parse_input_stmt()?,
            StmtStart::Assign => self.parse_assign_stmt()?,
            StmtStart::Declare => self.parse_declare_stmt()?,
            StmtStart::Condition => self.parse_condition_stmt()?,
            StmtStart::Switch => self.parse_switch_stmt()?,
            StmtStart::Break => self.parse_break_stmt()?,
            StmtStart::Return => self.parse_return_stmt()?,
            StmtStart::Loop => self.parse_loop_stmt()?,
            StmtStart::FuncDef => self.parse_func_def_stmt()?,
            StmtStart::Expr => self.parse_expr_stmt()?,
        };

        Ok(Stmt::new(kind, line))
    }

    fn parse_type(&mut self) -> SyntaxResult<ValueType> {
        let token = self.next()?;

        let ty = match token.kind {
            TokenKind::Keyword(Keyword::Noob) => ValueType::Noob,
            TokenKind::Keyword(Keyword::Troof) => ValueType::Troof,
            TokenKind::Keyword(Keyword::Numbr) => ValueType::Numbr,
            TokenKind::Keyword(Keyword::Numbar) => ValueType::Numbar,
            TokenKind::Keyword(Keyword::Yarn) => ValueType::Yarn,
            _ => return Err(unexpected(&token, "a type")),
        };

        Ok(ty)
    }

    fn skip_newlines(&mut self) -> SyntaxResult<()> {
        while self.eat(TokenTag::Newline)? {}
        Ok(())
    }

    /// Peeks at the next token without moving the cursor.
    fn peek(&mut self) -> SyntaxResult<Token> {
        self.tokens.save();
        let token = self.tokens.peek();
        self.tokens.restore();

        token
    }

    fn next_is(&mut self, tag: TokenTag) -> SyntaxResult<bool> {
        Ok(self.peek()?.tag() == tag)
    }

    /// Checks that the upcoming tokens have the given tags, in order,
    /// without moving the cursor.
    fn try_tags(&mut self, tags: &[TokenTag]) -> SyntaxResult<bool> {
        self.tokens.save();

        let mut matched = true;
        for &tag in tags {
            match self.tokens.peek() {
                Ok(token) if token.tag() == tag => {}
                Ok(_) => {
                    matched = false;
                    break;
                }
                Err(err) => {
                    self.tokens.restore();
                    return Err(err);
                }
            }
        }

        self.tokens.restore();

        Ok(matched)
    }

    fn next(&mut self) -> SyntaxResult<Token> {
        self.tokens.consume()
    }

    fn eat(&mut self, tag: TokenTag) -> SyntaxResult<bool> {
        if self.next_is(tag)? {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, tag: TokenTag) -> SyntaxResult<Token> {
        let token = self.next()?;

        if token.tag() == tag {
            Ok(token)
        } else {
            Err(unexpected(&token, tag.token_name()))
        }
    }

    fn expect_identifier(&mut self) -> SyntaxResult<(String, Token)> {
        let token = self.next()?;

        match &token.kind {
            TokenKind::Identifier(name) => Ok((name.clone(), token)),
            _ => Err(unexpected(&token, "an identifier")),
        }
    }
}

fn unexpected(token: &Token, expected: impl Into<String>) -> SyntaxError {
    let expected = expected.into();

    let kind = match &token.kind {
        TokenKind::Eof => SyntaxErrorKind::UnexpectedEof { expected },
        found => SyntaxErrorKind::UnexpectedToken {
            expected,
            found: found.token_name(),
        },
    };

    SyntaxError::new(kind, token.line, token.column)
}
