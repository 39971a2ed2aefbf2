use std::io::BufRead;

use super::{unexpected, Parser};
use crate::ast::*;
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::token::{Keyword, TokenKind, TokenTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ExprStart {
    Cast,
    Constant,
    Identifier,
    Unary,
    Binary(BinOp),
    Nary(NaryOp),
}

impl<R: BufRead> Parser<R> {
    pub(super) fn next_expr(&mut self) -> SyntaxResult<Option<ExprStart>> {
        use Keyword as K;

        let start = match self.peek()?.tag() {
            TokenTag::Keyword(K::Maek) => ExprStart::Cast,

            TokenTag::Bool | TokenTag::Integer | TokenTag::Float | TokenTag::String => {
                ExprStart::Constant
            }

            TokenTag::Identifier => ExprStart::Identifier,

            TokenTag::Keyword(K::Not) => ExprStart::Unary,

            TokenTag::Keyword(K::SumOf) => ExprStart::Binary(BinOp::Sum),
            TokenTag::Keyword(K::DiffOf) => ExprStart::Binary(BinOp::Diff),
            TokenTag::Keyword(K::ProduktOf) => ExprStart::Binary(BinOp::Produkt),
            TokenTag::Keyword(K::QuoshuntOf) => ExprStart::Binary(BinOp::Quoshunt),
            TokenTag::Keyword(K::ModOf) => ExprStart::Binary(BinOp::Mod),
            TokenTag::Keyword(K::BiggrOf) => ExprStart::Binary(BinOp::Biggr),
            TokenTag::Keyword(K::SmallrOf) => ExprStart::Binary(BinOp::Smallr),
            TokenTag::Keyword(K::BothOf) => ExprStart::Binary(BinOp::Both),
            TokenTag::Keyword(K::EitherOf) => ExprStart::Binary(BinOp::Either),
            TokenTag::Keyword(K::WonOf) => ExprStart::Binary(BinOp::Won),
            TokenTag::Keyword(K::BothSaem) => ExprStart::Binary(BinOp::BothSaem),
            TokenTag::Keyword(K::Diffrint) => ExprStart::Binary(BinOp::Diffrint),

            TokenTag::Keyword(K::AllOf) => ExprStart::Nary(NaryOp::AllOf),
            TokenTag::Keyword(K::AnyOf) => ExprStart::Nary(NaryOp::AnyOf),
            TokenTag::Keyword(K::Smoosh) => ExprStart::Nary(NaryOp::Smoosh),

            _ => return Ok(None),
        };

        Ok(Some(start))
    }

    pub(super) fn parse_expr(&mut self) -> SyntaxResult<Expr> {
        match self.next_expr()? {
            Some(start) => self.parse_expr_from(start),
            None => Err(unexpected(&self.peek()?, "an expression")),
        }
    }

    pub(super) fn parse_expr_from(&mut self, start: ExprStart) -> SyntaxResult<Expr> {
        match start {
            ExprStart::Cast => self.parse_cast_expr(),
            ExprStart::Constant => self.parse_constant_expr(),
            ExprStart::Identifier => self.parse_identifier_expr(),
            ExprStart::Unary => {
                self.next()?;
                let expr = self.parse_expr()?;

                Ok(Expr::Unary {
                    op: UnOp::Not,
                    expr: Box::new(expr),
                })
            }
            ExprStart::Binary(op) => self.parse_binary_expr(op),
            ExprStart::Nary(op) => self.parse_nary_expr(op),
        }
    }

    // MAEK <expr> A <type>
    fn parse_cast_expr(&mut self) -> SyntaxResult<Expr> {
        self.expect(TokenTag::Keyword(Keyword::Maek))?;
        let expr = self.parse_expr()?;
        self.expect(TokenTag::Keyword(Keyword::A))?;
        let ty = self.parse_type()?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            ty,
        })
    }

    fn parse_constant_expr(&mut self) -> SyntaxResult<Expr> {
        let token = self.next()?;

        let constant = match token.kind {
            TokenKind::Bool(b) => Constant::Bool(b),
            TokenKind::Integer(n) => Constant::Integer(n),
            TokenKind::Float(n) => Constant::Float(n),
            TokenKind::String(s) => Constant::String(s),
            _ => return Err(unexpected(&token, "a literal")),
        };

        Ok(Expr::Constant(constant))
    }

    /// A registered function name starts a call taking exactly as many
    /// arguments as the function has parameters. Anything else is a variable.
    fn parse_identifier_expr(&mut self) -> SyntaxResult<Expr> {
        let (name, token) = self.expect_identifier()?;

        let Some(arity) = self.functions.get(&name).map(Vec::len) else {
            return Ok(Expr::Variable(name));
        };

        let mut args = Vec::with_capacity(arity);
        for found in 0..arity {
            let Some(start) = self.next_expr()? else {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::WrongArgumentCount {
                        name,
                        expected: arity,
                        found,
                    },
                    token.line,
                    token.column,
                ));
            };

            args.push(self.parse_expr_from(start)?);
        }

        Ok(Expr::Call { name, args })
    }

    // <op> <expr> [AN] <expr>
    fn parse_binary_expr(&mut self, op: BinOp) -> SyntaxResult<Expr> {
        self.next()?;

        let lhs = self.parse_expr()?;
        self.eat(TokenTag::Keyword(Keyword::An))?;
        let rhs = self.parse_expr()?;

        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    // <op> <expr> ([AN] <expr>)* [MKAY]
    fn parse_nary_expr(&mut self, op: NaryOp) -> SyntaxResult<Expr> {
        self.next()?;

        let mut operands = vec![self.parse_expr()?];
        loop {
            self.eat(TokenTag::Keyword(Keyword::An))?;

            match self.next_expr()? {
                Some(start) => operands.push(self.parse_expr_from(start)?),
                None => break,
            }
        }

        // the end of the line also ends the operand list, but stays unconsumed
        self.eat(TokenTag::Keyword(Keyword::Mkay))?;

        Ok(Expr::Nary { op, operands })
    }
}
