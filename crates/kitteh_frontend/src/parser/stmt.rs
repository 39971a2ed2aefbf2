use std::io::BufRead;

use super::{unexpected, Parser};
use crate::ast::*;
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::token::{Keyword, TokenKind, TokenTag};

const NEWLINE: TokenTag = TokenTag::Newline;

fn kw(keyword: Keyword) -> TokenTag {
    TokenTag::Keyword(keyword)
}

impl<R: BufRead> Parser<R> {
    // <ident> IS NOW A <type>
    pub(super) fn parse_cast_stmt(&mut self) -> SyntaxResult<StmtKind> {
        let (target, _) = self.expect_identifier()?;
        self.expect(kw(Keyword::IsNowA))?;
        let ty = self.parse_type()?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Cast { target, ty })
    }

    // VISIBLE <expr>+ [!]
    pub(super) fn parse_print_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::Visible))?;

        let mut exprs = vec![self.parse_expr()?];
        while let Some(start) = self.next_expr()? {
            exprs.push(self.parse_expr_from(start)?);
        }

        let suppress_newline = self.eat(TokenTag::Bang)?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Print {
            exprs,
            suppress_newline,
        })
    }

    // GIMMEH <ident>
    pub(super) fn parse_input_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::Gimmeh))?;
        let (target, _) = self.expect_identifier()?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Input { target })
    }

    // <ident> R <expr>
    pub(super) fn parse_assign_stmt(&mut self) -> SyntaxResult<StmtKind> {
        let (target, _) = self.expect_identifier()?;
        self.expect(kw(Keyword::R))?;
        let expr = self.parse_expr()?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Assign { target, expr })
    }

    // I HAS A <ident> [ITZ <expr>]
    pub(super) fn parse_declare_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::IHasA))?;
        let (name, _) = self.expect_identifier()?;

        let init = if self.eat(kw(Keyword::Itz))? {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(NEWLINE)?;

        Ok(StmtKind::Declare { name, init })
    }

    // O RLY? YA RLY <block> (MEBBE <expr> <block>)* [NO WAI <block>] OIC
    pub(super) fn parse_condition_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::ORly))?;
        self.expect(NEWLINE)?;
        self.expect(kw(Keyword::YaRly))?;
        self.expect(NEWLINE)?;

        let then = self.parse_block()?;

        let mut else_ifs = vec![];
        while self.eat(kw(Keyword::Mebbe))? {
            let cond = self.parse_expr()?;
            self.expect(NEWLINE)?;
            let block = self.parse_block()?;

            else_ifs.push(ElseIf { cond, block });
        }

        let else_ = if self.eat(kw(Keyword::NoWai))? {
            self.expect(NEWLINE)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect(kw(Keyword::Oic))?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Condition {
            then,
            else_ifs,
            else_,
        })
    }

    // WTF? (OMG <expr> <block>)+ [OMGWTF <block>] OIC
    pub(super) fn parse_switch_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::Wtf))?;
        self.expect(NEWLINE)?;

        let mut cases = vec![self.parse_case()?];
        while self.next_is(kw(Keyword::Omg))? {
            cases.push(self.parse_case()?);
        }

        let default = if self.eat(kw(Keyword::Omgwtf))? {
            self.expect(NEWLINE)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        self.expect(kw(Keyword::Oic))?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Switch { cases, default })
    }

    fn parse_case(&mut self) -> SyntaxResult<Case> {
        self.expect(kw(Keyword::Omg))?;
        let literal = self.parse_expr()?;
        self.expect(NEWLINE)?;
        let body = self.parse_block()?;

        Ok(Case { literal, body })
    }

    pub(super) fn parse_break_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::Gtfo))?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Break)
    }

    pub(super) fn parse_return_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::FoundYr))?;
        let expr = self.parse_expr()?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Return(expr))
    }

    // IM IN YR <label> [<op> YR <ident>] [TIL|WILE <expr>] <block> IM OUTTA YR <label>
    pub(super) fn parse_loop_stmt(&mut self) -> SyntaxResult<StmtKind> {
        let start = self.expect(kw(Keyword::ImInYr))?;
        let (label, _) = self.expect_identifier()?;

        let update = if self.loop_update_next()? {
            Some(self.parse_loop_update()?)
        } else {
            None
        };

        let guard = match self.peek()?.tag() {
            TokenTag::Keyword(Keyword::Til) => Some(GuardKind::Until),
            TokenTag::Keyword(Keyword::Wile) => Some(GuardKind::While),
            _ => None,
        };

        let guard = match guard {
            Some(kind) => {
                self.next()?;
                let cond = self.parse_expr()?;
                Some(LoopGuard { kind, cond })
            }
            None => None,
        };

        let body = self.parse_block()?;

        self.expect(kw(Keyword::ImOuttaYr))?;
        let (close, _) = self.expect_identifier()?;
        self.expect(NEWLINE)?;

        if label != close {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MismatchedLoopLabels { open: label, close },
                start.line,
                start.column,
            ));
        }

        Ok(StmtKind::Loop(Loop {
            label,
            update,
            guard,
            body,
        }))
    }

    fn loop_update_next(&mut self) -> SyntaxResult<bool> {
        let first = self.peek()?.tag();
        let is_op = matches!(
            first,
            TokenTag::Keyword(Keyword::Uppin | Keyword::Nerfin) | TokenTag::Identifier
        );

        Ok(is_op && self.try_tags(&[first, kw(Keyword::Yr)])?)
    }

    fn parse_loop_update(&mut self) -> SyntaxResult<LoopUpdate> {
        let token = self.next()?;

        let op = match token.kind {
            TokenKind::Keyword(Keyword::Uppin) => UpdateOp::Increment,
            TokenKind::Keyword(Keyword::Nerfin) => UpdateOp::Decrement,
            TokenKind::Identifier(ref name) => {
                // unknown functions are left for the interpreter to report
                if let Some(params) = self.functions.get(name) {
                    if params.len() != 1 {
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::WrongArgumentCount {
                                name: name.clone(),
                                expected: params.len(),
                                found: 1,
                            },
                            token.line,
                            token.column,
                        ));
                    }
                }

                UpdateOp::Call(name.clone())
            }
            _ => return Err(unexpected(&token, "`UPPIN`, `NERFIN` or a function name")),
        };

        self.expect(kw(Keyword::Yr))?;
        let (counter, _) = self.expect_identifier()?;

        Ok(LoopUpdate { op, counter })
    }

    // HOW DUZ I <name> [YR <param> (AN YR <param>)*] <block> IF U SAY SO
    pub(super) fn parse_func_def_stmt(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(kw(Keyword::HowDuzI))?;
        let (name, name_token) = self.expect_identifier()?;

        let registered = self
            .functions
            .get(&name)
            .filter(|_| self.registered.contains(&name))
            .cloned();

        let params = match registered {
            // already read by the first pass
            Some(params) => {
                self.skip_past_newline()?;
                params
            }

            None => {
                let mut params = vec![];

                if self.eat(kw(Keyword::Yr))? {
                    loop {
                        let (param, _) = self.expect_identifier()?;
                        params.push(param);

                        if !self.eat(kw(Keyword::AnYr))? {
                            break;
                        }
                    }
                }

                self.expect(NEWLINE)?;

                // known from an earlier parse, calls were parsed with that arity
                match self.functions.get(&name) {
                    Some(known) if *known != params => {
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::DuplicateFunction(name),
                            name_token.line,
                            name_token.column,
                        ));
                    }
                    Some(_) => {}
                    None => {
                        self.functions.insert(name.clone(), params.clone());
                    }
                }

                params
            }
        };

        let body = self.parse_block()?;

        self.expect(kw(Keyword::IfUSaySo))?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::FuncDef(FuncDef { name, params, body }))
    }

    fn skip_past_newline(&mut self) -> SyntaxResult<()> {
        loop {
            let token = self.next()?;
            match token.tag() {
                TokenTag::Newline => return Ok(()),
                TokenTag::Eof => return Err(unexpected(&token, "newline")),
                _ => {}
            }
        }
    }

    pub(super) fn parse_expr_stmt(&mut self) -> SyntaxResult<StmtKind> {
        let expr = self.parse_expr()?;
        self.expect(NEWLINE)?;

        Ok(StmtKind::Expr(expr))
    }
}
