use std::io::{BufRead, Write};

use kitteh_frontend::ast::*;

use super::expr::eval_arithmetic;
use super::{Flow, Interpreter};
use crate::cast::{self, CastMode};
use crate::error::{EvalResult, RuntimeErrorKind};
use crate::value::Value;

impl<I: BufRead, O: Write> Interpreter<I, O> {
    pub(super) fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match &stmt.kind {
            StmtKind::Assign { target, expr } => {
                self.scope.get(target)?;
                let value = self.eval_expr(expr)?;
                self.scope.assign(target, value)?;
            }

            StmtKind::Break => return Ok(Flow::Broke),

            StmtKind::Cast { target, ty } => {
                let value = self.scope.get(target)?.clone();
                let value = cast::cast(value, *ty, CastMode::Explicit)?;
                self.scope.assign(target, value)?;
            }

            StmtKind::Declare { name, init } => {
                self.scope.declare(name, Value::Noob)?;

                if let Some(init) = init {
                    let value = self.eval_expr(init)?;
                    self.scope.assign(name, value)?;
                }
            }

            StmtKind::Condition {
                then,
                else_ifs,
                else_,
            } => return self.exec_condition(then, else_ifs, else_.as_ref()),

            StmtKind::FuncDef(def) => self.define_function(def)?,

            StmtKind::Input { target } => {
                let line = self.read_line()?;
                self.scope.bind(target, Value::Yarn(line));
            }

            StmtKind::Loop(lp) => return self.exec_loop(lp),

            StmtKind::Print {
                exprs,
                suppress_newline,
            } => {
                let mut text = String::new();
                for expr in exprs {
                    let value = self.eval_expr(expr)?;
                    text.push_str(&cast::to_yarn(&value, CastMode::Implicit)?);
                }

                if !suppress_newline {
                    text.push('\n');
                }

                self.output.write_all(text.as_bytes())?;
                self.output.flush()?;
            }

            StmtKind::Return(expr) => return Ok(Flow::Returned(self.eval_expr(expr)?)),

            StmtKind::Switch { cases, default } => {
                return self.exec_switch(cases, default.as_ref());
            }

            StmtKind::Expr(expr) => {
                let value = self.eval_expr(expr)?;
                self.scope.set_it(value);
            }
        }

        Ok(Flow::Completed)
    }

    fn exec_condition(
        &mut self,
        then: &Block,
        else_ifs: &[ElseIf],
        else_: Option<&Block>,
    ) -> EvalResult<Flow> {
        if cast::to_troof(self.scope.it()) {
            return self.exec_block(then);
        }

        for else_if in else_ifs {
            let cond = self.eval_expr(&else_if.cond)?;
            if cast::to_troof(&cond) {
                return self.exec_block(&else_if.block);
            }
        }

        match else_ {
            Some(block) => self.exec_block(block),
            None => Ok(Flow::Completed),
        }
    }

    /// Runs from the first case equal to `IT` and falls through the rest
    /// until a break.
    fn exec_switch(&mut self, cases: &[Case], default: Option<&Block>) -> EvalResult<Flow> {
        let mut literals: Vec<Value> = Vec::with_capacity(cases.len());
        for case in cases {
            let literal = self.eval_expr(&case.literal)?;

            if literals.contains(&literal) {
                return Err(RuntimeErrorKind::DuplicateCaseLiteral(literal));
            }

            literals.push(literal);
        }

        let it = self.scope.it();
        let bodies: Vec<&Block> = match literals.iter().position(|literal| literal == it) {
            Some(start) => cases[start..].iter().map(|case| &case.body).collect(),
            None => default.into_iter().collect(),
        };

        for body in bodies {
            match self.exec_block(body)? {
                Flow::Completed => {}
                // a break only leaves the switch
                Flow::Broke => return Ok(Flow::Completed),
                flow @ Flow::Returned(_) => return Ok(flow),
            }
        }

        Ok(Flow::Completed)
    }

    fn exec_loop(&mut self, lp: &Loop) -> EvalResult<Flow> {
        let Some(update) = &lp.update else {
            return self.run_loop(lp);
        };

        // the counter shadows any variable of the same name until the loop ends
        let saved = match update.op {
            UpdateOp::Increment | UpdateOp::Decrement => {
                self.scope.bind(&update.counter, Value::Numbr(0))
            }
            UpdateOp::Call(_) => match self.scope.get(&update.counter) {
                Ok(value) => Some(value.clone()),
                Err(_) => self.scope.bind(&update.counter, Value::Numbr(0)),
            },
        };

        let flow = self.run_loop(lp);

        match saved {
            Some(value) => self.scope.bind(&update.counter, value),
            None => self.scope.unbind(&update.counter),
        };

        flow
    }

    fn run_loop(&mut self, lp: &Loop) -> EvalResult<Flow> {
        loop {
            if let Some(guard) = &lp.guard {
                let cond = self.eval_expr(&guard.cond)?;
                let cond = cast::to_troof(&cond);

                let keep_going = match guard.kind {
                    GuardKind::While => cond,
                    GuardKind::Until => !cond,
                };

                if !keep_going {
                    return Ok(Flow::Completed);
                }
            }

            match self.exec_block(&lp.body)? {
                Flow::Completed => {}
                Flow::Broke => return Ok(Flow::Completed),
                flow @ Flow::Returned(_) => return Ok(flow),
            }

            if let Some(update) = &lp.update {
                self.update_counter(update)?;
            }
        }
    }

    fn update_counter(&mut self, update: &LoopUpdate) -> EvalResult<()> {
        let counter = self.scope.get(&update.counter)?.clone();

        let value = match &update.op {
            UpdateOp::Increment => eval_arithmetic(BinOp::Sum, counter, Value::Numbr(1))?,
            UpdateOp::Decrement => eval_arithmetic(BinOp::Diff, counter, Value::Numbr(1))?,
            UpdateOp::Call(name) => self.call_function(name, vec![counter])?,
        };

        self.scope.assign(&update.counter, value)
    }

    /// Reads one line of input as written, terminator included. End of input
    /// reads as an empty line.
    fn read_line(&mut self) -> EvalResult<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;

        Ok(line)
    }
}
