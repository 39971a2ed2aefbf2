use std::io::{BufRead, Write};

use kitteh_frontend::ast::*;
use kitteh_frontend::literal::is_identifier;

use super::Interpreter;
use crate::cast::{self, CastMode};
use crate::error::{EvalResult, RuntimeErrorKind};
use crate::value::Value;

impl<I: BufRead, O: Write> Interpreter<I, O> {
    pub(super) fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs)?;
                let rhs = self.eval_expr(rhs)?;

                if op.is_arithmetic() {
                    eval_arithmetic(*op, lhs, rhs)
                } else if op.is_logical() {
                    Ok(eval_logical(*op, &lhs, &rhs))
                } else {
                    eval_equality(*op, &lhs, &rhs)
                }
            }

            Expr::Cast { expr, ty } => {
                let value = self.eval_expr(expr)?;
                cast::cast(value, *ty, CastMode::Explicit)
            }

            Expr::Constant(Constant::String(s)) => Ok(Value::Yarn(self.interpolate(s)?)),
            Expr::Constant(constant) => Ok(Value::from(constant)),

            Expr::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<EvalResult<Vec<_>>>()?;

                self.call_function(name, args)
            }

            Expr::Variable(name) => self.scope.get(name).cloned(),

            Expr::Nary { op, operands } => self.eval_nary(*op, operands),

            Expr::Unary {
                op: UnOp::Not,
                expr,
            } => {
                let value = self.eval_expr(expr)?;
                Ok(Value::Troof(!cast::to_troof(&value)))
            }
        }
    }

    fn eval_nary(&mut self, op: NaryOp, operands: &[Expr]) -> EvalResult<Value> {
        match op {
            NaryOp::AllOf => {
                for operand in operands {
                    let value = self.eval_expr(operand)?;
                    if !cast::to_troof(&value) {
                        return Ok(Value::Troof(false));
                    }
                }

                Ok(Value::Troof(true))
            }

            NaryOp::AnyOf => {
                for operand in operands {
                    let value = self.eval_expr(operand)?;
                    if cast::to_troof(&value) {
                        return Ok(Value::Troof(true));
                    }
                }

                Ok(Value::Troof(false))
            }

            NaryOp::Smoosh => {
                let mut s = String::new();
                for operand in operands {
                    let value = self.eval_expr(operand)?;
                    s.push_str(&cast::to_yarn(&value, CastMode::Implicit)?);
                }

                Ok(Value::Yarn(s))
            }
        }
    }

    /// Replaces every `:{name}` in a string constant with the variable's value.
    fn interpolate(&self, s: &str) -> EvalResult<String> {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;

        while let Some(start) = rest.find(":{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find('}') {
                Some(end) if is_identifier(&after[..end]) => {
                    let value = self.scope.get(&after[..end])?;
                    out.push_str(&cast::to_yarn(value, CastMode::Explicit)?);
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push_str(":{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Works on NUMBARs if either side is one (or a YARN that reads as one),
/// otherwise on NUMBRs.
pub(super) fn eval_arithmetic(op: BinOp, lhs: Value, rhs: Value) -> EvalResult<Value> {
    if cast::is_numbar_like(&lhs) || cast::is_numbar_like(&rhs) {
        let lhs = cast::to_numbar(&lhs, CastMode::Implicit)?;
        let rhs = cast::to_numbar(&rhs, CastMode::Implicit)?;

        let n = match op {
            BinOp::Sum => lhs + rhs,
            BinOp::Diff => lhs - rhs,
            BinOp::Produkt => lhs * rhs,
            BinOp::Quoshunt => lhs / rhs,
            BinOp::Mod => lhs % rhs,
            BinOp::Biggr => lhs.max(rhs),
            BinOp::Smallr => lhs.min(rhs),
            _ => unreachable!("`{op:?}` is not arithmetic"),
        };

        return Ok(Value::Numbar(n));
    }

    let lhs = cast::to_numbr(&lhs, CastMode::Implicit)?;
    let rhs = cast::to_numbr(&rhs, CastMode::Implicit)?;

    if rhs == 0 && matches!(op, BinOp::Quoshunt | BinOp::Mod) {
        return Err(RuntimeErrorKind::DivisionByZero);
    }

    let n = match op {
        BinOp::Sum => lhs.checked_add(rhs),
        BinOp::Diff => lhs.checked_sub(rhs),
        BinOp::Produkt => lhs.checked_mul(rhs),
        BinOp::Quoshunt => lhs.checked_div(rhs),
        BinOp::Mod => lhs.checked_rem(rhs),
        BinOp::Biggr => Some(lhs.max(rhs)),
        BinOp::Smallr => Some(lhs.min(rhs)),
        _ => unreachable!("`{op:?}` is not arithmetic"),
    };

    n.map(Value::Numbr).ok_or(RuntimeErrorKind::IntegerOverflow)
}

fn eval_logical(op: BinOp, lhs: &Value, rhs: &Value) -> Value {
    let lhs = cast::to_troof(lhs);
    let rhs = cast::to_troof(rhs);

    Value::Troof(match op {
        BinOp::Both => lhs && rhs,
        BinOp::Either => lhs || rhs,
        BinOp::Won => lhs ^ rhs,
        _ => unreachable!("`{op:?}` is not logical"),
    })
}

/// Operands must have the same type, except that NUMBRs and NUMBARs compare
/// as NUMBARs.
fn eval_equality(op: BinOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let same = match (lhs, rhs) {
        (Value::Numbr(l), Value::Numbar(r)) => *l as f64 == *r,
        (Value::Numbar(l), Value::Numbr(r)) => *l == *r as f64,
        _ if lhs.ty() != rhs.ty() => {
            return Err(RuntimeErrorKind::OperandTypeMismatch {
                lhs: lhs.ty(),
                rhs: rhs.ty(),
            });
        }
        _ => lhs == rhs,
    };

    Ok(Value::Troof(match op {
        BinOp::BothSaem => same,
        BinOp::Diffrint => !same,
        _ => unreachable!("`{op:?}` is not a comparison"),
    }))
}
