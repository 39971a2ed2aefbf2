//! Conversions between runtime types.
//!
//! Implicit casts happen whenever an operator or statement needs a value of a
//! particular type. They differ from explicit `MAEK`/`IS NOW A` casts only in
//! that NOOB may not be implicitly turned into anything but a TROOF.

use kitteh_frontend::ast::ValueType;
use kitteh_frontend::literal::{is_float_literal, is_integer_literal};

use crate::error::{EvalResult, RuntimeErrorKind};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastMode {
    Implicit,
    Explicit,
}

pub fn cast(value: Value, ty: ValueType, mode: CastMode) -> EvalResult<Value> {
    if value.ty() == ty {
        return Ok(value);
    }

    Ok(match ty {
        ValueType::Noob => Value::Noob,
        ValueType::Troof => Value::Troof(to_troof(&value)),
        ValueType::Numbr => Value::Numbr(to_numbr(&value, mode)?),
        ValueType::Numbar => Value::Numbar(to_numbar(&value, mode)?),
        ValueType::Yarn => Value::Yarn(to_yarn(&value, mode)?),
    })
}

pub fn to_troof(value: &Value) -> bool {
    match value {
        Value::Noob => false,
        Value::Troof(b) => *b,
        Value::Numbr(n) => *n != 0,
        Value::Numbar(n) => *n != 0.0,
        Value::Yarn(s) => !s.is_empty(),
    }
}

pub fn to_numbr(value: &Value, mode: CastMode) -> EvalResult<i64> {
    match value {
        Value::Noob => from_noob(ValueType::Numbr, mode).map(|()| 0),
        Value::Troof(b) => Ok(i64::from(*b)),
        Value::Numbr(n) => Ok(*n),
        Value::Numbar(n) => truncate(*n),
        Value::Yarn(s) if is_integer_literal(s) => {
            s.parse().map_err(|_| RuntimeErrorKind::IntegerOverflow)
        }
        Value::Yarn(s) => Err(RuntimeErrorKind::InvalidInteger(s.clone())),
    }
}

pub fn to_numbar(value: &Value, mode: CastMode) -> EvalResult<f64> {
    match value {
        Value::Noob => from_noob(ValueType::Numbar, mode).map(|()| 0.0),
        Value::Troof(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Numbr(n) => Ok(*n as f64),
        Value::Numbar(n) => Ok(*n),
        Value::Yarn(s) if is_float_literal(s) => s
            .parse()
            .map_err(|_| RuntimeErrorKind::InvalidFloat(s.clone())),
        Value::Yarn(s) => Err(RuntimeErrorKind::InvalidFloat(s.clone())),
    }
}

pub fn to_yarn(value: &Value, mode: CastMode) -> EvalResult<String> {
    match value {
        Value::Noob => from_noob(ValueType::Yarn, mode).map(|()| String::new()),
        Value::Troof(true) => Ok("WIN".to_owned()),
        Value::Troof(false) => Ok("FAIL".to_owned()),
        Value::Numbr(n) => Ok(n.to_string()),
        Value::Numbar(n) => Ok(format_numbar(*n)),
        Value::Yarn(s) => Ok(s.clone()),
    }
}

/// Whether arithmetic involving this value is done on NUMBARs.
pub fn is_numbar_like(value: &Value) -> bool {
    match value {
        Value::Numbar(_) => true,
        Value::Yarn(s) => is_float_literal(s),
        _ => false,
    }
}

fn from_noob(ty: ValueType, mode: CastMode) -> EvalResult<()> {
    match mode {
        CastMode::Implicit => Err(RuntimeErrorKind::IllegalNoobCast(ty)),
        CastMode::Explicit => Ok(()),
    }
}

fn truncate(n: f64) -> EvalResult<i64> {
    let n = n.trunc();

    // i64::MAX rounds up to 2^63 as a float, so that bound is exclusive
    if n.is_nan() || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return Err(RuntimeErrorKind::IntegerOverflow);
    }

    Ok(n as i64)
}

/// Truncates to two decimal places. Whole numbers keep a single `.0`.
fn format_numbar(n: f64) -> String {
    let n = (n * 100.0).trunc() / 100.0;
    // no negative zero
    let n = if n == 0.0 { 0.0 } else { n };

    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}
