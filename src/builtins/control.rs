//! Control flow: if
//!
//! `if` takes a condition and two Q-Expression branches. The chosen
//! branch is retyped into an S-Expression and evaluated; the other is
//! dropped unevaluated.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::{Kind, Value};
use std::rc::Rc;

use super::{add_builtin, expect_arity, expect_kind};

pub fn builtin_if(interp: &Interp, env: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("if", &args, 3)?;

    // Numeric conditions coerce to booleans; anything else must
    // already be a boolean.
    let truthy = match &args[0] {
        Value::Bool(b) => *b,
        Value::Num(n) => *n != 0,
        Value::Dec(d) => *d != 0.0,
        other => return Err(LispError::Condition { got: other.kind() }),
    };

    expect_kind("if", &args, 1, Kind::QExpr)?;
    expect_kind("if", &args, 2, Kind::QExpr)?;

    let index = if truthy { 1 } else { 2 };
    match args.swap_remove(index) {
        Value::QExpr(items) => Ok(interp.eval(env, Value::SExpr(items))),
        other => Err(LispError::bad_type("if", index, other.kind(), Kind::QExpr)),
    }
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "if", builtin_if);
}
