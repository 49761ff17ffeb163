//! Boolean operations: ||, &&, !
//!
//! Operands go through the shared numeric promotion, so booleans and
//! numbers mix freely; nonzero counts as true. The connectives are
//! binary, negation is unary, and all three produce booleans.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::Value;
use std::rc::Rc;

use super::math::{promote, Operands};
use super::{add_builtin, expect_arity};

fn truths(func: &str, args: &[Value]) -> Result<Vec<bool>, LispError> {
    Ok(match promote(func, args)? {
        Operands::Ints(v) => v.into_iter().map(|n| n != 0).collect(),
        Operands::Floats(v) => v.into_iter().map(|d| d != 0.0).collect(),
    })
}

pub fn builtin_or(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("||", &args, 2)?;
    let v = truths("||", &args)?;
    Ok(Value::Bool(v[0] || v[1]))
}

pub fn builtin_and(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("&&", &args, 2)?;
    let v = truths("&&", &args)?;
    Ok(Value::Bool(v[0] && v[1]))
}

pub fn builtin_not(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("!", &args, 1)?;
    let v = truths("!", &args)?;
    Ok(Value::Bool(!v[0]))
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "||", builtin_or);
    add_builtin(env, "&&", builtin_and);
    add_builtin(env, "!", builtin_not);
}
