//! Session builtins: list_env, exit
//!
//! Both take a single empty S-Expression, the conventional way to call
//! a zero-argument function here: `(list_env ())`, `(exit ())`.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::{Kind, Value};
use std::rc::Rc;

use super::{add_builtin, expect_arity};

fn expect_unit(func: &str, args: &[Value]) -> Result<(), LispError> {
    expect_arity(func, args, 1)?;
    match &args[0] {
        Value::SExpr(items) if items.is_empty() => Ok(()),
        Value::SExpr(items) => Err(LispError::ExpectedEmpty {
            func: func.to_string(),
            count: items.len(),
        }),
        other => Err(LispError::bad_type(func, 0, other.kind(), Kind::SExpr)),
    }
}

/// Returns the symbols of the current environment (parents excluded)
/// as a Q-Expression, in binding order.
pub fn builtin_list_env(_: &Interp, env: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_unit("list_env", &args)?;
    Ok(Value::QExpr(
        env.symbols().into_iter().map(Value::Sym).collect(),
    ))
}

/// Raises the quit flag; the REPL observes it and ends the session.
pub fn builtin_exit(_: &Interp, env: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_unit("exit", &args)?;
    env.request_quit();
    Ok(Value::Sym("Exiting Prompt".to_string()))
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "list_env", builtin_list_env);
    add_builtin(env, "exit", builtin_exit);
}
