//! Definition builtins: def, =, \, fun
//!
//! `def` binds in the root environment, `=` in the current one; both
//! take a Q-Expression of symbols and matching values. `\` constructs
//! a lambda from a formals Q-Expression and a body Q-Expression, and
//! `fun` sugars `def` + `\` for named functions.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::{Fun, Kind, Lambda, Value};
use std::rc::Rc;

use super::{add_builtin, expect_arity};

pub fn builtin_lambda(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("\\", &args, 2)?;
    let formals = match args.remove(0) {
        Value::QExpr(items) => items,
        other => return Err(LispError::bad_type("\\", 0, other.kind(), Kind::QExpr)),
    };
    let body = match args.remove(0) {
        Value::QExpr(items) => items,
        other => return Err(LispError::bad_type("\\", 1, other.kind(), Kind::QExpr)),
    };
    for formal in &formals {
        if !matches!(formal, Value::Sym(_)) {
            return Err(LispError::NonSymbolFormal {
                got: formal.kind(),
            });
        }
    }
    Ok(Value::Fun(Fun::Lambda(Lambda {
        formals,
        body,
        env: Env::new(),
    })))
}

fn assign(env: &Rc<Env>, func: &str, mut args: Vec<Value>, global: bool) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::bad_arity(func, 0, 2));
    }
    let symbols = match args.remove(0) {
        Value::QExpr(items) => items,
        other => return Err(LispError::bad_type(func, 0, other.kind(), Kind::QExpr)),
    };

    let mut names = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        match symbol {
            Value::Sym(name) => names.push(name.clone()),
            other => {
                return Err(LispError::NonSymbolTarget {
                    func: func.to_string(),
                    got: other.kind(),
                })
            }
        }
    }

    if names.len() != args.len() {
        return Err(LispError::TargetCountMismatch {
            func: func.to_string(),
            symbols: names.len(),
            values: args.len(),
        });
    }

    for (name, value) in names.into_iter().zip(args) {
        if global {
            env.def(&name, value);
        } else {
            env.put(&name, value);
        }
    }

    Ok(Value::SExpr(Vec::new()))
}

pub fn builtin_def(_: &Interp, env: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    assign(env, "def", args, true)
}

pub fn builtin_put(_: &Interp, env: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    assign(env, "=", args, false)
}

/// (fun {name formals...} {body}) — named-function sugar.
pub fn builtin_fun(interp: &Interp, env: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("fun", &args, 2)?;
    let mut header = match args.remove(0) {
        Value::QExpr(items) => items,
        other => return Err(LispError::bad_type("fun", 0, other.kind(), Kind::QExpr)),
    };
    if header.is_empty() {
        return Err(LispError::empty_argument("fun"));
    }
    let name = match header.remove(0) {
        Value::Sym(name) => name,
        other => {
            return Err(LispError::NonSymbolTarget {
                func: "fun".to_string(),
                got: other.kind(),
            })
        }
    };
    let body = args.remove(0);
    let lambda = builtin_lambda(interp, env, vec![Value::QExpr(header), body])?;
    env.def(&name, lambda);
    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "def", builtin_def);
    add_builtin(env, "=", builtin_put);
    add_builtin(env, "\\", builtin_lambda);
    add_builtin(env, "fun", builtin_fun);
}
