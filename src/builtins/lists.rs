//! List operations: list, head, tail, init, cons, len, join, eval
//!
//! Q-Expressions are the list type. `head` and `tail` also have string
//! overloads keeping the first and last character respectively, and
//! `join` concatenates strings as well as lists. `eval` promotes a
//! Q-Expression back into an S-Expression and reduces it.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::{Kind, Value};
use std::rc::Rc;

use super::{add_builtin, expect_arity};

/// Retypes the evaluated argument list into a Q-Expression.
pub fn builtin_list(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    Ok(Value::QExpr(args))
}

pub fn builtin_head(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("head", &args, 1)?;
    match args.remove(0) {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Err(LispError::empty_argument("head"));
            }
            items.truncate(1);
            Ok(Value::QExpr(items))
        }
        Value::Str(s) => Ok(Value::Str(s.chars().take(1).collect())),
        other => Err(LispError::bad_type("head", 0, other.kind(), Kind::Str)),
    }
}

pub fn builtin_tail(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("tail", &args, 1)?;
    match args.remove(0) {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Err(LispError::empty_argument("tail"));
            }
            items.remove(0);
            Ok(Value::QExpr(items))
        }
        // The string overload keeps only the last character.
        Value::Str(s) => Ok(Value::Str(s.chars().last().map(String::from).unwrap_or_default())),
        other => Err(LispError::bad_type("tail", 0, other.kind(), Kind::Str)),
    }
}

/// Everything but the final element.
pub fn builtin_init(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("init", &args, 1)?;
    match args.remove(0) {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Err(LispError::empty_argument("init"));
            }
            items.pop();
            Ok(Value::QExpr(items))
        }
        other => Err(LispError::bad_type("init", 0, other.kind(), Kind::QExpr)),
    }
}

pub fn builtin_cons(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("cons", &args, 2)?;
    let value = args.remove(0);
    match args.remove(0) {
        Value::QExpr(items) => {
            let mut out = Vec::with_capacity(items.len() + 1);
            out.push(value);
            out.extend(items);
            Ok(Value::QExpr(out))
        }
        other => Err(LispError::bad_type("cons", 1, other.kind(), Kind::QExpr)),
    }
}

pub fn builtin_len(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("len", &args, 1)?;
    match args.remove(0) {
        Value::QExpr(items) => Ok(Value::Num(items.len() as i64)),
        other => Err(LispError::bad_type("len", 0, other.kind(), Kind::QExpr)),
    }
}

/// Concatenates Q-Expressions, or strings when the first argument is a
/// string.
pub fn builtin_join(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::bad_arity("join", 0, 1));
    }
    if matches!(args.first(), Some(Value::QExpr(_))) {
        join_qexprs(args)
    } else {
        join_strs(args)
    }
}

fn join_qexprs(args: Vec<Value>) -> Result<Value, LispError> {
    let mut out = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        match arg {
            Value::QExpr(items) => out.extend(items),
            other => {
                return Err(LispError::bad_type("qexpr join", index, other.kind(), Kind::QExpr))
            }
        }
    }
    Ok(Value::QExpr(out))
}

fn join_strs(args: Vec<Value>) -> Result<Value, LispError> {
    let mut out = String::new();
    for (index, arg) in args.into_iter().enumerate() {
        match arg {
            Value::Str(s) => out.push_str(&s),
            other => {
                return Err(LispError::bad_type("string join", index, other.kind(), Kind::Str))
            }
        }
    }
    Ok(Value::Str(out))
}

/// Retypes a Q-Expression into an S-Expression and evaluates it.
pub fn builtin_eval(interp: &Interp, env: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("eval", &args, 1)?;
    match args.remove(0) {
        Value::QExpr(items) => Ok(interp.eval(env, Value::SExpr(items))),
        other => Err(LispError::bad_type("eval", 0, other.kind(), Kind::QExpr)),
    }
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "list", builtin_list);
    add_builtin(env, "head", builtin_head);
    add_builtin(env, "tail", builtin_tail);
    add_builtin(env, "init", builtin_init);
    add_builtin(env, "cons", builtin_cons);
    add_builtin(env, "len", builtin_len);
    add_builtin(env, "join", builtin_join);
    add_builtin(env, "eval", builtin_eval);
}
