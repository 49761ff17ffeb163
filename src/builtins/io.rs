//! I/O builtins: print, show, error, read, load
//!
//! `read` and `load` go through the interpreter's parser collaborator.
//! `load` evaluates a file's top-level forms in order, printing any
//! error value inline and carrying on, the same policy the REPL uses
//! for the standard prelude.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::read::read;
use crate::value::{Kind, Value};
use std::rc::Rc;

use super::{add_builtin, expect_arity};

/// Prints each argument followed by a space, then a newline.
pub fn builtin_print(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    for arg in &args {
        print!("{} ", arg);
    }
    println!();
    Ok(Value::Ok)
}

/// Prints a string quoted but without escaping its payload.
pub fn builtin_show(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("show", &args, 1)?;
    match args.remove(0) {
        Value::Str(s) => {
            println!("\"{}\"", s);
            Ok(Value::Ok)
        }
        other => Err(LispError::bad_type("show", 0, other.kind(), Kind::Str)),
    }
}

/// Turns a string into an error value.
pub fn builtin_error(_: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("error", &args, 1)?;
    match args.remove(0) {
        Value::Str(message) => Ok(Value::Err(LispError::Raised(message))),
        other => Err(LispError::bad_type("error", 0, other.kind(), Kind::Str)),
    }
}

/// Parses a string and returns the forms it contains as a
/// Q-Expression.
pub fn builtin_read(interp: &Interp, _: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("read", &args, 1)?;
    match args.remove(0) {
        Value::Str(source) => {
            let nodes = interp
                .parser()
                .parse(&source)
                .map_err(|err| LispError::ReadFailed(err.to_string()))?;
            Ok(Value::QExpr(nodes.into_iter().map(read).collect()))
        }
        other => Err(LispError::bad_type("read", 0, other.kind(), Kind::Str)),
    }
}

/// Parses a file and evaluates every top-level form in order. Error
/// results are printed as they occur; the return value is `()`.
pub fn builtin_load(interp: &Interp, env: &Rc<Env>, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("load", &args, 1)?;
    let path = match args.remove(0) {
        Value::Str(path) => path,
        other => return Err(LispError::bad_type("load", 0, other.kind(), Kind::Str)),
    };

    let source = std::fs::read_to_string(&path)
        .map_err(|err| LispError::LoadFailed(format!("{}: {}", path, err)))?;
    let nodes = interp
        .parser()
        .parse(&source)
        .map_err(|err| LispError::LoadFailed(format!("{}: {}", path, err)))?;

    for node in nodes {
        let result = interp.eval(env, read(node));
        if matches!(result, Value::Err(_)) {
            println!("{}", result);
        }
    }

    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "print", builtin_print);
    add_builtin(env, "show", builtin_show);
    add_builtin(env, "error", builtin_error);
    add_builtin(env, "read", builtin_read);
    add_builtin(env, "load", builtin_load);
}
