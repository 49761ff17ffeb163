//! Arithmetic operations: +, -, *, /, %
//!
//! All numeric builtins share one promotion prelude: booleans count as
//! integers, and a single decimal operand promotes the whole argument
//! vector to decimals. `+ - * /` fold over any number of operands;
//! unary `-` negates; `%` is integer-only and binary.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::Value;
use std::rc::Rc;

use super::add_builtin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }
}

/// The promoted argument vector: all integers, or all decimals.
pub(crate) enum Operands {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

/// Promotes an argument vector per the shared numeric prelude. The
/// error names the first non-numeric operand.
pub(crate) fn promote(func: &str, args: &[Value]) -> Result<Operands, LispError> {
    if args.iter().any(|arg| matches!(arg, Value::Dec(_))) {
        let mut floats = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            floats.push(match arg {
                Value::Num(n) => *n as f64,
                Value::Dec(d) => *d,
                Value::Bool(b) => f64::from(u8::from(*b)),
                other => return Err(LispError::non_numeric(func, index, other.kind())),
            });
        }
        Ok(Operands::Floats(floats))
    } else {
        let mut ints = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            ints.push(match arg {
                Value::Num(n) => *n,
                Value::Bool(b) => i64::from(*b),
                other => return Err(LispError::non_numeric(func, index, other.kind())),
            });
        }
        Ok(Operands::Ints(ints))
    }
}

fn arith(op: ArithOp, args: Vec<Value>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::bad_arity(op.name(), 0, 1));
    }
    if op == ArithOp::Rem && args.len() > 2 {
        return Err(LispError::RemainderArity);
    }
    match promote(op.name(), &args)? {
        Operands::Ints(values) => int_arith(op, &values),
        Operands::Floats(values) => {
            if op == ArithOp::Rem {
                return Err(LispError::DecimalRemainder);
            }
            float_arith(op, &values)
        }
    }
}

fn int_arith(op: ArithOp, values: &[i64]) -> Result<Value, LispError> {
    let (&first, rest) = match values.split_first() {
        Some(split) => split,
        None => return Err(LispError::bad_arity(op.name(), 0, 1)),
    };

    if op == ArithOp::Sub && rest.is_empty() {
        return Ok(Value::Num(first.wrapping_neg()));
    }

    let mut acc = first;
    for &y in rest {
        acc = match op {
            ArithOp::Add => acc.wrapping_add(y),
            ArithOp::Sub => acc.wrapping_sub(y),
            ArithOp::Mul => acc.wrapping_mul(y),
            ArithOp::Div | ArithOp::Rem if y == 0 => return Err(LispError::DivisionByZero),
            ArithOp::Div => acc.wrapping_div(y),
            ArithOp::Rem => acc.wrapping_rem(y),
        };
    }
    Ok(Value::Num(acc))
}

fn float_arith(op: ArithOp, values: &[f64]) -> Result<Value, LispError> {
    let (&first, rest) = match values.split_first() {
        Some(split) => split,
        None => return Err(LispError::bad_arity(op.name(), 0, 1)),
    };

    if op == ArithOp::Sub && rest.is_empty() {
        return Ok(Value::Dec(-first));
    }

    let mut acc = first;
    for &y in rest {
        acc = match op {
            ArithOp::Add => acc + y,
            ArithOp::Sub => acc - y,
            ArithOp::Mul => acc * y,
            ArithOp::Div if y == 0.0 => return Err(LispError::DivisionByZero),
            ArithOp::Div => acc / y,
            ArithOp::Rem => return Err(LispError::DecimalRemainder),
        };
    }
    Ok(Value::Dec(acc))
}

pub fn builtin_add(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    arith(ArithOp::Add, args)
}

pub fn builtin_sub(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    arith(ArithOp::Sub, args)
}

pub fn builtin_mul(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    arith(ArithOp::Mul, args)
}

pub fn builtin_div(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    arith(ArithOp::Div, args)
}

pub fn builtin_rem(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    arith(ArithOp::Rem, args)
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, "+", builtin_add);
    add_builtin(env, "-", builtin_sub);
    add_builtin(env, "*", builtin_mul);
    add_builtin(env, "/", builtin_div);
    add_builtin(env, "%", builtin_rem);
}
