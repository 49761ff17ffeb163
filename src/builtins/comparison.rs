//! Comparison operations: >, <, >=, <=, ==, !=
//!
//! The ordering operators compare numerically after the shared
//! promotion prelude; `==` and `!=` are structural over every value
//! kind. All six take exactly two arguments.

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use crate::value::Value;
use std::rc::Rc;

use super::math::{promote, Operands};
use super::{add_builtin, expect_arity};

#[derive(Debug, Clone, Copy)]
enum CmpOp {
    Gt,
    Lt,
    Ge,
    Le,
}

impl CmpOp {
    fn name(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
        }
    }
}

fn compare(op: CmpOp, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity(op.name(), &args, 2)?;
    let result = match promote(op.name(), &args)? {
        Operands::Ints(v) => match op {
            CmpOp::Gt => v[0] > v[1],
            CmpOp::Lt => v[0] < v[1],
            CmpOp::Ge => v[0] >= v[1],
            CmpOp::Le => v[0] <= v[1],
        },
        Operands::Floats(v) => match op {
            CmpOp::Gt => v[0] > v[1],
            CmpOp::Lt => v[0] < v[1],
            CmpOp::Ge => v[0] >= v[1],
            CmpOp::Le => v[0] <= v[1],
        },
    };
    Ok(Value::Bool(result))
}

pub fn builtin_gt(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    compare(CmpOp::Gt, args)
}

pub fn builtin_lt(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    compare(CmpOp::Lt, args)
}

pub fn builtin_ge(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    compare(CmpOp::Ge, args)
}

pub fn builtin_le(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    compare(CmpOp::Le, args)
}

pub fn builtin_eq(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("==", &args, 2)?;
    Ok(Value::Bool(args[0].structural_eq(&args[1])))
}

pub fn builtin_ne(_: &Interp, _: &Rc<Env>, args: Vec<Value>) -> Result<Value, LispError> {
    expect_arity("!=", &args, 2)?;
    Ok(Value::Bool(!args[0].structural_eq(&args[1])))
}

pub fn register(env: &Rc<Env>) {
    add_builtin(env, ">", builtin_gt);
    add_builtin(env, "<", builtin_lt);
    add_builtin(env, ">=", builtin_ge);
    add_builtin(env, "<=", builtin_le);
    add_builtin(env, "==", builtin_eq);
    add_builtin(env, "!=", builtin_ne);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Env;
    use crate::eval::Interp;

    fn run(func: crate::value::BuiltinFn, args: Vec<Value>) -> Result<Value, LispError> {
        let interp = Interp::default();
        let env = Env::new();
        func(&interp, &env, args)
    }

    #[test]
    fn test_integer_ordering() {
        assert!(matches!(
            run(builtin_gt, vec![Value::Num(2), Value::Num(1)]),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            run(builtin_lt, vec![Value::Num(2), Value::Num(1)]),
            Ok(Value::Bool(false))
        ));
        assert!(matches!(
            run(builtin_ge, vec![Value::Num(2), Value::Num(2)]),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            run(builtin_le, vec![Value::Num(3), Value::Num(2)]),
            Ok(Value::Bool(false))
        ));
    }

    #[test]
    fn test_mixed_kind_ordering_promotes() {
        assert!(matches!(
            run(builtin_gt, vec![Value::Num(2), Value::Dec(1.5)]),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            run(builtin_le, vec![Value::Dec(0.5), Value::Num(1)]),
            Ok(Value::Bool(true))
        ));
    }

    #[test]
    fn test_ordering_requires_two_arguments() {
        let err = run(builtin_gt, vec![Value::Num(1)]).expect_err("expected arity error");
        assert_eq!(
            err.to_string(),
            "Function > passed incorrect number of arguments. Got 1, Expected 2."
        );
    }

    #[test]
    fn test_structural_equality() {
        assert!(matches!(
            run(builtin_eq, vec![Value::Num(1), Value::Dec(1.0)]),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            run(
                builtin_eq,
                vec![
                    Value::QExpr(vec![Value::Num(1), Value::Num(2)]),
                    Value::QExpr(vec![Value::Num(1), Value::Num(2)]),
                ]
            ),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            run(
                builtin_ne,
                vec![Value::Str("a".to_string()), Value::Sym("a".to_string())]
            ),
            Ok(Value::Bool(true))
        ));
    }
}
