// ABOUTME: Tagged value type for JDlisp data and code, with printing and equality

use crate::env::Env;
use crate::error::LispError;
use crate::eval::Interp;
use std::fmt;
use std::rc::Rc;

/// Signature shared by every builtin: the interpreter (for reaching
/// the parser), the environment the call happens in, and the
/// already-evaluated argument list, which the builtin consumes.
pub type BuiltinFn = fn(&Interp, &Rc<Env>, Vec<Value>) -> Result<Value, LispError>;

/// A JDlisp value. S-Expressions evaluate by reducing their children
/// and applying the head; Q-Expressions are inert lists carrying code
/// or data. `Ok` is the unit returned by side-effecting builtins and
/// prints as nothing.
#[derive(Debug, Clone)]
pub enum Value {
    Err(LispError),
    Num(i64),
    Dec(f64),
    Bool(bool),
    Sym(String),
    Str(String),
    Fun(Fun),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Ok,
}

/// The two shapes of a function value.
#[derive(Debug, Clone)]
pub enum Fun {
    Builtin { name: &'static str, func: BuiltinFn },
    Lambda(Lambda),
}

/// A user-defined function. `formals` and `body` hold the payloads of
/// the Q-Expressions given to `\`. The captured environment is a
/// shared handle; the application protocol clones it before binding
/// when other closures still hold it.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub formals: Vec<Value>,
    pub body: Vec<Value>,
    pub env: Rc<Env>,
}

/// Variant names as they appear in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Err,
    Num,
    Dec,
    Bool,
    Sym,
    Str,
    Fun,
    SExpr,
    QExpr,
    Ok,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Err => "Error",
            Kind::Num => "Number",
            Kind::Dec => "Decimal",
            Kind::Bool => "Boolean",
            Kind::Sym => "Symbol",
            Kind::Str => "String",
            Kind::Fun => "Function",
            Kind::SExpr => "S-Expression",
            Kind::QExpr => "Q-Expression",
            Kind::Ok => "Ok",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Err(_) => Kind::Err,
            Value::Num(_) => Kind::Num,
            Value::Dec(_) => Kind::Dec,
            Value::Bool(_) => Kind::Bool,
            Value::Sym(_) => Kind::Sym,
            Value::Str(_) => Kind::Str,
            Value::Fun(_) => Kind::Fun,
            Value::SExpr(_) => Kind::SExpr,
            Value::QExpr(_) => Kind::QExpr,
            Value::Ok => Kind::Ok,
        }
    }

    /// Numeric view used by equality: booleans count as 0/1.
    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n as f64),
            Value::Dec(d) => Some(*d),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Structural equality. Numeric kinds compare after promotion to
    /// the widest kind involved; builtins compare by identity; lambdas
    /// by formals and body; lists pairwise. Everything else is unequal
    /// across variants.
    pub fn structural_eq(&self, other: &Value) -> bool {
        if let (Value::Num(a), Value::Num(b)) = (self, other) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a == b;
        }
        match (self, other) {
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Fun(a), Value::Fun(b)) => fun_eq(a, b),
            (Value::SExpr(a), Value::SExpr(b)) | (Value::QExpr(a), Value::QExpr(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structural_eq(y))
            }
            _ => false,
        }
    }
}

fn fun_eq(a: &Fun, b: &Fun) -> bool {
    match (a, b) {
        // Each builtin is registered once under a unique name.
        (Fun::Builtin { name: a, .. }, Fun::Builtin { name: b, .. }) => a == b,
        (Fun::Lambda(a), Fun::Lambda(b)) => {
            a.formals.len() == b.formals.len()
                && a.body.len() == b.body.len()
                && a.formals.iter().zip(&b.formals).all(|(x, y)| x.structural_eq(y))
                && a.body.iter().zip(&b.body).all(|(x, y)| x.structural_eq(y))
        }
        _ => false,
    }
}

/// Escapes a string payload for printing in source form.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, close: char, items: &[Value]) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Err(err) => write!(f, "Error: {}", err),
            Value::Num(n) => write!(f, "{}", n),
            Value::Dec(d) => write!(f, "{:.6}", d),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Str(s) => write!(f, "\"{}\"", escape_str(s)),
            Value::Fun(Fun::Builtin { name, .. }) => write!(f, "<builtin>: {}", name),
            Value::Fun(Fun::Lambda(lambda)) => {
                write!(f, "(\\ ")?;
                write_seq(f, '{', '}', &lambda.formals)?;
                write!(f, " ")?;
                write_seq(f, '{', '}', &lambda.body)?;
                write!(f, ")")
            }
            Value::SExpr(items) => write_seq(f, '(', ')', items),
            Value::QExpr(items) => write_seq(f, '{', '}', items),
            Value::Ok => Ok(()),
        }
    }
}
