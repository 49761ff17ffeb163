// ABOUTME: Converts syntax nodes from the parser into values

use crate::error::LispError;
use crate::parser::Ast;
use crate::value::Value;

/// Converts one syntax node into a value. Numeric conversion happens
/// here so an out-of-range literal becomes an error value rather than
/// a parse failure.
pub fn read(node: Ast) -> Value {
    match node {
        Ast::Number(text) => match text.parse::<i64>() {
            Ok(n) => Value::Num(n),
            Err(_) => Value::Err(LispError::InvalidNumber),
        },
        Ast::Decimal(text) => match text.parse::<f64>() {
            Ok(d) => Value::Dec(d),
            Err(_) => Value::Err(LispError::InvalidDecimal),
        },
        Ast::Boolean(b) => Value::Bool(b),
        Ast::Symbol(name) => Value::Sym(name),
        Ast::Str(raw) => Value::Str(unescape(&raw)),
        Ast::SExpr(children) => Value::SExpr(children.into_iter().map(read).collect()),
        Ast::QExpr(children) => Value::QExpr(children.into_iter().map(read).collect()),
    }
}

/// Decodes the escape sequences of a string literal payload. An
/// unrecognized escape keeps the escaped character.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn read_one(source: &str) -> Value {
        let mut nodes = Parser::new().parse(source).expect("parse failed");
        assert_eq!(nodes.len(), 1);
        read(nodes.remove(0))
    }

    #[test]
    fn test_read_scalars() {
        assert!(matches!(read_one("42"), Value::Num(42)));
        assert!(matches!(read_one("-7"), Value::Num(-7)));
        assert!(matches!(read_one("2.5"), Value::Dec(d) if (d - 2.5).abs() < f64::EPSILON));
        assert!(matches!(read_one("true"), Value::Bool(true)));
        assert!(matches!(read_one("false"), Value::Bool(false)));
        assert!(matches!(read_one("head"), Value::Sym(s) if s == "head"));
    }

    #[test]
    fn test_read_overflowing_number_is_error_value() {
        let value = read_one("99999999999999999999999");
        assert!(matches!(value, Value::Err(LispError::InvalidNumber)));
    }

    #[test]
    fn test_read_string_unescapes() {
        assert!(matches!(read_one(r#""hello""#), Value::Str(s) if s == "hello"));
        assert!(matches!(read_one(r#""a\nb""#), Value::Str(s) if s == "a\nb"));
        assert!(matches!(read_one(r#""a\tb""#), Value::Str(s) if s == "a\tb"));
        assert!(matches!(read_one(r#""say \"hi\"""#), Value::Str(s) if s == "say \"hi\""));
        assert!(matches!(read_one(r#""back\\slash""#), Value::Str(s) if s == "back\\slash"));
    }

    #[test]
    fn test_read_lists_preserve_order_and_kind() {
        let value = read_one("(+ 1 {2 3})");
        let Value::SExpr(items) = value else {
            panic!("expected S-Expression");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], Value::Sym(s) if s == "+"));
        assert!(matches!(items[1], Value::Num(1)));
        let Value::QExpr(inner) = &items[2] else {
            panic!("expected Q-Expression");
        };
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_round_trip_print_parse() {
        for source in ["(+ 1 2)", "{1 {2 3} x}", "\"a\\nb\"", "-4", "true"] {
            let value = read_one(source);
            let reparsed = read_one(&value.to_string());
            assert!(value.structural_eq(&reparsed), "round trip failed for {}", source);
        }
    }
}
