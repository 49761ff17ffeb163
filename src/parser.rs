// ABOUTME: Grammar for JDlisp source implemented with nom combinators

use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::{escaped, take_while, take_while1},
    character::complete::{anychar, char, multispace1, none_of},
    combinator::value,
    multi::many0,
    IResult, Parser as _,
};

/// A syntax node. Number and decimal lexemes stay raw: the reader owns
/// numeric conversion so that out-of-range literals become error
/// values instead of parse failures. String payloads keep their escape
/// sequences; the reader decodes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Number(String),
    Decimal(String),
    Boolean(bool),
    Symbol(String),
    Str(String),
    SExpr(Vec<Ast>),
    QExpr(Vec<Ast>),
}

/// The grammar collaborator. Handed to the interpreter at construction
/// so builtins like `read` and `load` can parse without global state.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parses every top-level expression in `source`, in order.
    pub fn parse(&self, source: &str) -> Result<Vec<Ast>, ParseError> {
        let mut nodes = Vec::new();
        let mut remaining = source;
        loop {
            let (rest, ()) = ws_and_comments(remaining).unwrap_or((remaining, ()));
            if rest.is_empty() {
                return Ok(nodes);
            }
            match parse_expr(rest) {
                Ok((rest, node)) => {
                    nodes.push(node);
                    remaining = rest;
                }
                Err(_) => {
                    let snippet: String = rest.chars().take(24).collect();
                    return Err(ParseError {
                        message: format!("unexpected input near '{}'", snippet),
                    });
                }
            }
        }
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '_' | '+' | '-' | '*' | '/' | '\\' | '=' | '<' | '>' | '!' | '&' | '|'
        )
}

/// Parse a comment from ; to end of line
fn parse_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n' && c != '\r')(input)?;
    Ok((input, ()))
}

/// Skip whitespace and comments
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), parse_comment)))
        .map(|_| ())
        .parse(input)
}

/// Parse a bare token and classify it as a decimal, number, boolean,
/// or symbol, in that order of preference.
fn parse_atom(input: &str) -> IResult<&str, Ast> {
    let (rest, token) = take_while1(|c: char| is_symbol_char(c) || c == '.')(input)?;
    match classify_atom(token) {
        Some(node) => Ok((rest, node)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

fn classify_atom(token: &str) -> Option<Ast> {
    if is_decimal_lexeme(token) {
        return Some(Ast::Decimal(token.to_string()));
    }
    if is_number_lexeme(token) {
        return Some(Ast::Number(token.to_string()));
    }
    match token {
        "true" => return Some(Ast::Boolean(true)),
        "false" => return Some(Ast::Boolean(false)),
        _ => {}
    }
    if token.chars().all(is_symbol_char) {
        Some(Ast::Symbol(token.to_string()))
    } else {
        None
    }
}

/// -?[0-9]+
fn is_number_lexeme(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// -?[0-9]+\.[0-9]*
fn is_decimal_lexeme(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    match body.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Parse a string literal, keeping the payload raw (escapes intact)
fn parse_string(input: &str) -> IResult<&str, Ast> {
    let (input, _) = char('"')(input)?;

    if let Ok((input, _)) = char::<_, nom::error::Error<_>>('"')(input) {
        return Ok((input, Ast::Str(String::new())));
    }

    let (input, content) = escaped(none_of("\"\\"), '\\', anychar)(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Ast::Str(content.to_string())))
}

fn parse_sexpr(input: &str) -> IResult<&str, Ast> {
    let (input, items) = parse_seq(input, '(', ')')?;
    Ok((input, Ast::SExpr(items)))
}

fn parse_qexpr(input: &str) -> IResult<&str, Ast> {
    let (input, items) = parse_seq(input, '{', '}')?;
    Ok((input, Ast::QExpr(items)))
}

fn parse_seq(input: &str, open: char, close: char) -> IResult<&str, Vec<Ast>> {
    let (input, _) = char(open)(input)?;

    let mut items = Vec::new();
    let mut remaining = input;
    loop {
        let (rest, ()) = ws_and_comments(remaining)?;
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(close)(rest) {
            return Ok((rest, items));
        }
        let (rest, item) = parse_expr(rest)?;
        items.push(item);
        remaining = rest;
    }
}

fn parse_expr(input: &str) -> IResult<&str, Ast> {
    let (input, ()) = ws_and_comments(input)?;
    alt((parse_sexpr, parse_qexpr, parse_string, parse_atom)).parse(input)
}
