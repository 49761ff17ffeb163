// ABOUTME: Error types for parsing and evaluation in the JDlisp interpreter

use crate::value::Kind;
use thiserror::Error;

/// Every error the interpreter can hand back to the user. Errors are
/// first-class values: `Value::Err` wraps this enum and prints as
/// `Error: <message>`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("Function {func} passed incorrect type for argument {index}. Got {got}, Expected {want}.")]
    BadType {
        func: String,
        index: usize,
        got: Kind,
        want: Kind,
    },

    // The misspelling is shipped behaviour; scripts match on this text.
    #[error("Function {func} passsed incorrect type for argument {index}. Got {got}, expected Number or Decimal")]
    NonNumeric {
        func: String,
        index: usize,
        got: Kind,
    },

    #[error("Function {func} passed incorrect number of arguments. Got {got}, Expected {want}.")]
    BadArity {
        func: String,
        got: usize,
        want: usize,
    },

    /// Lambda application received more actuals than formals; counts
    /// are the totals at the start of the binding loop.
    #[error("Function passed too many arguments. Got {got}, Expected {want}.")]
    TooManyArguments { got: usize, want: usize },

    #[error("Function format invalid. symbol '&' not followed by single symbol.")]
    VariadicFormat,

    #[error("Unbound Symbol '{0}'")]
    UnboundSymbol(String),

    #[error("S-Expression starts with incorrect type. Got {got}, Expected Function.")]
    HeadNotFunction { got: Kind },

    #[error("Division By Zero!")]
    DivisionByZero,

    #[error("Can't compute remainder on decimal types!")]
    DecimalRemainder,

    #[error("Remainder operator takes only two arguments!")]
    RemainderArity,

    #[error("Function {func} was passed empty argument")]
    EmptyArgument { func: String },

    /// A lambda formal that is not a symbol.
    #[error("Cannot define non-symbol. Got {got}, Expected Symbol.")]
    NonSymbolFormal { got: Kind },

    /// A definition target that is not a symbol.
    #[error("Function '{func}' cannot define non-symbol. Got {got}, Expected Symbol.")]
    NonSymbolTarget { func: String, got: Kind },

    #[error("Function '{func}' passed too many arguments for symbols. Got {symbols} symbols and {values} values.")]
    TargetCountMismatch {
        func: String,
        symbols: usize,
        values: usize,
    },

    #[error("Function if passed incorrect type for argument 0. Got {got}, Expected Number, Decimal or Boolean.")]
    Condition { got: Kind },

    #[error("Function {func} expects an empty S-Expression as argument, received {count} elements.")]
    ExpectedEmpty { func: String, count: usize },

    #[error("invalid number")]
    InvalidNumber,

    #[error("invalid decimal")]
    InvalidDecimal,

    #[error("Could not read: {0}")]
    ReadFailed(String),

    #[error("Could not load Library {0}")]
    LoadFailed(String),

    /// Raised by the `error` builtin; carries the user's text verbatim.
    #[error("{0}")]
    Raised(String),
}

impl LispError {
    pub fn bad_type(func: &str, index: usize, got: Kind, want: Kind) -> Self {
        LispError::BadType {
            func: func.to_string(),
            index,
            got,
            want,
        }
    }

    pub fn non_numeric(func: &str, index: usize, got: Kind) -> Self {
        LispError::NonNumeric {
            func: func.to_string(),
            index,
            got,
        }
    }

    pub fn bad_arity(func: &str, got: usize, want: usize) -> Self {
        LispError::BadArity {
            func: func.to_string(),
            got,
            want,
        }
    }

    pub fn empty_argument(func: &str) -> Self {
        LispError::EmptyArgument {
            func: func.to_string(),
        }
    }
}

/// Failure from the grammar collaborator. The reader-facing builtins
/// wrap this into `LispError::ReadFailed` / `LispError::LoadFailed`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_type_error_message() {
        let err = LispError::bad_type("head", 0, Kind::Num, Kind::QExpr);
        assert_eq!(
            err.to_string(),
            "Function head passed incorrect type for argument 0. Got Number, Expected Q-Expression."
        );
    }

    #[test]
    fn test_numeric_operand_message_matches_shipped_text() {
        let err = LispError::non_numeric("+", 1, Kind::QExpr);
        assert_eq!(
            err.to_string(),
            "Function + passsed incorrect type for argument 1. Got Q-Expression, expected Number or Decimal"
        );
    }

    #[test]
    fn test_arity_error_message() {
        let err = LispError::bad_arity("cons", 3, 2);
        assert_eq!(
            err.to_string(),
            "Function cons passed incorrect number of arguments. Got 3, Expected 2."
        );
    }

    #[test]
    fn test_unbound_symbol_message() {
        let err = LispError::UnboundSymbol("x".to_string());
        assert_eq!(err.to_string(), "Unbound Symbol 'x'");
    }

    #[test]
    fn test_raised_error_is_verbatim() {
        let err = LispError::Raised("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
