// ABOUTME: Evaluator and function application protocol for JDlisp

use crate::env::Env;
use crate::error::LispError;
use crate::parser::Parser;
use crate::value::{Fun, Lambda, Value};
use std::rc::Rc;

/// The interpreter core. Owns the grammar collaborator so builtins
/// like `read` and `load` can reach the parser without global state.
pub struct Interp {
    parser: Parser,
}

impl Interp {
    pub fn new(parser: Parser) -> Self {
        Interp { parser }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Evaluates `value` in `env`, consuming it. Symbols are looked
    /// up, S-Expressions are reduced, everything else evaluates to
    /// itself.
    pub fn eval(&self, env: &Rc<Env>, value: Value) -> Value {
        match value {
            Value::Sym(name) => match env.get(&name) {
                Some(bound) => bound,
                None => Value::Err(LispError::UnboundSymbol(name)),
            },
            Value::SExpr(items) => self.eval_sexpr(env, items),
            other => other,
        }
    }

    fn eval_sexpr(&self, env: &Rc<Env>, items: Vec<Value>) -> Value {
        // Reduce every child left to right before looking at any of
        // them; side effects of later children happen even when an
        // earlier child produced an error.
        let mut items: Vec<Value> = items
            .into_iter()
            .map(|child| self.eval(env, child))
            .collect();

        if let Some(index) = items.iter().position(|child| matches!(child, Value::Err(_))) {
            return items.swap_remove(index);
        }

        if items.len() <= 1 {
            return match items.pop() {
                Some(single) => single,
                None => Value::SExpr(items),
            };
        }

        let head = items.remove(0);
        match head {
            Value::Fun(func) => self.call(env, func, items),
            other => Value::Err(LispError::HeadNotFunction { got: other.kind() }),
        }
    }

    /// Applies a function to already-evaluated arguments. Builtins run
    /// directly; lambdas go through the binding loop.
    pub fn call(&self, env: &Rc<Env>, func: Fun, args: Vec<Value>) -> Value {
        match func {
            Fun::Builtin { func, .. } => match func(self, env, args) {
                Ok(value) => value,
                Err(err) => Value::Err(err),
            },
            Fun::Lambda(lambda) => self.apply_lambda(env, lambda, args),
        }
    }

    fn apply_lambda(&self, env: &Rc<Env>, mut lambda: Lambda, mut args: Vec<Value>) -> Value {
        let given = args.len();
        let total = lambda.formals.len();

        // Other closures may still hold this environment; bindings
        // made for this application must not be visible through them.
        if Rc::strong_count(&lambda.env) > 1 {
            lambda.env = Rc::new((*lambda.env).clone());
        }

        while !args.is_empty() {
            if lambda.formals.is_empty() {
                return Value::Err(LispError::TooManyArguments {
                    got: given,
                    want: total,
                });
            }

            let name = match lambda.formals.remove(0) {
                Value::Sym(name) => name,
                other => return Value::Err(LispError::NonSymbolFormal { got: other.kind() }),
            };

            // The single formal after '&' collects every remaining
            // actual into a Q-Expression.
            if name == "&" {
                if lambda.formals.len() != 1 {
                    return Value::Err(LispError::VariadicFormat);
                }
                let rest = match lambda.formals.remove(0) {
                    Value::Sym(rest) => rest,
                    other => return Value::Err(LispError::NonSymbolFormal { got: other.kind() }),
                };
                lambda.env.put(&rest, Value::QExpr(std::mem::take(&mut args)));
                break;
            }

            lambda.env.put(&name, args.remove(0));
        }

        // A variadic marker left unbound binds its formal to the
        // empty list.
        if matches!(lambda.formals.first(), Some(Value::Sym(name)) if name == "&") {
            if lambda.formals.len() != 2 {
                return Value::Err(LispError::VariadicFormat);
            }
            lambda.formals.remove(0);
            let rest = match lambda.formals.remove(0) {
                Value::Sym(rest) => rest,
                other => return Value::Err(LispError::NonSymbolFormal { got: other.kind() }),
            };
            lambda.env.put(&rest, Value::QExpr(Vec::new()));
        }

        if lambda.formals.is_empty() {
            // Fully bound: evaluate the body as an S-Expression in the
            // lambda's environment, re-parented onto the caller's.
            lambda.env.set_parent(Rc::clone(env));
            let Lambda {
                body,
                env: lambda_env,
                ..
            } = lambda;
            self.eval(&lambda_env, Value::SExpr(body))
        } else {
            // Partial application: the remaining formals stay open and
            // the bindings made so far travel with the closure.
            Value::Fun(Fun::Lambda(lambda))
        }
    }
}

impl Default for Interp {
    fn default() -> Self {
        Interp::new(Parser::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::read::read;

    fn setup() -> (Interp, Rc<Env>) {
        let interp = Interp::new(Parser::new());
        let env = Env::new();
        register_builtins(&env);
        (interp, env)
    }

    /// Evaluates each top-level expression, returning the last result.
    fn eval_str(interp: &Interp, env: &Rc<Env>, source: &str) -> Value {
        let nodes = interp.parser().parse(source).expect("parse failed");
        let mut result = Value::SExpr(Vec::new());
        for node in nodes {
            result = interp.eval(env, read(node));
        }
        result
    }

    fn sym(name: &str) -> Value {
        Value::Sym(name.to_string())
    }

    #[test]
    fn test_self_evaluating_values() {
        let (interp, env) = setup();
        assert!(matches!(interp.eval(&env, Value::Num(42)), Value::Num(42)));
        assert!(matches!(interp.eval(&env, Value::Bool(true)), Value::Bool(true)));
        assert!(
            matches!(interp.eval(&env, Value::Str("hi".to_string())), Value::Str(s) if s == "hi")
        );
        let inert = Value::QExpr(vec![sym("x"), Value::Num(1)]);
        assert_eq!(interp.eval(&env, inert).to_string(), "{x 1}");
    }

    #[test]
    fn test_symbol_lookup() {
        let (interp, env) = setup();
        env.put("x", Value::Num(10));
        assert!(matches!(interp.eval(&env, sym("x")), Value::Num(10)));
    }

    #[test]
    fn test_unbound_symbol() {
        let (interp, env) = setup();
        let result = interp.eval(&env, sym("ghost"));
        assert_eq!(result.to_string(), "Error: Unbound Symbol 'ghost'");
    }

    #[test]
    fn test_empty_sexpr_evaluates_to_itself() {
        let (interp, env) = setup();
        let result = interp.eval(&env, Value::SExpr(vec![]));
        assert_eq!(result.to_string(), "()");
    }

    #[test]
    fn test_single_element_is_taken() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(42)");
        assert!(matches!(result, Value::Num(42)));
        // A single symbol resolves to its value, even a function.
        let result = eval_str(&interp, &env, "(+)");
        assert_eq!(result.to_string(), "<builtin>: +");
    }

    #[test]
    fn test_head_must_be_function() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(1 2 3)");
        assert_eq!(
            result.to_string(),
            "Error: S-Expression starts with incorrect type. Got Number, Expected Function."
        );
    }

    #[test]
    fn test_nested_application() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(* (+ 1 2) 3)");
        assert!(matches!(result, Value::Num(9)));
    }

    #[test]
    fn test_first_error_by_position_wins() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(+ (head {}) (/ 1 0))");
        assert_eq!(result.to_string(), "Error: Function head was passed empty argument");
    }

    #[test]
    fn test_error_replaces_whole_expression() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(+ 1 (/ 10 0) 3)");
        assert_eq!(result.to_string(), "Error: Division By Zero!");
    }

    #[test]
    fn test_lambda_application() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "((\\ {x y} {+ x y}) 10 20)");
        assert!(matches!(result, Value::Num(30)));
    }

    #[test]
    fn test_lambda_too_many_arguments() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "((\\ {x} {x}) 1 2)");
        assert_eq!(
            result.to_string(),
            "Error: Function passed too many arguments. Got 2, Expected 1."
        );
    }

    #[test]
    fn test_currying_returns_closure() {
        let (interp, env) = setup();
        let partial = eval_str(&interp, &env, "((\\ {x y} {+ x y}) 1)");
        assert!(matches!(&partial, Value::Fun(Fun::Lambda(lambda)) if lambda.formals.len() == 1));
    }

    #[test]
    fn test_curried_call_completes() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "(((\\ {x y} {+ x y}) 1) 2)");
        assert!(matches!(result, Value::Num(3)));
    }

    #[test]
    fn test_curried_closure_does_not_mutate_original() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "(def {add} (\\ {x y} {+ x y}))");
        eval_str(&interp, &env, "(def {add1} (add 1))");
        // The original stays a two-argument function.
        assert!(matches!(eval_str(&interp, &env, "(add 10 20)"), Value::Num(30)));
        assert!(matches!(eval_str(&interp, &env, "(add1 5)"), Value::Num(6)));
        // And the partial can be reused.
        assert!(matches!(eval_str(&interp, &env, "(add1 100)"), Value::Num(101)));
    }

    #[test]
    fn test_variadic_collects_tail() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "((\\ {x & xs} {xs}) 1 2 3 4)");
        assert_eq!(result.to_string(), "{2 3 4}");
    }

    #[test]
    fn test_variadic_without_tail_binds_empty_list() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "((\\ {x & xs} {xs}) 1)");
        assert_eq!(result.to_string(), "{}");
    }

    #[test]
    fn test_variadic_format_errors() {
        let (interp, env) = setup();
        let result = eval_str(&interp, &env, "((\\ {&} {1}) 1)");
        assert_eq!(
            result.to_string(),
            "Error: Function format invalid. symbol '&' not followed by single symbol."
        );
        let result = eval_str(&interp, &env, "((\\ {& a b} {1}) 1)");
        assert_eq!(
            result.to_string(),
            "Error: Function format invalid. symbol '&' not followed by single symbol."
        );
    }

    #[test]
    fn test_closure_reads_caller_scope_through_parent() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "(def {n} 100)");
        let result = eval_str(&interp, &env, "((\\ {x} {+ x n}) 1)");
        assert!(matches!(result, Value::Num(101)));
    }

    #[test]
    fn test_local_assignment_insulated_from_caller() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "(def {x} 1)");
        eval_str(&interp, &env, "((\\ {y} {= {x} y}) 99)");
        assert!(matches!(eval_str(&interp, &env, "x"), Value::Num(1)));
    }

    #[test]
    fn test_def_inside_lambda_reaches_root() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "((\\ {y} {def {seen} y}) 7)");
        assert!(matches!(eval_str(&interp, &env, "seen"), Value::Num(7)));
    }

    #[test]
    fn test_recursive_function() {
        let (interp, env) = setup();
        eval_str(
            &interp,
            &env,
            "(fun {fact n} {if (<= n 1) {1} {* n (fact (- n 1))}})",
        );
        assert!(matches!(eval_str(&interp, &env, "(fact 5)"), Value::Num(120)));
    }

    #[test]
    fn test_copy_independence() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "(def {xs} {1 2 3})");
        // tail works on a copy of the binding.
        assert_eq!(eval_str(&interp, &env, "(tail xs)").to_string(), "{2 3}");
        assert_eq!(eval_str(&interp, &env, "xs").to_string(), "{1 2 3}");
    }

    #[test]
    fn test_call_order_left_to_right() {
        let (interp, env) = setup();
        eval_str(&interp, &env, "(def {trace} {})");
        // note records its argument globally, then returns it.
        eval_str(
            &interp,
            &env,
            "(fun {note x} {eval (head (list x (def {trace} (join trace (list x)))))})",
        );
        eval_str(&interp, &env, "(+ (note 1) (note 2) (note 3))");
        assert_eq!(eval_str(&interp, &env, "trace").to_string(), "{1 2 3}");
    }
}
