mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod highlighter;
mod parser;
mod read;
mod value;

use clap::Parser;
use config::{HISTORY_FILE, PROMPT, STDLIB_PATH, WELCOME_FOOTER, WELCOME_MESSAGE};
use env::Env;
use eval::Interp;
use highlighter::JdHelper;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;
use value::Value;

/// JDlisp interpreter
#[derive(Parser, Debug)]
#[command(name = "jdlisp")]
#[command(version = config::VERSION)]
#[command(about = "An S-expression Lisp with Q-expressions and curried lambdas")]
struct CliArgs {
    /// Script files to load in order (omit to start the REPL)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Skip loading the standard prelude
    #[arg(long = "no-stdlib")]
    no_stdlib: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let interp = Interp::new(parser::Parser::new());
    let env = Env::new();
    builtins::register_builtins(&env);

    // A missing prelude is reported but does not end the session.
    if !args.no_stdlib {
        load_file(&interp, &env, STDLIB_PATH);
    }

    if !args.files.is_empty() {
        for file in &args.files {
            load_file(&interp, &env, &file.to_string_lossy());
        }
        return Ok(());
    }

    repl(&interp, &env)
}

/// Loads one file, printing the error value if loading fails.
fn load_file(interp: &Interp, env: &Rc<Env>, path: &str) {
    let args = vec![Value::Str(path.to_string())];
    if let Err(err) = builtins::io::builtin_load(interp, env, args) {
        println!("{}", Value::Err(err));
    }
}

fn repl(interp: &Interp, env: &Rc<Env>) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<JdHelper, FileHistory> = Editor::with_config(rl_config)
        .map_err(|err| format!("Failed to initialize REPL: {}", err))?;
    rl.set_helper(Some(JdHelper::new()));
    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_FOOTER);
    println!();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match interp.parser().parse(&line) {
                    Ok(nodes) => {
                        for node in nodes {
                            let result = interp.eval(env, read::read(node));
                            // Ok results print nothing, not even a line.
                            if !matches!(result, Value::Ok) {
                                println!("{}", result);
                            }
                        }
                    }
                    Err(err) => eprintln!("Parse error: {}", err),
                }

                if env.quit_requested() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}
