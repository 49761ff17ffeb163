// ABOUTME: Constants for the interpreter binary: version, prompt, file names

pub const VERSION: &str = "1.0.0";

pub const WELCOME_MESSAGE: &str = "JDlisp Version 1.0";
pub const WELCOME_FOOTER: &str = "Press Ctrl+c to Exit";

pub const PROMPT: &str = "jdlisp> ";
pub const HISTORY_FILE: &str = ".jdlisp_history";

/// Standard prelude, loaded from the working directory at startup.
pub const STDLIB_PATH: &str = "stlib.jdl";
