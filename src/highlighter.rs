// ABOUTME: REPL helper providing matching-bracket highlighting

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter, MatchingBracketHighlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;

pub struct JdHelper {
    brackets: MatchingBracketHighlighter,
}

impl JdHelper {
    pub fn new() -> Self {
        JdHelper {
            brackets: MatchingBracketHighlighter::new(),
        }
    }
}

impl Default for JdHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for JdHelper {}

impl Completer for JdHelper {
    type Candidate = String;
}

impl Hinter for JdHelper {
    type Hint = String;
}

impl Validator for JdHelper {}

impl Highlighter for JdHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.brackets.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        self.brackets.highlight_char(line, pos, kind)
    }
}
