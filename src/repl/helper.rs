//! Rustyline helper for the game shell.
//!
//! Completes `:` commands, and unlocked code names as arguments to `:fav`.
//! Secret codes themselves are deliberately never completed: tab-completing
//! the puzzle would spoil it.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use super::commands::COMMAND_NAMES;

/// Completion state for the shell.
#[derive(Default)]
pub struct ShellHelper {
    /// Keys the player has already unlocked; refreshed by the shell loop.
    unlocked_keys: Vec<String>,
}

impl ShellHelper {
    /// Empty helper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of completable unlocked keys.
    pub fn set_unlocked_keys(&mut self, keys: Vec<String>) {
        self.unlocked_keys = keys;
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];

        // Command-name position.
        if prefix.starts_with(':') && !prefix.contains(char::is_whitespace) {
            let candidates = COMMAND_NAMES
                .iter()
                .filter(|name| name.starts_with(prefix))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            return Ok((0, candidates));
        }

        // Unlocked code names after ":fav ".
        for fav in [":fav ", ":f "] {
            if let Some(arg) = prefix.strip_prefix(fav) {
                let candidates = self
                    .unlocked_keys
                    .iter()
                    .filter(|key| key.to_lowercase().starts_with(&arg.to_lowercase()))
                    .map(|key| Pair {
                        display: key.clone(),
                        replacement: key.clone(),
                    })
                    .collect();
                return Ok((fav.len(), candidates));
            }
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
