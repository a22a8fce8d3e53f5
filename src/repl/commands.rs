//! Shell command parsing.
//!
//! Plain lines are code submissions; lines starting with `:` are commands.

use std::path::PathBuf;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a code to the game.
    Submit(String),
    /// List unlocked codes, optionally filtered by a search term.
    List { search: Option<String> },
    /// List favorite codes.
    Favorites,
    /// Toggle a code in the favorites set.
    ToggleFavorite(String),
    /// Show unlock progress and earned achievements.
    Progress,
    /// Show the categories unlocked so far.
    Categories,
    /// Write a progress snapshot to a file.
    Export(PathBuf),
    /// Load a progress snapshot from a file.
    Import(PathBuf),
    /// Clear all progress (asks for confirmation).
    Reset,
    /// Show the command summary.
    Help,
    /// Leave the shell.
    Quit,
}

/// Parse one input line. `None` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with(':') {
        return Ok(Some(Command::Submit(line.to_string())));
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or(line);
    let rest = parts.next().map(str::trim).filter(|r| !r.is_empty());

    let command = match head {
        ":list" | ":l" => Command::List {
            search: rest.map(str::to_string),
        },
        ":favs" => Command::Favorites,
        ":fav" | ":f" => Command::ToggleFavorite(
            rest.ok_or_else(|| "usage: :fav <code>".to_string())?.to_string(),
        ),
        ":progress" | ":p" => Command::Progress,
        ":categories" => Command::Categories,
        ":export" => Command::Export(PathBuf::from(
            rest.ok_or_else(|| "usage: :export <file>".to_string())?,
        )),
        ":import" => Command::Import(PathBuf::from(
            rest.ok_or_else(|| "usage: :import <file>".to_string())?,
        )),
        ":reset" => Command::Reset,
        ":help" | ":h" | ":?" => Command::Help,
        ":quit" | ":q" | ":exit" => Command::Quit,
        other => return Err(format!("Unknown command: {other} (try :help)")),
    };
    Ok(Some(command))
}

/// All command spellings, for completion.
pub const COMMAND_NAMES: &[&str] = &[
    ":list",
    ":favs",
    ":fav",
    ":progress",
    ":categories",
    ":export",
    ":import",
    ":reset",
    ":help",
    ":quit",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_submission() {
        assert_eq!(
            parse("te amo").unwrap(),
            Some(Command::Submit("te amo".to_string()))
        );
    }

    #[test]
    fn test_blank_line_is_nothing() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            parse(":list sof").unwrap(),
            Some(Command::List {
                search: Some("sof".to_string())
            })
        );
        assert_eq!(parse(":list").unwrap(), Some(Command::List { search: None }));
        assert_eq!(
            parse(":fav Te Amo").unwrap(),
            Some(Command::ToggleFavorite("Te Amo".to_string()))
        );
        assert_eq!(
            parse(":export out.json").unwrap(),
            Some(Command::Export(PathBuf::from("out.json")))
        );
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        assert!(parse(":fav").is_err());
        assert!(parse(":export  ").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse(":nope").is_err());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse(":q").unwrap(), Some(Command::Quit));
        assert_eq!(parse(":?").unwrap(), Some(Command::Help));
        assert_eq!(parse(":p").unwrap(), Some(Command::Progress));
    }
}
