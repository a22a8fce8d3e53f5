//! Interactive shell for playing the game in a terminal.
//!
//! Plain lines are submitted as codes; `:` commands inspect and manage
//! progress (`:help` lists them). Line editing, history, and completion come
//! from rustyline.

pub mod commands;
pub mod helper;

use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, Config, Editor};

use crate::engine::catalog::{CodeEntry, Content};
use crate::session::{ListFilter, Outcome, Session, Snapshot, Storage};

pub use commands::{parse, Command};
pub use helper::ShellHelper;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the shell until the player quits or the input ends.
///
/// When `history_path` is given, line history is loaded from and saved to
/// that file.
pub fn run<S: Storage>(
    session: &mut Session<S>,
    history_path: Option<&Path>,
) -> rustyline::Result<()> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut editor: Editor<ShellHelper, FileHistory> = Editor::with_config(config)?;
    editor.set_helper(Some(ShellHelper::new()));
    if let Some(path) = history_path {
        // Missing history is fine on first run.
        let _ = editor.load_history(path);
    }

    println!("cofre v{VERSION}");
    let progress = session.progress();
    println!(
        "{} of {} codes unlocked. Type a code, or :help for commands.\n",
        progress.unlocked, progress.total
    );

    loop {
        if let Some(helper) = editor.helper_mut() {
            let keys = session
                .list(&ListFilter::default())
                .into_iter()
                .map(|e| e.key.clone())
                .collect();
            helper.set_unlocked_keys(keys);
        }

        let line = match editor.readline("cofre> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        let _ = editor.add_history_entry(line.as_str());

        match command {
            Command::Quit => break,
            Command::Reset => {
                let answer =
                    editor.readline("This erases all progress. Type 'yes' to confirm: ")?;
                if answer.trim().eq_ignore_ascii_case("yes") {
                    session.reset();
                    println!("Progress reset.");
                } else {
                    println!("Kept everything.");
                }
            }
            other => execute(session, other),
        }
    }

    if let Some(path) = history_path {
        if let Err(e) = editor.save_history(path) {
            eprintln!("Could not save history: {e}");
        }
    }
    println!("Goodbye!");
    Ok(())
}

fn execute<S: Storage>(session: &mut Session<S>, command: Command) {
    match command {
        Command::Submit(code) => {
            let outcome = session.submit(&code);
            report(session, outcome);
        }
        Command::List { search } => {
            let entries = session.list(&ListFilter {
                search: search.as_deref(),
                ..Default::default()
            });
            print_entries(session, &entries);
        }
        Command::Favorites => {
            let entries = session.list(&ListFilter {
                favorites_only: true,
                ..Default::default()
            });
            print_entries(session, &entries);
        }
        Command::ToggleFavorite(key) => match session.toggle_favorite(&key) {
            Ok(true) => println!("Added '{key}' to favorites."),
            Ok(false) => println!("Removed '{key}' from favorites."),
            Err(e) => eprintln!("{e}"),
        },
        Command::Progress => {
            let progress = session.progress();
            println!(
                "Unlocked {} of {} codes ({}%).",
                progress.unlocked,
                progress.total,
                progress.percent()
            );
            let earned = session.earned_achievements();
            if !earned.is_empty() {
                println!("Achievements: {}", earned.join(", "));
            }
        }
        Command::Categories => {
            for category in session.categories() {
                println!("{category}");
            }
        }
        Command::Export(path) => match session.export().to_json() {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("Progress exported to {}.", path.display()),
                Err(e) => eprintln!("Could not write {}: {e}", path.display()),
            },
            Err(e) => eprintln!("Could not encode snapshot: {e}"),
        },
        Command::Import(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Snapshot::from_json(&json) {
                Ok(snapshot) => {
                    session.import(snapshot);
                    let progress = session.progress();
                    println!(
                        "Progress imported: {} of {} codes unlocked.",
                        progress.unlocked, progress.total
                    );
                }
                Err(e) => eprintln!("Invalid snapshot file: {e}"),
            },
            Err(e) => eprintln!("Could not read {}: {e}", path.display()),
        },
        Command::Help => print_help(),
        // Handled by the caller.
        Command::Reset | Command::Quit => {}
    }
}

fn report<S: Storage>(session: &Session<S>, outcome: Outcome) {
    for line in render_outcome(session, &outcome) {
        println!("{line}");
    }
}

/// Lines to show for a submission outcome.
///
/// The close-match message is deliberately vague: the nearby key stays in
/// `Outcome::Close` for programmatic callers, but printing it would hand the
/// player the secret.
fn render_outcome<S: Storage>(session: &Session<S>, outcome: &Outcome) -> Vec<String> {
    let mut lines = Vec::new();
    match outcome {
        Outcome::EmptyInput => lines.push("Enter a valid code.".to_string()),
        Outcome::Unlocked {
            key,
            newly_unlocked,
            achievements,
        } => {
            if *newly_unlocked {
                lines.push(format!("Code unlocked: {key}"));
            } else {
                lines.push(format!("Already unlocked: {key}"));
            }
            if let Some(entry) = session.catalog().get_by_key(key) {
                lines.push(content_line(entry));
            }
            for achievement in achievements {
                lines.push(format!("Achievement unlocked: {}", achievement.message));
            }
        }
        Outcome::Close { failure, .. } => {
            lines.push(
                "You're on the right track. Check for a missing part or letter.".to_string(),
            );
            if let Some(failure) = failure {
                lines.push(failure_tail(failure));
            }
        }
        Outcome::Incorrect { failure } => match &failure.hint {
            Some(hint) => lines.push(format!("Hint: {}", hint.text)),
            None => lines.push(format!(
                "Incorrect code. Failed attempts: {} of {}. Keep trying.",
                failure.attempts, failure.max
            )),
        },
    }
    lines
}

fn failure_tail(failure: &crate::session::FailureStatus) -> String {
    match &failure.hint {
        Some(hint) => format!("Hint: {}", hint.text),
        None => format!(
            "(counted as a failed attempt: {} of {})",
            failure.attempts, failure.max
        ),
    }
}

fn content_line(entry: &CodeEntry) -> String {
    match &entry.content {
        Content::Text(text) => text.clone(),
        Content::Image(path) => format!("[image] {path}"),
        Content::Audio(path) => format!("[audio] {path}"),
        Content::Video(url) => format!("[video] {url}"),
        Content::Link(url) => format!("[link] {url}"),
        Content::Download { url, name } => format!("[download] {name} ({url})"),
    }
}

fn print_entries<S: Storage>(session: &Session<S>, entries: &[&CodeEntry]) {
    if entries.is_empty() {
        println!("Nothing here yet.");
        return;
    }
    for entry in entries {
        let marker = if session.is_favorite(&entry.key) {
            "*"
        } else {
            " "
        };
        println!("{marker} {} [{}]", entry.key, entry.category);
    }
}

fn print_help() {
    println!("Type a secret code to try it. Commands:");
    println!("  :list [filter]   unlocked codes, optionally filtered");
    println!("  :favs            favorite codes");
    println!("  :fav <code>      toggle a favorite");
    println!("  :progress        unlock progress and achievements");
    println!("  :categories      categories unlocked so far");
    println!("  :export <file>   write a progress snapshot");
    println!("  :import <file>   load a progress snapshot");
    println!("  :reset           erase all progress");
    println!("  :quit            leave");
}
