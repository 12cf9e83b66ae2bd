//! Typed commands, one per input line.
//!
//! Row numbers are the 1-based indices shown on screen. They are resolved
//! to the gesture bound on that row, so the action always targets the item
//! the user saw.

use thiserror::Error;
use todo_view::ActionKind;

pub const HELP: &str = "\
commands:
  add <title>     create a task
  toggle <n>      complete or reopen task n
  up <n>          move active task n up
  down <n>        move active task n down
  delete <n>      delete task n (alias: rm)
  show <n>        fetch task n from the server (alias: s)
  reload          fetch the list again
  help            show this text
  quit            exit (alias: q)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Row { kind: ActionKind, row: usize },
    Show { row: usize },
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("expected a row number, got `{0}`")]
    BadRow(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let kind = match name {
        "" => return Err(ParseError::Empty),
        // Blank titles are passed through; the view-model ignores them.
        "add" | "a" => return Ok(Command::Add(rest.to_string())),
        "reload" | "r" => return Ok(Command::Reload),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "show" | "s" => return parse_row(rest).map(|row| Command::Show { row }),
        "toggle" | "t" => ActionKind::Toggle,
        "up" | "u" => ActionKind::Up,
        "down" | "d" => ActionKind::Down,
        "delete" | "rm" => ActionKind::Delete,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    parse_row(rest).map(|row| Command::Row { kind, row })
}

fn parse_row(arg: &str) -> Result<usize, ParseError> {
    match arg.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(ParseError::BadRow(arg.to_string())),
    }
}
