//! Parsing of typed shell lines.

use crate::app::Mode;
use crate::calculator::{Key, ScientificFn, parse_keys};

/// One line of shell input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Keypad presses, e.g. `7+3=`.
    Keys(Vec<Key>),
    /// A scientific function key, e.g. `:sqrt`.
    Function(ScientificFn),
    Mode(Mode),
    /// `:history` toggles the panel; `:history <query>` searches it.
    History(Option<String>),
    /// 1-based position in the history panel, converted to an index.
    Recall(usize),
    ClearHistory,
    Copy,
    /// Free text submitted to the assistant.
    Problem(String),
    Help,
    Quit,
}

/// Parse a line typed in `mode`.
///
/// Returns `Ok(None)` for blank lines and an error message for anything
/// that is neither a command nor valid input for the mode.
pub fn parse_line(line: &str, mode: Mode) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = trimmed.strip_prefix(':') {
        return parse_command(rest).map(Some);
    }

    if mode == Mode::AiAssistant {
        return Ok(Some(Command::Problem(trimmed.to_string())));
    }

    parse_keys(trimmed)
        .map(|keys| Some(Command::Keys(keys)))
        .ok_or_else(|| format!("'{}' is not a keypad sequence (type :help)", trimmed))
}

fn parse_command(rest: &str) -> Result<Command, String> {
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    match (name.to_lowercase().as_str(), arg) {
        ("mode" | "m", Some(mode)) => mode.parse().map(Command::Mode),
        ("mode" | "m", None) => Err("usage: :mode <standard|scientific|ai>".to_string()),
        ("history" | "h", query) => Ok(Command::History(query.map(str::to_string))),
        ("recall" | "r", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Recall(n - 1)),
            _ => Err(format!("'{}' is not a history position", n)),
        },
        ("recall" | "r", None) => Err("usage: :recall <n>".to_string()),
        ("clear-history", None) => Ok(Command::ClearHistory),
        ("copy" | "y", None) => Ok(Command::Copy),
        ("help" | "?", None) => Ok(Command::Help),
        ("quit" | "q" | "exit", None) => Ok(Command::Quit),
        (other, None) => other
            .parse::<ScientificFn>()
            .map(Command::Function)
            .map_err(|_| format!("unknown command ':{}' (type :help)", other)),
        (other, Some(_)) => Err(format!("':{}' takes no argument", other)),
    }
}
