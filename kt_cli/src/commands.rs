use std::fmt;

/// A line typed at the prompt, parsed.
///
/// Match numbers and queue positions are 1-based here, as they are shown
/// on screen. [`crate::session::Session`] converts them to the engine's
/// 0-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a tournament. Table count and streak fall back to the
    /// configured defaults when not given.
    Start {
        names: Vec<String>,
        tables: Option<i64>,
        streak: Option<i64>,
    },
    Add(String),
    Win { match_number: usize, winner: String },
    Remove(usize),
    Status(String),
    Undo,
    Reset,
    Show,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A command was given without its required argument.
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
    /// Not a positive whole number.
    InvalidNumber(String),
    /// A `key=value` option on `start` that isn't known or can't be read.
    InvalidOption(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { command, usage } => {
                write!(f, "'{}' needs more input (e.g., '{}')", command, usage)
            }
            Self::InvalidNumber(value) => write!(
                f,
                "Invalid number '{}'. Use the number shown on screen (e.g., 'win 1 alice')",
                value
            ),
            Self::InvalidOption(option) => write!(
                f,
                "Invalid option '{}'. Use 'tables=N' or 'streak=N' before the names",
                option
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use kt_cli::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("undo"), Ok(Command::Undo));
/// assert_eq!(
///     parse_command("win 2 Bob"),
///     Ok(Command::Win { match_number: 2, winner: "Bob".to_string() })
/// );
/// assert!(matches!(parse_command("start Ann, Ben, Cat"), Ok(Command::Start { .. })));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "undo" => return Ok(Command::Undo),
        "reset" => return Ok(Command::Reset),
        "show" | "" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // The keyword is the first word, everything after it is the argument
    let (keyword, rest) = split_word(trimmed);
    match keyword {
        "start" => parse_start_command(rest),
        "add" => Ok(Command::Add(required(rest, "add", "add alice")?.to_string())),
        "win" => parse_win_command(rest),
        "remove" => {
            let position = required(rest, "remove", "remove 2")?;
            Ok(Command::Remove(parse_number(position)?))
        }
        "status" => Ok(Command::Status(
            required(rest, "status", "status alice")?.to_string(),
        )),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a start command: "start [tables=N] [streak=N] NAME, NAME, ..."
///
/// Names are comma separated so they may contain spaces. Without any comma
/// every word is a name.
fn parse_start_command(rest: &str) -> Result<Command, ParseError> {
    let mut tables = None;
    let mut streak = None;
    let mut rest = rest;

    loop {
        let (word, remaining) = split_word(rest);
        let Some((key, value)) = word.split_once('=') else {
            break;
        };
        let value = value
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidOption(word.to_string()))?;
        match key {
            "tables" => tables = Some(value),
            "streak" => streak = Some(value),
            _ => return Err(ParseError::InvalidOption(word.to_string())),
        }
        rest = remaining;
    }

    let names: Vec<String> = if rest.contains(',') {
        rest.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        rest.split_whitespace().map(str::to_string).collect()
    };
    if names.is_empty() {
        return Err(ParseError::MissingArgument {
            command: "start",
            usage: "start alice, bob, carol",
        });
    }

    Ok(Command::Start {
        names,
        tables,
        streak,
    })
}

/// Parse a win command: "win MATCH NAME"
fn parse_win_command(rest: &str) -> Result<Command, ParseError> {
    const USAGE: &str = "win 1 alice";

    let (number, winner) = split_word(required(rest, "win", USAGE)?);
    let winner = required(winner, "win", USAGE)?;
    Ok(Command::Win {
        match_number: parse_number(number)?,
        winner: winner.to_string(),
    })
}

/// Split off the first word. The remainder has surrounding whitespace
/// removed.
fn split_word(input: &str) -> (&str, &str) {
    input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(word, rest)| (word, rest.trim()))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument { command, usage })
    } else {
        Ok(rest)
    }
}

/// Numbers on screen start at 1, so 0 is rejected too.
fn parse_number(value: &str) -> Result<usize, ParseError> {
    match value.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ParseError::InvalidNumber(value.to_string())),
    }
}
