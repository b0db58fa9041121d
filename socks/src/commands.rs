//! Parsing of typed player commands.

use matching::Position;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Type a command (help lists them)")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid tile number: {0}")]
    InvalidNumber(String),
}

/// A single player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deal a new round, optionally switching level.
    NewRound { level: Option<String> },
    /// Reshuffle the unmatched socks.
    Mix,
    /// Tap a tile (0-based position).
    Tap(Position),
    Levels,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <n> | tap <n>       tap tile number n
  mix                 mix the unpaired socks
  new [level]         start a new round (optionally at another level)
  level <level>       switch level and start a new round
  levels              list levels
  help                show this help
  quit                leave";

/// Parse one input line. Tile numbers are 1-based, as shown on screen.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let arg = words.next();

    match head.to_ascii_lowercase().as_str() {
        "tap" | "t" => {
            let n = arg.ok_or(CommandError::MissingArgument("tap"))?;
            parse_tile(n).map(Command::Tap)
        }
        "mix" | "m" => Ok(Command::Mix),
        "new" | "n" => Ok(Command::NewRound {
            level: arg.map(str::to_string),
        }),
        "level" => {
            let level = arg.ok_or(CommandError::MissingArgument("level"))?;
            Ok(Command::NewRound {
                level: Some(level.to_string()),
            })
        }
        "levels" => Ok(Command::Levels),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other if other.chars().all(|c| c.is_ascii_digit()) => parse_tile(other).map(Command::Tap),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_tile(s: &str) -> Result<Position, CommandError> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidNumber(s.to_string())),
    }
}
