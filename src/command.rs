//! Protocol command parsing.
//!
//! One request per line; the first whitespace-separated token names the command.

use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

pub const EXIT: &str = "exit";
pub const GET_PARAGRAPH: &str = "getprg";
pub const GET_PARAGRAPH_COUNT: &str = "getnumprgs";

/// A parsed request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `getprg <n>`
    GetParagraph(usize),
    /// `getnumprgs`
    GetParagraphCount,
    /// `exit`
    Exit,
    /// Unrecognized or empty line; produces no output
    Ignored,
}

/// A `getprg` request whose index could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("missing paragraph index for getprg")]
    MissingIndex,

    #[error("invalid paragraph index for getprg: '{value}'")]
    InvalidIndex {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some(EXIT) => Ok(Command::Exit),
            Some(GET_PARAGRAPH_COUNT) => Ok(Command::GetParagraphCount),
            Some(GET_PARAGRAPH) => {
                let value = tokens.next().ok_or(CommandError::MissingIndex)?;
                value
                    .parse::<usize>()
                    .map(Command::GetParagraph)
                    .map_err(|source| CommandError::InvalidIndex {
                        value: value.to_string(),
                        source,
                    })
            }
            _ => Ok(Command::Ignored),
        }
    }
}
