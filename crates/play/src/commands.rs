//! Parsing of the lines typed at the prompt.

use std::str::FromStr;

use chess_core::{ChessError, Move, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A bare square: one click of the select-then-target gesture.
    Click(Square),
    /// Coordinate move such as `e2e4` or `e7e8q`.
    Move(Move),
    Moves(Square),
    Board,
    Fen,
    New,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),

    #[error("`{0}` needs a square, e.g. `{0} e2`")]
    MissingSquare(&'static str),

    #[error(transparent)]
    Notation(#[from] ChessError),
}

pub const HELP: &str = "\
commands:
  e2        click a square: first your piece, then where it goes
  e2e4      play a move directly (e7e8q promotes to a queen; q r b n)
  moves e2  list where the piece on e2 may go
  board     print the board
  fen       print the position as FEN
  new       start a new game
  help      this text
  quit      leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let cmd = match head.to_ascii_lowercase().as_str() {
            "board" | "b" => Command::Board,
            "fen" => Command::Fen,
            "new" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "moves" | "m" => {
                let square = words.next().ok_or(CommandError::MissingSquare("moves"))?;
                Command::Moves(square.parse()?)
            }
            word if word.len() == 2 => Command::Click(word.parse()?),
            word if word.len() == 4 || word.len() == 5 => Command::Move(word.parse()?),
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(cmd)
    }
}
