//! One terminal game: the player's commands on one side, an engine on the
//! other.

use std::io::Write;

use chess_core::{ClickOutcome, Engine, Game, GameStatus, MoveOutcome, Side, Square};
use tracing::{info, warn};

use crate::commands::{Command, HELP};
use crate::config::PlayConfig;
use crate::error::PlayError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    game: Game,
    engine: Box<dyn Engine>,
    human: Side,
    max_plies: u32,
}

impl Session {
    pub fn new(config: &PlayConfig, engine: Box<dyn Engine>) -> Self {
        Self {
            game: Game::new(config.rules()),
            engine,
            human: config.human_side,
            max_plies: config.max_plies,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Shows the board and lets the engine open when it has White.
    pub fn start(&mut self, out: &mut impl Write) -> Result<(), PlayError> {
        writeln!(out, "you play {} against {}", self.human, self.engine.name())?;
        self.engine_turns(out)?;
        writeln!(out, "{}", self.game.position())?;
        Ok(())
    }

    pub fn handle(&mut self, cmd: Command, out: &mut impl Write) -> Result<Flow, PlayError> {
        match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Board => writeln!(out, "{}", self.game.position())?,
            Command::Fen => writeln!(out, "{}", self.game.position().to_fen())?,
            Command::New => {
                self.game = Game::new(self.game.rules());
                self.engine.new_game();
                info!("new game");
                self.start(out)?;
            }
            Command::Moves(square) => self.list_moves(square, out)?,
            Command::Click(square) => self.click(square, out)?,
            Command::Move(mv) => {
                if self.refuse_if_finished(out)? {
                    return Ok(Flow::Continue);
                }
                match self.game.play_move(mv) {
                    Ok(played) => self.after_human(played, out)?,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn list_moves(&self, square: Square, out: &mut impl Write) -> Result<(), PlayError> {
        let Some(piece) = self.game.position().piece_at(square) else {
            writeln!(out, "{square} is empty")?;
            return Ok(());
        };
        let dests = self.game.destinations(square);
        writeln!(
            out,
            "{} {:?} on {square}: {}",
            piece.side,
            piece.kind,
            join_squares(&dests)
        )?;
        Ok(())
    }

    fn click(&mut self, square: Square, out: &mut impl Write) -> Result<(), PlayError> {
        if self.refuse_if_finished(out)? {
            return Ok(());
        }
        match self.game.click(square) {
            Ok(ClickOutcome::Ignored) => writeln!(out, "no piece of yours on {square}")?,
            Ok(ClickOutcome::Selected(from)) => {
                let dests = self.game.destinations(from);
                writeln!(out, "selected {from}, targets: {}", join_squares(&dests))?;
            }
            Ok(ClickOutcome::Cancelled) => writeln!(out, "selection cleared")?,
            Ok(ClickOutcome::Commit { .. }) => {
                if let Some(&played) = self.game.history().last() {
                    self.after_human(played, out)?;
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        Ok(())
    }

    fn after_human(&mut self, played: MoveOutcome, out: &mut impl Write) -> Result<(), PlayError> {
        writeln!(out, "you play {}", describe(&played))?;
        self.engine_turns(out)?;
        writeln!(out, "{}", self.game.position())?;
        Ok(())
    }

    /// Lets the engine move for as long as it is the engine's turn.
    fn engine_turns(&mut self, out: &mut impl Write) -> Result<(), PlayError> {
        while !self.finished(out)? && self.game.side_to_move() != self.human {
            let Some(mv) = self
                .engine
                .select_move(self.game.position(), self.game.rules())
            else {
                break;
            };
            match self.game.play_move(mv) {
                Ok(played) => writeln!(out, "{} plays {}", self.engine.name(), describe(&played))?,
                Err(e) => {
                    warn!(%mv, error = %e, "engine move refused");
                    break;
                }
            }
        }
        Ok(())
    }

    fn refuse_if_finished(&self, out: &mut impl Write) -> Result<bool, PlayError> {
        if self.is_finished() {
            writeln!(out, "the game is over, type `new` to play again")?;
            return Ok(true);
        }
        if self.game.side_to_move() != self.human {
            writeln!(out, "not your turn")?;
            return Ok(true);
        }
        Ok(false)
    }

    fn is_finished(&self) -> bool {
        self.ply_limit_reached() || self.game.status().is_over()
    }

    fn ply_limit_reached(&self) -> bool {
        self.game.history().len() >= self.max_plies as usize
    }

    /// Announces the result when the game has just ended.
    fn finished(&self, out: &mut impl Write) -> Result<bool, PlayError> {
        if self.ply_limit_reached() {
            info!(plies = self.max_plies, "game over: ply limit reached");
            writeln!(out, "draw: {} half-moves played", self.max_plies)?;
            return Ok(true);
        }
        let status = self.game.status();
        let verdict = match status {
            GameStatus::Ongoing => return Ok(false),
            GameStatus::Checkmate { winner } => format!("checkmate, {winner} wins"),
            GameStatus::Stalemate => "stalemate".to_string(),
            GameStatus::KingCaptured { winner } => format!("king captured, {winner} wins"),
        };
        info!(?status, "game over");
        writeln!(out, "{verdict}")?;
        Ok(true)
    }
}

fn describe(played: &MoveOutcome) -> String {
    let mut text = played.as_move().to_string();
    if played.castle.is_some() {
        text.push_str(" (castles)");
    } else if played.en_passant {
        text.push_str(" (en passant)");
    } else if let Some(captured) = played.captured {
        text.push_str(&format!(" (takes {:?})", captured.kind));
    }
    text
}

fn join_squares(squares: &[Square]) -> String {
    if squares.is_empty() {
        return "none".to_string();
    }
    squares
        .iter()
        .map(Square::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
