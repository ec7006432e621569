//! Round management
//!
//! Drives one game at a time between a human and the AI: records moves,
//! tracks the outcome, and enforces the turn discipline the board itself
//! does not carry.

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Cell, Coord, Player, Status},
    error::{Error, Result},
    strategy::AiStrategy,
};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub coord: Coord,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// One round of play with history.
///
/// X always moves first. Which side holds X is decided by the strategy's
/// symbol assignment and may be swapped between rounds via
/// [`reset`](Game::reset), which is how first move alternates.
#[derive(Debug)]
pub struct Game {
    board: Board,
    ai: AiStrategy,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Start a round on an empty board
    pub fn new(ai: AiStrategy) -> Self {
        Game {
            board: Board::new(),
            ai,
            moves: Vec::new(),
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn ai_player(&self) -> Player {
        self.ai.ai_player()
    }

    pub fn human_player(&self) -> Player {
        self.ai.human_player()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// True when the AI holds X on a fresh board. The driver must then
    /// invoke [`ai_move`](Game::ai_move) once before accepting human
    /// input, so the round opens with the AI's mark.
    pub fn ai_opens(&self) -> bool {
        self.moves.is_empty() && self.ai.ai_player() == Player::X
    }

    /// Apply the human player's move.
    ///
    /// Returns the board status after the move so the caller can decide
    /// whether the AI responds or the round is over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when the round is finished and
    /// [`Error::CellOccupied`] when the target cell is not empty.
    pub fn human_move(&mut self, coord: Coord) -> Result<Status> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.board.get(coord.x, coord.y) != Cell::Empty {
            return Err(Error::CellOccupied { coord });
        }

        let human = self.ai.human_player();
        self.board.set(coord.x, coord.y, human.to_cell());
        self.record(coord, human);
        Ok(self.board.status())
    }

    /// Let the AI take its turn; returns where it played.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] when the round is finished.
    pub fn ai_move(&mut self) -> Result<Coord> {
        if self.is_over() {
            return Err(Error::GameOver);
        }

        let coord = self.ai.make_move(&mut self.board)?;
        let ai = self.ai.ai_player();
        self.record(coord, ai);
        Ok(coord)
    }

    fn record(&mut self, coord: Coord, player: Player) {
        self.moves.push(Move { coord, player });
        self.outcome = match self.board.status() {
            Status::Won(winner) => Some(GameOutcome::Win(winner)),
            Status::Draw => Some(GameOutcome::Draw),
            Status::Ongoing => None,
        };
    }

    /// Clear the board for a new round.
    ///
    /// With `swap_roles` the two sides exchange symbols, so the side that
    /// moved second last round holds X and moves first in the next one.
    pub fn reset(&mut self, swap_roles: bool) {
        self.board.clear();
        self.moves.clear();
        self.outcome = None;
        if swap_roles {
            self.ai.swap_roles();
        }
    }
}
