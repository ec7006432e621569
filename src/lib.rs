//! Tic-tac-toe engine with a provably optimal minimax AI
//!
//! This crate provides:
//! - A value-semantics 3x3 board with terminal detection
//! - A generic minimax search with uniform random tie-breaking
//! - The tic-tac-toe specialisation that plays optimally as either symbol
//! - A round driver and terminal CLI for interactive play and analysis

pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod lines;
pub mod minimax;
pub mod strategy;

pub use board::{Board, Cell, Coord, Player, Status};
pub use error::{Error, Result};
pub use game::{Game, GameOutcome, Move};
pub use minimax::Minimax;
pub use strategy::{AiRules, AiStrategy, Score};
