//! Interactive terminal round against the optimal AI

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::{
    board::{Board, Coord, Player},
    error::Error,
    game::{Game, GameOutcome},
    strategy::AiStrategy,
};

/// Symbol choice on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Symbol {
    X,
    O,
}

impl From<Symbol> for Player {
    fn from(symbol: Symbol) -> Player {
        match symbol {
            Symbol::X => Player::X,
            Symbol::O => Player::O,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Symbol the AI plays in the first round (X always moves first)
    #[arg(long, value_enum, default_value = "o")]
    ai: Symbol,

    /// Seed for the AI's move tie-breaking, for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let ai_player = Player::from(args.ai);
    let mut strategy = AiStrategy::new(ai_player, ai_player.opponent())?;
    if let Some(seed) = args.seed {
        strategy = strategy.with_seed(seed);
    }

    let mut game = Game::new(strategy);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!(
            "You play {}, the AI plays {}. X moves first.",
            game.human_player(),
            game.ai_player()
        );

        if game.ai_opens() {
            let coord = game.ai_move()?;
            println!("AI opens at {coord}.");
        }

        while !game.is_over() {
            render(game.board());
            let Some(coord) = prompt_move(&mut lines)? else {
                println!("Bye.");
                return Ok(());
            };

            match game.human_move(coord) {
                Ok(_) => {}
                Err(Error::CellOccupied { coord }) => {
                    println!("Cell {coord} is taken, try another.");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            if game.is_over() {
                break;
            }

            let coord = game.ai_move()?;
            println!("AI plays {coord}.");
        }

        render(game.board());
        match game.outcome() {
            Some(GameOutcome::Win(winner)) if winner == game.ai_player() => {
                println!("The AI wins.");
            }
            Some(GameOutcome::Win(_)) => println!("You win!"),
            _ => println!("It's a draw."),
        }

        if !prompt_again(&mut lines)? {
            return Ok(());
        }

        // Swap symbols so first move alternates between rounds
        game.reset(true);
        println!();
    }
}

/// Draw the board with coordinate axes
fn render(board: &Board) {
    println!();
    println!("    x 0   1   2");
    for y in 0..3 {
        if y > 0 {
            println!("     ---+---+---");
        }
        let row: Vec<String> = (0..3)
            .map(|x| board.get(x, y).to_char().to_string())
            .collect();
        println!("  y{}  {} | {} | {}", y, row[0], row[1], row[2]);
    }
    println!();
}

/// Read a move as `x y`, re-prompting until the input is well-formed.
///
/// Returns `None` when the player quits or input ends.
fn prompt_move<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<Coord>> {
    loop {
        print!("Your move (x y, or q to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() == 2 {
            if let (Ok(x), Ok(y)) = (parts[0].parse::<usize>(), parts[1].parse::<usize>()) {
                if x < 3 && y < 3 {
                    return Ok(Some(Coord::new(x, y)));
                }
            }
        }

        println!("Enter two numbers between 0 and 2, like '1 2'.");
    }
}

fn prompt_again<B: BufRead>(lines: &mut io::Lines<B>) -> Result<bool> {
    print!("Play again with roles swapped? (y/n): ");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(line?.trim().eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}
