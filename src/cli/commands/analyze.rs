//! Optimal-move analysis for board positions
//!
//! Computes the minimax value of every legal move in a position, the set
//! of optimal moves, and the immediate tactical squares (wins and forced
//! blocks) for the side to move.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::{
    board::{Board, Coord, Player, Status},
    error::Error,
    lines::LineAnalyzer,
    minimax::Minimax,
    strategy::{AiRules, Score},
};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Board position as 9 row-major cells ('.', 'X', 'O'), e.g. "XO..X...."
    #[arg(long)]
    state: Option<String>,

    /// Write the analysis as JSON
    #[arg(long)]
    export: Option<PathBuf>,
}

/// Full evaluation of one position for the side to move
#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub board: String,
    pub to_move: Player,
    pub values: Vec<MoveValue>,
    pub optimal: Vec<Coord>,
    pub winning_now: Vec<Coord>,
    pub must_block: Vec<Coord>,
}

#[derive(Debug, Serialize)]
pub struct MoveValue {
    pub coord: Coord,
    pub value: Score,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let mut reports = Vec::new();

    if let Some(s) = &args.state {
        let board = Board::from_string(s)?;
        println!("=== Analysis for Custom State ===");
        reports.push(analyze_position(&board, "Custom state")?);
    } else {
        println!("=== Optimal Play Analysis ===");
        println!("Showing move values for key positions:");

        let empty = Board::new();
        reports.push(analyze_position(&empty, "Empty board")?);

        let center = Board::from_string("....X....")?;
        reports.push(analyze_position(&center, "Center taken by X")?);

        let corner = Board::from_string("X........")?;
        reports.push(analyze_position(&corner, "Corner taken by X")?);
    }

    if let Some(path) = &args.export {
        export_reports(&reports, path)?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}

/// Write the position reports as pretty-printed JSON
fn export_reports(reports: &[PositionReport], path: &Path) -> crate::Result<()> {
    let file = std::fs::File::create(path).map_err(|source| Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    serde_json::to_writer_pretty(file, reports)?;
    Ok(())
}

/// Evaluate a position from the viewpoint of the side to move
pub fn evaluate_position(board: &Board) -> Result<PositionReport> {
    let to_move = board.to_move();
    let rules = AiRules::new(to_move, to_move.opponent())?;

    let mut values = Vec::new();
    let mut optimal: Vec<Coord> = Vec::new();
    let mut best = None;

    for coord in rules.possible_actions(board) {
        let value = rules.action_value(board, &coord);
        values.push(MoveValue { coord, value });

        match best {
            Some(b) if value < b => {}
            Some(b) if value == b => optimal.push(coord),
            _ => {
                best = Some(value);
                optimal.clear();
                optimal.push(coord);
            }
        }
    }

    let mut winning_now: Vec<Coord> = LineAnalyzer::winning_moves(board.cells(), to_move)
        .into_iter()
        .map(Coord::from_index)
        .collect();
    winning_now.sort();

    let mut must_block: Vec<Coord> =
        LineAnalyzer::winning_moves(board.cells(), to_move.opponent())
            .into_iter()
            .map(Coord::from_index)
            .collect();
    must_block.sort();

    Ok(PositionReport {
        board: board.encode(),
        to_move,
        values,
        optimal,
        winning_now,
        must_block,
    })
}

fn analyze_position(board: &Board, description: &str) -> Result<PositionReport> {
    println!("\n{description}:");
    println!("{board}");

    if board.status() != Status::Ongoing {
        println!("  (state is terminal)");
        return Ok(PositionReport {
            board: board.encode(),
            to_move: board.to_move(),
            values: Vec::new(),
            optimal: Vec::new(),
            winning_now: Vec::new(),
            must_block: Vec::new(),
        });
    }

    let report = evaluate_position(board)?;

    println!("{} to move.", report.to_move);
    for entry in &report.values {
        println!("  {}  {}", entry.coord, describe(entry.value));
    }

    println!("Optimal moves:");
    for coord in &report.optimal {
        println!("  - {coord}");
    }

    if !report.winning_now.is_empty() {
        println!("Immediate wins: {}", join(&report.winning_now));
    }
    if !report.must_block.is_empty() {
        println!("Must block: {}", join(&report.must_block));
    }

    Ok(report)
}

fn describe(value: Score) -> &'static str {
    match value {
        Score::Win => "win",
        Score::Draw => "draw",
        Score::Loss => "loss",
    }
}

fn join(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
