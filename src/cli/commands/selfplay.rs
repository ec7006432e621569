//! Exhaustive adversarial sweep
//!
//! Plays the AI in both roles against every opponent reply sequence,
//! following every minimax-optimal AI move rather than sampling the
//! tie-break, and tallies the terminal outcomes. An optimal player never
//! loses; the sweep proves it by enumeration.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use indicatif::ProgressBar;
use serde::Serialize;

use crate::{
    board::{Board, Coord, Player, Status},
    cli::output,
    minimax::Minimax,
    strategy::AiRules,
};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Write per-opening outcome counts as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Terminal outcome tally from the AI's viewpoint
#[derive(Debug, Default, Clone, Copy)]
pub struct OutcomeCounts {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn absorb(&mut self, other: OutcomeCounts) {
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
    }
}

/// One row of the per-opening report
#[derive(Debug, Serialize)]
struct OpeningRecord {
    ai_symbol: Player,
    x: usize,
    y: usize,
    wins: usize,
    draws: usize,
    losses: usize,
}

/// Tally every terminal position reachable when the AI follows each of
/// its optimal moves and the opponent tries everything.
pub fn sweep(
    rules: &AiRules,
    board: &Board,
    counts: &mut OutcomeCounts,
    progress: Option<&ProgressBar>,
) {
    match board.status() {
        Status::Won(winner) => {
            if winner == rules.ai_player() {
                counts.wins += 1;
            } else {
                counts.losses += 1;
            }
            bump(counts, progress);
            return;
        }
        Status::Draw => {
            counts.draws += 1;
            bump(counts, progress);
            return;
        }
        Status::Ongoing => {}
    }

    if board.to_move() == rules.ai_player() {
        for coord in optimal_actions(rules, board) {
            sweep(
                rules,
                &board.append(coord, rules.ai_player()),
                counts,
                progress,
            );
        }
    } else {
        for reply in board.free_cells() {
            sweep(
                rules,
                &board.append(reply, rules.human_player()),
                counts,
                progress,
            );
        }
    }
}

/// All value-maximal moves for the AI in this position
fn optimal_actions(rules: &AiRules, board: &Board) -> Vec<Coord> {
    let mut optimal = Vec::new();
    let mut best = None;

    for coord in rules.possible_actions(board) {
        let value = rules.action_value(board, &coord);
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

    optimal
}

fn bump(counts: &OutcomeCounts, progress: Option<&ProgressBar>) {
    if let Some(pb) = progress {
        let total = counts.total();
        if total.is_multiple_of(1024) {
            pb.set_message(format!("{} games finished", output::format_number(total)));
        }
        pb.tick();
    }
}

pub fn execute(args: SelfplayArgs) -> Result<()> {
    output::print_section("Adversarial sweep");

    let mut records = Vec::new();
    let mut overall = OutcomeCounts::default();

    for ai_symbol in [Player::X, Player::O] {
        let rules = AiRules::new(ai_symbol, ai_symbol.opponent())?;
        let pb = output::create_spinner(&format!("sweeping with the AI as {ai_symbol}"));
        let mut role_counts = OutcomeCounts::default();

        let empty = Board::new();
        if ai_symbol == Player::X {
            // The AI opens; one branch per optimal opening
            for opening in optimal_actions(&rules, &empty) {
                let mut counts = OutcomeCounts::default();
                sweep(
                    &rules,
                    &empty.append(opening, Player::X),
                    &mut counts,
                    Some(&pb),
                );
                records.push(opening_record(ai_symbol, opening, counts));
                role_counts.absorb(counts);
            }
        } else {
            // The human opens; one branch per opening cell
            for opening in empty.free_cells() {
                let mut counts = OutcomeCounts::default();
                sweep(
                    &rules,
                    &empty.append(opening, Player::X),
                    &mut counts,
                    Some(&pb),
                );
                records.push(opening_record(ai_symbol, opening, counts));
                role_counts.absorb(counts);
            }
        }

        pb.finish_with_message(format!(
            "AI as {}: {} games, {} wins, {} draws, {} losses",
            ai_symbol,
            output::format_number(role_counts.total()),
            output::format_number(role_counts.wins),
            output::format_number(role_counts.draws),
            output::format_number(role_counts.losses),
        ));
        overall.absorb(role_counts);
    }

    println!();
    output::print_kv("games", &output::format_number(overall.total()));
    output::print_kv("AI wins", &output::format_number(overall.wins));
    output::print_kv("draws", &output::format_number(overall.draws));
    output::print_kv("AI losses", &output::format_number(overall.losses));

    if let Some(path) = &args.csv {
        write_csv(&records, path)?;
        println!("\nPer-opening counts written to: {}", path.display());
    }

    if overall.losses > 0 {
        bail!("found {} losing lines", overall.losses);
    }

    println!("\nNo losing line found for either role.");
    Ok(())
}

/// Write one CSV row per explored opening
fn write_csv(records: &[OpeningRecord], path: &Path) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn opening_record(ai_symbol: Player, opening: Coord, counts: OutcomeCounts) -> OpeningRecord {
    OpeningRecord {
        ai_symbol,
        x: opening.x,
        y: opening.y,
        wins: counts.wins,
        draws: counts.draws,
        losses: counts.losses,
    }
}
