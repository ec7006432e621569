//! oxo CLI - play, analyze, and verify optimal tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Playing interactive rounds against the minimax AI
//! - Analyzing move values for arbitrary positions
//! - Sweeping the game tree to verify the AI never loses

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe with a provably optimal AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive round against the AI
    Play(oxo::cli::commands::play::PlayArgs),

    /// Analyze move values for a position
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),

    /// Sweep the game tree and verify the AI never loses
    Selfplay(oxo::cli::commands::selfplay::SelfplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
        Commands::Selfplay(args) => oxo::cli::commands::selfplay::execute(args),
    }
}
