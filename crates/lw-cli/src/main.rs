//! CLI frontend for the Liftwerk elevator dispatch game.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::GameArgs;

#[derive(Parser)]
#[command(
    name = "lw",
    about = "Liftwerk: dispatch elevators before the clock runs out",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game, reading one command per line
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Print one JSON snapshot per line instead of the table view
        #[arg(long)]
        json: bool,
    },

    /// Let the built-in autopilot play
    Auto {
        #[command(flatten)]
        game: GameArgs,

        /// Maximum number of ticks to run
        #[arg(short, long, default_value = "500")]
        ticks: u64,

        /// Show the full event log, not just the summary
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the default world configuration as JSON
    Config,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { game, script, json } => {
            commands::play::run(&game, script.as_deref(), json)
        }
        Commands::Auto {
            game,
            ticks,
            verbose,
        } => commands::auto::run(&game, ticks, verbose),
        Commands::Config => commands::config::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Diagnostics go to stderr so they never mix with the rendered game.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
