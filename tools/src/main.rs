/// Tools encapsulates various cli utilities for bitchess development
mod magics;
mod perft;

use std::path::PathBuf;

use bitchess::{tables, tables::MagicStore, ChessResult};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// ANSI escape codes for coloured output
pub const DEFAULT: &str = "\x1b[0m";
pub const WHITE: &str = "\x1b[38;5;15m";
pub const ORANGE: &str = "\x1b[38;5;208m";
pub const GREEN: &str = "\x1b[38;5;40m";
pub const RED: &str = "\x1b[38;5;196m";

/// CLI tools for bitchess development.
/// Each tool is an individual subcommand.
#[derive(Parser)]
#[command(author, version, long_about = None)]
struct Cli {
    /// Directory holding bishop_magics.bin and rook_magics.bin, replacing the embedded store.
    #[arg(long, global = true)]
    magics: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

/// Commands represent the various tools available.
/// Each tool has its own Option struct defined in its module.
#[derive(Subcommand)]
enum Command {
    Perft(perft::PerftOptions),
    Magics(magics::MagicsOptions),
    Verify(magics::VerifyOptions),
}

/// Load the store the tables are built from
fn load_store(dir: Option<&PathBuf>) -> ChessResult<MagicStore> {
    match dir {
        Some(dir) => MagicStore::from_dir(dir),
        None => MagicStore::embedded(),
    }
}

fn run(args: Cli) -> ChessResult<()> {
    let store = load_store(args.magics.as_ref());

    match args.command {
        Some(Command::Perft(opts)) => {
            tables::init(&store?)?;
            perft::run_perft(opts)
        }
        Some(Command::Magics(opts)) => magics::run_search(opts),
        Some(Command::Verify(opts)) => magics::run_verify(&store?, opts),
        None => {
            eprintln!("{ORANGE}No valid command provided! Exiting. . . {DEFAULT}");
            Ok(())
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{RED}{err}{DEFAULT}");
        std::process::exit(1)
    }
}
