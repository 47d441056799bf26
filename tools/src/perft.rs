/// Perft driver over the legal move generator.
use super::*;
use std::time::Instant;

use bitchess::{Position, START_FEN};
use clap::Args;

/// Count leaf nodes of the legal move tree, optionally split by root move.
#[derive(Args)]
pub struct PerftOptions {
    /// Position to count from.
    #[arg(long, short = 'f', default_value = START_FEN)]
    fen: String,

    /// Number of plies to expand.
    #[arg(long, short = 'd', default_value_t = 5)]
    depth: usize,

    /// Print the node count under every root move.
    #[arg(long)]
    divide: bool,
}

pub fn run_perft(opts: PerftOptions) -> ChessResult<()> {
    let mut pos: Position = opts.fen.parse()?;
    println!("{pos}");

    let timer = Instant::now();
    let nodes = if opts.divide {
        let divide = pos.divide(opts.depth);
        for (m, count) in &divide {
            println!("{WHITE}{m}{DEFAULT}: {count}");
        }
        divide.iter().map(|(_, count)| count).sum()
    } else {
        pos.perft(opts.depth)
    };
    let elapsed = timer.elapsed().as_secs_f64();
    let mnps = nodes as f64 / elapsed.max(f64::EPSILON) / 1_000_000.0;

    println!("\n O {GREEN}Depth {DEFAULT}{}: {nodes} nodes", opts.depth);
    println!(" *-> Elapsed time: {elapsed:.3}s. [{mnps:.2} Mnps]");
    Ok(())
}
