/// Offline magic search and store verification.
use super::*;
use std::time::Instant;

use bitchess::tables::{find_magics::find_all_magics, magics::SliderTable, SliderFamily};
use clap::Args;

/// Search a fresh set of magics for both slider families and write them as a store.
#[derive(Args)]
pub struct MagicsOptions {
    /// Directory the store files are written to.
    #[arg(long, short = 'o', required = true)]
    out: PathBuf,

    /// Seed for the candidate generator.
    #[arg(long, short = 's', default_value_t = 0x5EED)]
    seed: u64,

    /// Candidates tried per square before giving up.
    #[arg(long, short = 'a', default_value_t = 100_000_000)]
    attempts: u64,
}

/// Check a store maps every blocker subset to its own slot and build the global tables from it.
#[derive(Args)]
pub struct VerifyOptions {
    /// Only check the store, without building the global tables.
    #[arg(long)]
    dry_run: bool,
}

pub fn run_search(opts: MagicsOptions) -> ChessResult<()> {
    let timer = Instant::now();
    let bishop = find_all_magics(SliderFamily::Bishop, opts.seed, opts.attempts)?;
    let rook = find_all_magics(SliderFamily::Rook, opts.seed, opts.attempts)?;

    let store = MagicStore::new(bishop, rook);
    tracing::info!(seed = opts.seed, attempts = opts.attempts, "search finished");
    store.write_to_dir(&opts.out)?;

    println!(
        "{GREEN}Magics written{DEFAULT} to {WHITE}{}{DEFAULT} in {:.2}s",
        opts.out.display(),
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

pub fn run_verify(store: &MagicStore, opts: VerifyOptions) -> ChessResult<()> {
    for family in SliderFamily::ALL {
        let table = SliderTable::new(family, store.magics(family))?;
        println!("{GREEN}{family}{DEFAULT}: {} attack entries", table.len());
    }

    if !opts.dry_run {
        tables::init(store)?;
        println!("{GREEN}Tables initialized{DEFAULT}");
    }
    Ok(())
}
