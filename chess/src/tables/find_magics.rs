//! # Find magic numbers through random guesses
//!
//! Process is documented in https://www.chessprogramming.org/Looking_for_Magics
//!
//! This is an offline tool: the runtime only ever loads validated constants from a store.

use super::{
    magics::{magic_index, relevant_mask},
    SliderFamily,
};
use crate::{
    bitboard::BitBoard,
    error::{ChessError, ChessResult},
    square::Square,
};

const UPPER_BYTE: u64 = 0xFF00000000000000;

/// Outcome of a bounded magic search
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MagicSearch {
    Found(u64),
    Exhausted,
}

/// Sparse random candidate
fn rand_low_bit(rng: &fastrand::Rng) -> u64 {
    rng.u64(..) & rng.u64(..) & rng.u64(..)
}

/// Finds a magic for the given family on the given square.
///
/// Brute force guesses until a magic maps every blocker subset of the square to its own index.
/// Gives up after `attempts` candidates.
pub fn find_magic(
    square: Square,
    family: SliderFamily,
    rng: &fastrand::Rng,
    attempts: u64,
) -> MagicSearch {
    let directions = family.directions();
    let mask = relevant_mask(square, directions);
    let bits = mask.count_bits();
    let shift = 64 - bits;

    let subsets: Vec<BitBoard> = (0..1 << bits).map(|idx| mask.subset(idx)).collect();
    let mut used = vec![0u64; 1 << bits];

    for attempt in 1..=attempts {
        let magic = rand_low_bit(rng);

        // the mask mapping needs at least 6 bits in the upper byte to spread the indices
        if (mask.0.wrapping_mul(magic) & UPPER_BYTE).count_ones() < 6 {
            continue;
        }

        // slots are stamped with the attempt number so they never need clearing
        let collision = subsets.iter().any(|&blockers| {
            let slot = &mut used[magic_index(blockers, magic, shift)];
            let taken = *slot == attempt;
            *slot = attempt;
            taken
        });

        if !collision {
            tracing::debug!(%family, %square, attempt, "magic found");
            return MagicSearch::Found(magic);
        }
    }

    tracing::warn!(%family, %square, attempts, "magic search exhausted");
    MagicSearch::Exhausted
}

/// Search magics for every square of the family, seeding the generator for reproducibility
pub fn find_all_magics(
    family: SliderFamily,
    seed: u64,
    attempts: u64,
) -> ChessResult<[u64; Square::COUNT]> {
    let rng = fastrand::Rng::with_seed(seed);
    let mut magics = [0; Square::COUNT];

    for square in Square::ALL {
        match find_magic(square, family, &rng, attempts) {
            MagicSearch::Found(magic) => magics[square as usize] = magic,
            MagicSearch::Exhausted => {
                return Err(ChessError::MagicNotFound {
                    family,
                    square: square as usize,
                    attempts,
                })
            }
        }
    }

    tracing::info!(%family, seed, "magic search complete");
    Ok(magics)
}
