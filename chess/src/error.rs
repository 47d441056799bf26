//! Error types for the position engine.
//!
//! Malformed input (initialization records, magic constant stores) and rejected magic constants
//! are reported through [`ChessError`]. Illegal move candidates are never errors: the generator
//! simply drops them.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{piece::Color, square::Square, tables::SliderFamily};

/// Errors surfaced by the engine.
#[derive(Error, Debug)]
pub enum ChessError {
    /// Square index outside of 0..64
    #[error("invalid square index: {0} (must be 0-63)")]
    InvalidSquare(usize),

    /// Square name that is not in algebraic notation
    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    /// Unrecognized piece letter in a placement record
    #[error("invalid piece letter: {0:?}")]
    InvalidPiece(char),

    /// A rank of the placement does not describe exactly eight squares
    #[error("rank {rank} describes {count} squares instead of 8")]
    SquareCount { rank: usize, count: usize },

    /// The placement does not contain exactly eight ranks
    #[error("placement has {0} ranks instead of 8")]
    RankCount(usize),

    /// A side does not have exactly one king
    #[error("{color} has {count} kings instead of 1")]
    KingCount { color: Color, count: u32 },

    /// The side that just moved would have left its king attacked
    #[error("{0} is in check but not to move")]
    OpponentInCheck(Color),

    /// A pawn stands on the first or last rank
    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),

    /// The en passant square is not consistent with the position
    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(String),

    /// Textual record could not be split into its fields
    #[error("malformed fen: {0}")]
    Fen(String),

    /// Magic store file could not be read or written
    #[error("magic store {path:?}: {source}")]
    MagicStoreIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Magic store does not hold exactly 64 constants
    #[error("{family} magic store holds {found} bytes, expected {expected}")]
    MagicStoreLength {
        family: SliderFamily,
        expected: usize,
        found: usize,
    },

    /// Magic constant maps two blocker subsets to the same index
    #[error("{family} magic {magic:#018x} collides on square {square}")]
    MagicCollision {
        family: SliderFamily,
        square: usize,
        magic: u64,
    },

    /// Offline search gave up on a square
    #[error("no {family} magic found for square {square} in {attempts} attempts")]
    MagicNotFound {
        family: SliderFamily,
        square: usize,
        attempts: u64,
    },

    /// Attack tables were already built
    #[error("attack tables are already initialized")]
    TablesInitialized,

    /// Move string is malformed or not legal in the position
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Internal caches disagree with each other
    #[error("inconsistent position: {0}")]
    Inconsistent(String),
}

/// Result alias for engine operations
pub type ChessResult<T> = Result<T, ChessError>;
