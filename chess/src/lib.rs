//! Bitboard chess position engine.
//!
//! The crate keeps a mask-based position in lockstep with a square array, generates legal moves
//! from magic attack tables, and maintains an incremental Zobrist hash plus a direct-mapped
//! transposition table for an external search driver.
pub mod bitboard;
pub mod castle;
pub mod error;
pub mod geometry;
pub mod move_list;
mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod record;
pub mod square;
pub mod tables;
pub mod tt;
pub mod zobrist;

pub use error::{ChessError, ChessResult};
pub use position::{PinState, Position};
pub use record::{PositionRecord, START_FEN};
pub use tt::{Bound, TTEntry, TT};

/// Macro used to transmute enums to their binary representation.
/// This is needed to make most enum functions compile-time constants (c++ constexpr).
///
///     x  --> enum value in correct binary representation
///   mask --> bitmask to get only the relevant bits for the representation
///
/// UB: the masked value must be a valid discriminant of the target enum
macro_rules! transmute_enum {
    ($x:expr, $mask:expr) => {
        unsafe { std::mem::transmute($x & $mask) }
    };
}

pub(crate) use transmute_enum;
