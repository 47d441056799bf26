use std::fmt;

use crate::{piece::Color, square::Square};

/// Castling rights struct
/// Implemented through a flag bit vector. This allows for fast castle update without needing
/// bitboard lookups, and the raw value doubles as the index of the rights combination.
///
///  WK | WQ | BK | BQ  --> only using least significant 4 bits
///  08   04   02   01
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Default, Hash)]
pub struct CastlingRights(u8);

/// Side of the board a castle happens on
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const ALL: [Self; 2] = [CastleSide::King, CastleSide::Queen];

    /// Home square of the rook for this side
    pub const fn rook_square(self, color: Color) -> Square {
        ROOK_HOME[color as usize][self as usize]
    }

    /// Destination of the king when castling on this side
    pub const fn king_target(self, color: Color) -> Square {
        KING_TARGET[color as usize][self as usize]
    }
}

// bit masks for each right
const WK: u8 = 0x08;
const WQ: u8 = 0x04;
const BK: u8 = 0x02;
const BQ: u8 = 0x01;

const FLAGS: [[u8; 2]; 2] = [[WK, WQ], [BK, BQ]];

const ROOK_HOME: [[Square; 2]; 2] = [[Square::H1, Square::A1], [Square::H8, Square::A8]];
const KING_TARGET: [[Square; 2]; 2] = [[Square::G1, Square::C1], [Square::G8, Square::C8]];

// bit masks for removing castle rights
const ALL: u8 = 0x0F;
const NO_WK: u8 = ALL ^ WK;
const NO_WQ: u8 = ALL ^ WQ;
const NO_BK: u8 = ALL ^ BK;
const NO_BQ: u8 = ALL ^ BQ;
const NO_W: u8 = NO_WK & NO_WQ;
const NO_B: u8 = NO_BK & NO_BQ;

/// Returns the rook src/tgt square for a given king target square
/// King target square must be a valid castling destination, so either C1/C8 or G1/G8
pub const fn rook_castling_move(king_tgt: Square) -> (Square, Square) {
    match king_tgt {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        Square::C8 => (Square::A8, Square::D8),
        _ => panic!("not a castling destination"),
    }
}

/// Prints rights to fen format
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();

        for (flag, c) in [(WK, 'K'), (WQ, 'Q'), (BK, 'k'), (BQ, 'q')] {
            if self.0 & flag != 0 {
                s.push(c);
            }
        }
        if s.is_empty() {
            s.push('-')
        };

        write!(f, "{s}")
    }
}

impl CastlingRights {
    pub const COUNT: usize = 16;
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(ALL);

    /// Build rights from the four independent flags
    pub const fn new(
        white_kingside: bool,
        white_queenside: bool,
        black_kingside: bool,
        black_queenside: bool,
    ) -> Self {
        let mut rights = 0;
        if white_kingside {
            rights |= WK;
        }
        if white_queenside {
            rights |= WQ;
        }
        if black_kingside {
            rights |= BK;
        }
        if black_queenside {
            rights |= BQ;
        }

        CastlingRights(rights)
    }

    /// Get index of rights as usize
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks whether given color still holds the right for the given side
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & FLAGS[color as usize][side as usize] != 0
    }

    /// Updates rights according to move.
    /// Based on the idea that any move starting or ending on one of the four corners of the board
    /// will remove the rights relative to that corner, and remove all rights of a color in case
    /// the move starts on that color's king square
    pub const fn update(self, src: Square, tgt: Square) -> CastlingRights {
        #[rustfmt::skip]
        const CASTLE_MASKS: [u8; Square::COUNT] = [
            NO_BQ, ALL, ALL, ALL, NO_B, ALL, ALL, NO_BK,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            ALL, ALL, ALL, ALL, ALL, ALL, ALL, ALL,
            NO_WQ, ALL, ALL, ALL, NO_W, ALL, ALL, NO_WK,
        ];

        let new = self.0 & CASTLE_MASKS[src as usize] & CASTLE_MASKS[tgt as usize];
        CastlingRights(new)
    }
}
