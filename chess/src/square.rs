use std::{fmt, str::FromStr};

use crate::{bitboard::BitBoard, error::ChessError, piece::Color, transmute_enum};

/// Board square enum, indexed from A8 = 0 to H1 = 63
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[rustfmt::skip]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}
use Square::*;

/// Print algebraic square.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::STR[*self as usize])
    }
}

/// Parses algebraic square (normal formatting).
impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::STR
            .iter()
            .position(|&tgt| tgt == s)
            .map(Square::new)
            .ok_or_else(|| ChessError::InvalidSquareName(s.to_string()))
    }
}

impl TryFrom<usize> for Square {
    type Error = ChessError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < Self::COUNT {
            Ok(Self::new(index))
        } else {
            Err(ChessError::InvalidSquare(index))
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::try_from(index as usize)
    }
}

impl Square {
    pub const COUNT: usize = 64;

    #[rustfmt::skip]
    pub const ALL: [Self; Self::COUNT] = [
        A8, B8, C8, D8, E8, F8, G8, H8,
        A7, B7, C7, D7, E7, F7, G7, H7,
        A6, B6, C6, D6, E6, F6, G6, H6,
        A5, B5, C5, D5, E5, F5, G5, H5,
        A4, B4, C4, D4, E4, F4, G4, H4,
        A3, B3, C3, D3, E3, F3, G3, H3,
        A2, B2, C2, D2, E2, F2, G2, H2,
        A1, B1, C1, D1, E1, F1, G1, H1,
    ];

    #[rustfmt::skip]
    const STR: [&'static str; Self::COUNT] = [
        "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
        "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
        "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
        "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
        "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
        "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
        "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
        "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    ];

    /// Square from a raw index.
    /// Panics on indices outside the board: callers hold a programming error, not bad input.
    pub const fn new(index: usize) -> Self {
        assert!(index < Self::COUNT, "square index out of range");
        transmute_enum!(index as u8, 63)
    }

    /// Get square from (file, rank) coordinates
    pub const fn from_coords(file: File, rank: Rank) -> Self {
        transmute_enum!((rank as u8) << 3 ^ (file as u8), 63) // rank*8 + file
    }

    /// Converts square to bitboard
    pub const fn to_board(self) -> BitBoard {
        BitBoard(1u64 << self as usize)
    }

    /// Gets file coordinate
    pub const fn file(self) -> File {
        transmute_enum!(self as u8, 7)
    }

    /// Gets rank coordinate
    pub const fn rank(self) -> Rank {
        transmute_enum!(self as u8 >> 3, 7)
    }

    /// Get new square moving forward from original based on side.
    /// To go backwards, simply use the opposite side.
    /// The square must not be on the last rank for the side.
    pub const fn forward(self, side: Color) -> Self {
        match side {
            Color::White => Self::new(self as usize - 8),
            Color::Black => Self::new(self as usize + 8),
        }
    }

    /// Returns true if a pawn of the given side promotes on this square
    pub const fn is_promotion_square(self, side: Color) -> bool {
        match side {
            Color::White => self as u8 <= H8 as u8,
            Color::Black => self as u8 >= A1 as u8,
        }
    }
}

/// Board file enum, indexed from A = 0 to H = 7
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[rustfmt::skip]
pub enum File {
    A, B, C, D, E, F, G, H,
}

impl File {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

/// Board rank enum, indexed from Eight = 0 to First = 7 (backwards)
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[rustfmt::skip]
pub enum Rank {
    Eight, Seventh, Sixth, Fifth, Fourth, Third, Second, First,
}
use Rank::*;

impl Rank {
    pub const COUNT: usize = 8;

    #[rustfmt::skip]
    pub const ALL: [Self; Self::COUNT] = [
        Eight, Seventh, Sixth, Fifth, Fourth, Third, Second, First,
    ];

    /// Rank a pawn of the given side lands on after a double push
    pub const fn double_push(side: Color) -> Self {
        match side {
            Color::White => Fourth,
            Color::Black => Fifth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_parse() {
        assert_eq!("e4".parse::<Square>().unwrap(), Square::E4);
        assert_eq!(Square::H1.to_string(), "h1");
        assert!("i9".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_bounds() {
        assert_eq!(Square::try_from(63usize).unwrap(), Square::H1);
        assert!(matches!(
            Square::try_from(64u8),
            Err(ChessError::InvalidSquare(64))
        ));
    }

    #[test]
    #[should_panic]
    fn test_square_new_out_of_range() {
        let _ = Square::new(64);
    }

    #[test]
    fn test_coords() {
        let sq = Square::from_coords(File::E, Rank::Fourth);

        assert_eq!(sq, Square::E4);
        assert_eq!(sq.file(), File::E);
        assert_eq!(sq.rank(), Rank::Fourth);
        assert_eq!(Square::E2.forward(Color::White), Square::E3);
        assert_eq!(Square::E7.forward(Color::Black), Square::E6);
    }
}
