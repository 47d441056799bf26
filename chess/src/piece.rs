use std::{fmt, ops::Not};

use crate::{error::ChessError, transmute_enum};

/// Piece/Player color enum
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Color;

    // get opposite color
    fn not(self) -> Color {
        transmute_enum!(self as u8 ^ 1, 1)
    }
}

/// Pretty print color to string
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Color::White => "White",
                Color::Black => "Black",
            }
        )
    }
}

impl Color {
    pub const COUNT: usize = 2;
    pub const ALL: [Self; Self::COUNT] = [Color::White, Color::Black];

    /// The piece of the given kind in this color
    pub const fn piece(self, kind: PieceType) -> Piece {
        Piece::new(self, kind)
    }
}

/// Colorless piece kind, used to index the per-color piece masks.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];
}

/// Chess Piece enum (includes color)
/// Pieces alternate between Black and White so that the least significant bit is the color
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[rustfmt::skip]
pub enum Piece {
    WP, BP, WN, BN, WB, BB, WR, BR, WQ, BQ, WK, BK,
}
use Piece::*;

// used for printing/reading pieces
#[rustfmt::skip]
const PIECE_CHAR: [char; Piece::COUNT] = [
    'P', 'p', 'N', 'n', 'B', 'b',
    'R', 'r', 'Q', 'q', 'K', 'k',
];

#[rustfmt::skip]
const PIECE_UNICODE: [char; Piece::COUNT] = [
    '♟', '♙', '♞', '♘', '♝', '♗',
    '♜', '♖', '♛', '♕', '♚', '♔',
];

/// Prints piece as unicode character
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PIECE_UNICODE[*self as usize])
    }
}

/// Reads piece from fen char
impl TryFrom<char> for Piece {
    type Error = ChessError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        PIECE_CHAR
            .iter()
            .position(|&x| x == value)
            .map(|index| Self::ALL[index])
            .ok_or(ChessError::InvalidPiece(value))
    }
}

impl Piece {
    pub const COUNT: usize = 12;

    /// All pieces indexed by binary representation
    #[rustfmt::skip]
    pub const ALL: [Self; Self::COUNT] = [
        WP, BP, WN, BN, WB, BB,
        WR, BR, WQ, BQ, WK, BK,
    ];

    /// Build a piece from its color and kind
    pub const fn new(color: Color, kind: PieceType) -> Self {
        transmute_enum!((kind as u8) << 1 | color as u8, 15)
    }

    /// Returns fen formatted piece
    pub const fn to_char(self) -> char {
        PIECE_CHAR[self as usize]
    }

    /// Get piece color
    pub const fn color(self) -> Color {
        transmute_enum!(self as u8, 1)
    }

    /// Get the colorless piece kind
    pub const fn kind(self) -> PieceType {
        transmute_enum!(self as u8 >> 1, 7)
    }

    pub const fn is_pawn(self) -> bool {
        self as u8 >> 1 == PieceType::Pawn as u8
    }

    pub const fn is_king(self) -> bool {
        self as u8 >> 1 == PieceType::King as u8
    }
}
