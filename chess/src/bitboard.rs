use std::fmt;

use crate::{piece::Color, square::Square, transmute_enum};

/// Bitboard implemented as a simple tuple struct.
/// Bit i is set iff square i (A8 = 0 .. H1 = 63) is part of the set.
#[derive(PartialEq, Eq, PartialOrd, Clone, Copy, Debug, Default, Hash)]
pub struct BitBoard(pub u64);

pub type BB64 = [BitBoard; Square::COUNT];

/// Operator impls forward to the inner u64, both the plain and the assigning form
macro_rules! impl_bit_ops {
    ($($op:ident::$fn:ident, $assign:ident::$assign_fn:ident);* $(;)?) => {
        $(
            impl std::ops::$op for BitBoard {
                type Output = Self;

                fn $fn(self, other: Self) -> Self {
                    Self(std::ops::$op::$fn(self.0, other.0))
                }
            }

            impl std::ops::$assign for BitBoard {
                fn $assign_fn(&mut self, other: Self) {
                    std::ops::$assign::$assign_fn(&mut self.0, other.0)
                }
            }
        )*
    };
}

impl_bit_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign;
    BitOr::bitor, BitOrAssign::bitor_assign;
    BitXor::bitxor, BitXorAssign::bitxor_assign;
}

impl std::ops::Not for BitBoard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Prints the set as an 8x8 grid, rank 8 on top
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n      Bitboard: {:#018x}", self.0)?;

        for (rank, squares) in Square::ALL.chunks(8).enumerate() {
            write!(f, "\n{}   ", 8 - rank)?;
            for &square in squares {
                write!(f, "{} ", if self.get_bit(square) { 'X' } else { '-' })?;
            }
        }
        write!(f, "\n\n    A B C D E F G H")
    }
}

/// Iterator over the 1 bits of the board, pops the least significant bit each iteration
impl Iterator for BitBoard {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        let square = self.lsb();
        self.0 &= self.0 - 1;
        Some(square)
    }
}

impl BitBoard {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0xFFFFFFFFFFFFFFFF);
    pub const EMPTY_BB64: BB64 = [Self::EMPTY; Square::COUNT];

    /// Ranks pawns double push from, per color
    pub const START_RANKS: [Self; 2] = [Self(0x00FF000000000000), Self(0x000000000000FF00)];

    /// Check whether given square is set on the board
    pub const fn get_bit(self, square: Square) -> bool {
        self.0 & (1u64 << square as usize) != 0
    }

    /// Sets given square on the board
    pub const fn set_bit(self, square: Square) -> Self {
        Self(self.0 | 1u64 << square as usize)
    }

    /// Pops given square off the board
    pub const fn pop_bit(self, square: Square) -> Self {
        Self(self.0 & !(1u64 << square as usize))
    }

    /// True if no square is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Shift the bitboard one rank forward for the given side.
    pub const fn forward(self, side: Color) -> Self {
        match side {
            Color::White => Self(self.0 >> 8),
            Color::Black => Self(self.0 << 8),
        }
    }

    /// Returns popcnt
    pub const fn count_bits(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns first set square from board (least significant 1 bit)
    /// The board must not be empty.
    pub const fn lsb(self) -> Square {
        transmute_enum!(self.0.trailing_zeros() as u8, 63)
    }

    /// Map an index onto the set bits of the board, taken in ascending square order.
    ///
    ///     index = 0                        -->  all bits of the mask are unset
    ///     index = 2^mask.count_bits() - 1  -->  all bits of the mask are set
    ///
    /// Every index in between selects a distinct subset of the mask.
    pub fn subset(self, index: usize) -> Self {
        self.enumerate()
            .filter(|(count, _)| index & (1 << count) != 0)
            .fold(Self::EMPTY, |bb, (_, square)| bb | square.to_board())
    }
}
