use crate::{
    moves::{Move, MoveType},
    piece::Color,
    square::Square,
};

/// Destination for generated moves.
/// Implemented by [`MoveList`] for collecting and by any `FnMut(Move)` closure for visiting.
pub trait MoveSink {
    fn push(&mut self, m: Move);

    /// Push a pawn move that is not en passant, expanding promotions
    fn push_pawn(&mut self, src: Square, tgt: Square, side: Color) {
        if tgt.is_promotion_square(side) {
            for promotion in MoveType::PROMOTIONS {
                self.push(Move::new(src, tgt, promotion))
            }
        } else {
            self.push(Move::new(src, tgt, MoveType::Normal))
        }
    }
}

impl<F: FnMut(Move)> MoveSink for F {
    fn push(&mut self, m: Move) {
        self(m)
    }
}

/// Simple movelist optimized to cacheline size
#[derive(Clone, Debug)]
pub struct MoveList {
    pub moves: [Move; Self::SIZE],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::NULL; Self::SIZE],
            len: 0,
        }
    }
}

impl MoveSink for MoveList {
    fn push(&mut self, m: Move) {
        self.moves[self.len] = m;
        self.len += 1;
    }
}

impl MoveList {
    /// Taken from Pleco
    /// Assuming we have 8 cache lines, which should be 512B, we use up enough to fill a single
    /// cache line with the array and a pointer of our current architecture.
    /// With 2B moves, this results in (512B - {ARCH_POINTER_SIZE}B) / 2B
    #[cfg(target_pointer_width = "64")]
    pub const SIZE: usize = 252;
    #[cfg(target_pointer_width = "32")]
    pub const SIZE: usize = 254;
    #[cfg(target_pointer_width = "16")]
    pub const SIZE: usize = 255;

    /// Returns move list length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the movelist is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Filled part of the list
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, { MoveList::SIZE }>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.len)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movelist() {
        let mut l = MoveList::default();

        l.push_pawn(Square::E7, Square::D8, Color::White);
        l.push_pawn(Square::E2, Square::E3, Color::White);

        assert_eq!(l.len(), 5);
        assert!(l.contains(Move::new(Square::E7, Square::D8, MoveType::KnightPromotion)));
        assert_eq!(l.into_iter().last(), Some(Move::new(Square::E2, Square::E3, MoveType::Normal)));
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |m: Move| seen.push(m);

        sink.push_pawn(Square::A2, Square::A1, Color::Black);
        assert!(seen.iter().all(|m| m.get_type().is_promotion()));
        assert_eq!(seen.len(), 4);
    }
}
