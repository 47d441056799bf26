/// Legality filter.
///
/// Candidates are checked against the mover's king without playing them:
///  - king moves test the target square with the king lifted off its source
///  - en passant recomputes the king's attackers with both pawns moved, which covers the capture
///    that uncovers a rank check by removing two pawns at once
///  - every other move is rejected in double check, must stay on its pin line when pinned, and
///    must capture or block a single checker
use crate::{
    bitboard::BitBoard,
    geometry::{between, line},
    moves::{Move, MoveType},
    position::{PinState, Position},
    square::Square,
    tables::{bishop_attacks, rook_attacks},
};

impl Position {
    /// Pin status of the piece on the square, computed on first query after each move
    pub fn pin_state(&self, square: Square) -> PinState {
        let cached = self.pins[square as usize].get();
        if cached != PinState::Unknown {
            return cached;
        }

        let state = self.compute_pin(square);
        self.pins[square as usize].set(state);

        state
    }

    /// Lift the piece off the board and look for an enemy slider that starts seeing the king
    fn compute_pin(&self, square: Square) -> PinState {
        let Some(piece) = self.piece_at(square) else {
            return PinState::Unpinned;
        };
        let color = piece.color();
        let king = self.king_square(color);
        let pin_line = line(king, square);

        if king == square || pin_line.is_empty() {
            return PinState::Unpinned;
        }

        let them = !color;
        let occs = self.occupancy();
        let lifted = occs.pop_bit(square);

        let revealed = (rook_attacks(king, lifted) & !rook_attacks(king, occs))
            & self.orthogonal_sliders(them)
            | (bishop_attacks(king, lifted) & !bishop_attacks(king, occs))
                & self.diagonal_sliders(them);
        let pinner = revealed & pin_line;

        if pinner.is_empty() {
            PinState::Unpinned
        } else {
            self.piece_at(pinner.lsb())
                .map_or(PinState::Unpinned, |p| PinState::Pinned(p.kind()))
        }
    }

    /// Returns true if the piece on the square is absolutely pinned
    pub fn is_pinned(&self, square: Square) -> bool {
        matches!(self.pin_state(square), PinState::Pinned(_))
    }

    /// Decide whether the candidate leaves the mover's king safe.
    /// Checkers must be those of the moving color; castles are validated during generation.
    pub(crate) fn is_legal(&self, m: Move, checkers: BitBoard) -> bool {
        let (src, tgt) = (m.get_src(), m.get_tgt());
        let Some(piece) = self.piece_at(src) else {
            return false;
        };
        let us = piece.color();
        let them = !us;

        match m.get_type() {
            MoveType::Castle => true,
            _ if piece.is_king() => self
                .attackers(tgt, them, self.occupancy().pop_bit(src))
                .is_empty(),
            MoveType::EnPassant => {
                let captured = tgt.forward(them);
                let blockers = self.occupancy().pop_bit(src).pop_bit(captured).set_bit(tgt);

                self.attackers(self.king_square(us), them, blockers).is_empty()
            }
            _ => {
                if checkers.count_bits() > 1 {
                    return false;
                }

                let king = self.king_square(us);
                if self.is_pinned(src) && !line(king, src).get_bit(tgt) {
                    return false;
                }

                if checkers.is_empty() {
                    true
                } else {
                    let checker = checkers.lsb();
                    tgt == checker || between(king, checker).get_bit(tgt)
                }
            }
        }
    }
}
