/// Move generation.
///
/// Each piece produces its candidates from the attack tables, and every candidate is passed
/// through the legality filter before reaching the sink. In attacks-only mode the raw attack
/// sets are emitted instead: own-occupied targets are kept, pawns emit both diagonals and
/// never push, and neither castles nor en passant are produced.
use crate::{
    bitboard::BitBoard,
    castle::{rook_castling_move, CastleSide},
    error::{ChessError, ChessResult},
    geometry::between,
    move_list::{MoveList, MoveSink},
    moves::{Move, MoveType},
    piece::{Color, Piece, PieceType},
    position::Position,
    square::Square,
    tables::*,
};

impl Position {
    /// Checkers of the given color, taken from the ply cache for the side to move
    fn checkers_for(&self, color: Color) -> BitBoard {
        if color == self.side {
            self.checkers
        } else {
            self.checkers_of(color)
        }
    }

    /// Generate the moves of every piece of the given color
    pub fn gen_all_moves(&self, color: Color, attacks_only: bool, sink: &mut impl MoveSink) {
        let checkers = self.checkers_for(color);

        for square in self.color_occupancy(color) {
            self.gen_square(square, attacks_only, checkers, sink);
        }
    }

    /// Generate the moves of the piece on the square, if any
    pub fn gen_piece_moves(&self, square: Square, attacks_only: bool, sink: &mut impl MoveSink) {
        if let Some(piece) = self.piece_at(square) {
            let checkers = self.checkers_for(piece.color());
            self.gen_square(square, attacks_only, checkers, sink);
        }
    }

    /// Lazy move sequence of the given color, one piece at a time.
    /// Calling it again restarts the sequence from the first piece.
    pub fn moves(&self, color: Color, attacks_only: bool) -> impl Iterator<Item = Move> + '_ {
        let checkers = self.checkers_for(color);

        self.color_occupancy(color).flat_map(move |square| {
            let mut list = MoveList::default();
            self.gen_square(square, attacks_only, checkers, &mut list);
            list
        })
    }

    /// All legal moves of the side to move
    pub fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::default();
        self.gen_all_moves(self.side, false, &mut list);

        list
    }

    /// Every square attacked by the given color
    pub fn attacked_squares(&self, color: Color) -> BitBoard {
        let mut attacked = BitBoard::EMPTY;
        self.gen_all_moves(color, true, &mut |m: Move| attacked = attacked.set_bit(m.get_tgt()));

        attacked
    }

    /// Finds legal move in position from the uci-formatted move string
    pub fn find_move(&self, move_str: &str) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|m| m.to_string() == move_str)
    }

    /// Play a uci-formatted move, rejecting anything that is not legal here
    pub fn play(&mut self, move_str: &str) -> ChessResult<Move> {
        let m = self
            .find_move(move_str)
            .ok_or_else(|| ChessError::IllegalMove(move_str.to_string()))?;
        self.make_move(m);

        Ok(m)
    }

    fn gen_square(
        &self,
        square: Square,
        attacks_only: bool,
        checkers: BitBoard,
        sink: &mut impl MoveSink,
    ) {
        let Some(piece) = self.piece_at(square) else {
            return;
        };

        if attacks_only {
            self.gen_candidates(square, piece, true, checkers, sink);
            return;
        }

        // With double checks, only king moves are legal
        if checkers.count_bits() > 1 && !piece.is_king() {
            return;
        }

        let mut legal = |m: Move| {
            if self.is_legal(m, checkers) {
                sink.push(m)
            }
        };
        self.gen_candidates(square, piece, false, checkers, &mut legal);
    }

    /// Pseudo-legal moves of a single piece
    fn gen_candidates(
        &self,
        src: Square,
        piece: Piece,
        attacks_only: bool,
        checkers: BitBoard,
        sink: &mut impl MoveSink,
    ) {
        let us = piece.color();
        let occs = self.occupancy();
        let targets = if attacks_only {
            BitBoard::FULL
        } else {
            !self.color_occupancy(us)
        };

        let attacks = match piece.kind() {
            PieceType::Pawn => return self.gen_pawn_moves(src, us, attacks_only, sink),
            PieceType::Knight => knight_attacks(src),
            PieceType::Bishop => bishop_attacks(src, occs),
            PieceType::Rook => rook_attacks(src, occs),
            PieceType::Queen => queen_attacks(src, occs),
            PieceType::King => {
                if !attacks_only && checkers.is_empty() {
                    self.gen_castling_moves(src, us, sink);
                }
                king_attacks(src)
            }
        };

        for tgt in attacks & targets {
            sink.push(Move::new(src, tgt, MoveType::Normal));
        }
    }

    /// Generate pawn pushes, captures (with promotions) and en passant
    fn gen_pawn_moves(&self, src: Square, us: Color, attacks_only: bool, sink: &mut impl MoveSink) {
        let attacks = pawn_attacks(src, us);

        if attacks_only {
            for tgt in attacks {
                sink.push(Move::new(src, tgt, MoveType::Normal));
            }
            return;
        }

        for tgt in attacks & self.color_occupancy(!us) {
            sink.push_pawn(src, tgt, us);
        }

        // only the side to move can take the pawn that just double pushed
        if let Some(ep) = self.en_passant {
            if us == self.side && attacks.get_bit(ep) {
                sink.push(Move::new(src, ep, MoveType::EnPassant));
            }
        }

        let single = src.forward(us);
        if !self.occupancy().get_bit(single) {
            sink.push_pawn(src, single, us);

            if BitBoard::START_RANKS[us as usize].get_bit(src) {
                let double = single.forward(us);

                if !self.occupancy().get_bit(double) {
                    sink.push(Move::new(src, double, MoveType::Normal));
                }
            }
        }
    }

    /// Generate castling moves.
    /// The king must not be in check, which the caller guarantees.
    fn gen_castling_moves(&self, king: Square, us: Color, sink: &mut impl MoveSink) {
        const KING_HOME: [Square; 2] = [Square::E1, Square::E8];

        if king != KING_HOME[us as usize] {
            return;
        }

        for side in CastleSide::ALL {
            let rook_home = side.rook_square(us);
            let tgt = side.king_target(us);
            let (_, passed) = rook_castling_move(tgt);

            if self.castling_rights.has(us, side)
                && self.piece_at(rook_home) == Some(us.piece(PieceType::Rook))
                && (between(king, rook_home) & self.occupancy()).is_empty()
                && !self.is_attacked(passed, !us)
                && !self.is_attacked(tgt, !us)
            {
                sink.push(Move::new(king, tgt, MoveType::Castle));
            }
        }
    }
}
