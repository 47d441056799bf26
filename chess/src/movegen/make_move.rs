use crate::{
    castle::rook_castling_move,
    moves::{Move, MoveType},
    piece::{Color, Piece, PieceType},
    position::{Position, Undo},
};

impl Position {
    /// Makes (legal) move on the board, pushing what is needed to take it back.
    /// Supplying illegal moves will lead to illegal board states.
    /// Panics if the source square is empty.
    pub fn make_move(&mut self, m: Move) {
        let (src, tgt) = (m.get_src(), m.get_tgt());
        let move_type = m.get_type();
        let Some(piece) = self.piece_at(src) else {
            panic!("no piece to move on {src} for {m}");
        };
        let us = piece.color();

        // Captured piece, lifted before the mover lands
        let captured = if move_type == MoveType::EnPassant {
            Some(self.remove_piece(tgt.forward(!us)))
        } else {
            self.piece_at(tgt).map(|_| self.remove_piece(tgt))
        };

        self.history.push(Undo {
            mv: m,
            captured,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            checkers: self.checkers,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        });

        // Move the piece to the new square
        self.remove_piece(src);
        if move_type.is_promotion() {
            self.set_piece(Piece::new(us, move_type.promotion_kind()), tgt);
        } else {
            self.set_piece(piece, tgt);
        }

        if move_type == MoveType::Castle {
            let (rook_src, rook_tgt) = rook_castling_move(tgt);
            let rook = self.remove_piece(rook_src);
            self.set_piece(rook, rook_tgt);
        }

        if captured.is_some() || piece.is_pawn() {
            self.halfmoves = 0;
        } else {
            self.halfmoves += 1;
        }
        if us == Color::Black {
            self.fullmoves += 1;
        }

        // Every double push leaves an en passant target behind
        let ep = if piece.is_pawn() && (src as u8).abs_diff(tgt as u8) == 16 {
            Some(src.forward(us))
        } else {
            None
        };
        self.hash.swap_ep(self.en_passant, ep);
        self.en_passant = ep;

        let new_rights = self.castling_rights.update(src, tgt);
        self.hash.swap_castle(self.castling_rights, new_rights);
        self.castling_rights = new_rights;

        self.side = !self.side;
        self.hash.toggle_side();

        self.clear_pins();
        self.checkers = self.checkers_of(self.side);
    }

    /// Takes back the last move.
    /// Panics if there is no move to take back.
    pub fn undo_move(&mut self) {
        let Some(undo) = self.history.pop() else {
            panic!("no move to undo");
        };
        let m = undo.mv;
        let (src, tgt) = (m.get_src(), m.get_tgt());
        let move_type = m.get_type();

        self.side = !self.side;
        self.hash.toggle_side();
        let us = self.side;

        self.hash.swap_castle(self.castling_rights, undo.castling_rights);
        self.castling_rights = undo.castling_rights;
        self.hash.swap_ep(self.en_passant, undo.en_passant);
        self.en_passant = undo.en_passant;

        if move_type == MoveType::Castle {
            let (rook_src, rook_tgt) = rook_castling_move(tgt);
            let rook = self.remove_piece(rook_tgt);
            self.set_piece(rook, rook_src);
        }

        let moved = self.remove_piece(tgt);
        if move_type.is_promotion() {
            self.set_piece(us.piece(PieceType::Pawn), src);
        } else {
            self.set_piece(moved, src);
        }

        if let Some(piece) = undo.captured {
            let square = if move_type == MoveType::EnPassant {
                tgt.forward(!us)
            } else {
                tgt
            };
            self.set_piece(piece, square);
        }

        self.halfmoves = undo.halfmoves;
        self.fullmoves = undo.fullmoves;
        self.checkers = undo.checkers;
        self.clear_pins();
    }
}

#[cfg(test)]
mod tests {
    use crate::{piece::Piece, position::Position, square::Square};

    #[test]
    fn test_make_undo_restores() {
        let mut pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let before = pos.to_record();
        let hash = pos.hash();

        for m in pos.legal_moves() {
            pos.make_move(m);
            assert!(pos.validate().is_ok(), "{m} broke the position");
            pos.undo_move();

            assert_eq!(pos.to_record(), before);
            assert_eq!(pos.hash(), hash);
        }
    }

    #[test]
    fn test_special_moves() {
        let mut pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let before = pos.to_record();

        pos.play("a2a4").unwrap();
        assert_eq!(pos.en_passant(), Some(Square::A3));

        pos.play("b4a3").unwrap();
        assert_eq!(pos.piece_at(Square::A4), None);
        assert_eq!(pos.piece_at(Square::A3), Some(Piece::BP));
        assert_eq!(pos.en_passant(), None);

        pos.play("e1c1").unwrap();
        assert_eq!(pos.piece_at(Square::C1), Some(Piece::WK));
        assert_eq!(pos.piece_at(Square::D1), Some(Piece::WR));
        assert_eq!(pos.castling_rights().to_string(), "kq");

        pos.play("a3b2").unwrap();
        assert!(pos.in_check());
        pos.play("c1b2").unwrap();
        assert_eq!((pos.halfmoves(), pos.fullmoves()), (0, 3));
        assert!(pos.validate().is_ok());

        for _ in 0..5 {
            pos.undo_move();
        }
        assert_eq!(pos.ply(), 0);
        assert_eq!(pos.to_record(), before);
        assert!(pos.validate().is_ok());
    }

    #[test]
    fn test_promotion_undo() {
        let mut pos: Position = "8/P6k/8/8/8/8/6K1/8 w - - 0 1".parse().unwrap();

        pos.play("a7a8n").unwrap();
        assert_eq!(pos.piece_at(Square::A8), Some(Piece::WN));
        assert!(pos.validate().is_ok());

        pos.undo_move();
        assert_eq!(pos.piece_at(Square::A7), Some(Piece::WP));
        assert_eq!(pos.piece_at(Square::A8), None);
    }

    #[test]
    #[should_panic]
    fn test_undo_empty_history() {
        Position::default().undo_move();
    }
}
