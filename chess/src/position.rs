use std::{cell::Cell, fmt, str::FromStr};

use crate::{
    bitboard::BitBoard,
    castle::CastlingRights,
    error::{ChessError, ChessResult},
    moves::Move,
    piece::{Color, Piece, PieceType},
    record::{PositionRecord, START_FEN},
    square::{File, Rank, Square},
    tables::*,
    zobrist::ZHash,
};

/// Cached pin status of the piece on a square.
/// Reset to Unknown for every square whenever the position changes.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PinState {
    #[default]
    Unknown,
    Unpinned,
    /// Pinned against its king by a slider of the given kind
    Pinned(PieceType),
}

/// State needed to take back a move
#[derive(Copy, Clone, Debug)]
pub(crate) struct Undo {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub checkers: BitBoard,
    pub halfmoves: usize,
    pub fullmoves: usize,
}

/// Bitboard-based position.
/// Piece masks and the square array are only ever touched through set_piece/remove_piece, which
/// also keep the occupancy caches and the hash up to date.
#[derive(Clone, Debug)]
pub struct Position {
    // Main bitboards
    pieces: [[BitBoard; PieceType::COUNT]; Color::COUNT],
    occupancy: [BitBoard; Color::COUNT],
    all: BitBoard,

    // Piece map for piece_at lookup
    board: [Option<Piece>; Square::COUNT],

    // Other positional information
    pub(crate) side: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: usize,
    pub(crate) fullmoves: usize,
    pub(crate) hash: ZHash,

    // Checkers of the side to move, refreshed once per ply
    pub(crate) checkers: BitBoard,

    pub(crate) pins: [Cell<PinState>; Square::COUNT],
    pub(crate) history: Vec<Undo>,
}

/// Pretty print board state
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = format!(
            "\n FEN: {}\n\n\t┏━━━┳━━━┳━━━┳━━━┳━━━┳━━━┳━━━┳━━━┓",
            self.to_record()
        );

        for rank in Rank::ALL {
            board_str.push_str(format!("\n      {} ┃ ", 8 - rank as usize).as_str());

            for file in File::ALL {
                let square = Square::from_coords(file, rank);
                let piece_str =
                    self.board[square as usize].map_or(String::from(" "), |p| p.to_string());

                board_str.push_str(&piece_str);
                board_str.push_str(" ┃ ");
            }
            if rank != Rank::First {
                board_str.push_str("\n\t┣━━━╋━━━╋━━━╋━━━╋━━━╋━━━╋━━━╋━━━┫");
            }
        }
        board_str
            .push_str("\n\t┗━━━┻━━━┻━━━┻━━━┻━━━┻━━━┻━━━┻━━━┛\n\t  A   B   C   D   E   F   G   H\n");

        let en_passant_str = match self.en_passant {
            Some(square) => format!("{square}"),
            None => String::from("-"),
        };

        write!(
            f,
            "{board_str}
 Side to move      : {}
 Castling Rights   : {}
 En Passant Square : {en_passant_str}
 Halfmoves         : {}
 Fullmoves         : {}
 Hash              : {:#018x}
 ",
            self.side, self.castling_rights, self.halfmoves, self.fullmoves, self.hash.0,
        )
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_record(&s.parse()?)
    }
}

/// Default to starting position
impl Default for Position {
    fn default() -> Self {
        match START_FEN.parse() {
            Ok(pos) => pos,
            Err(e) => panic!("start position is invalid: {e}"),
        }
    }
}

/// Construction
impl Position {
    /// Empty board, white to move, no rights
    fn empty() -> Self {
        let mut hash = ZHash::NULL;
        hash.toggle_castle(CastlingRights::NONE);
        hash.toggle_ep(None);

        Self {
            pieces: [[BitBoard::EMPTY; PieceType::COUNT]; Color::COUNT],
            occupancy: [BitBoard::EMPTY; Color::COUNT],
            all: BitBoard::EMPTY,

            board: [None; Square::COUNT],

            side: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
            hash,

            checkers: BitBoard::EMPTY,
            pins: std::array::from_fn(|_| Cell::new(PinState::Unknown)),
            history: Vec::new(),
        }
    }

    /// Build the position described by the record, failing on anything malformed
    pub fn from_record(record: &PositionRecord) -> ChessResult<Self> {
        if record.placement.len() != Rank::COUNT {
            return Err(ChessError::RankCount(record.placement.len()));
        }

        let mut pos = Self::empty();

        for (rank, rank_str) in Rank::ALL.into_iter().zip(&record.placement) {
            let mut count = 0;

            for token in rank_str.chars() {
                match token {
                    '1'..='8' => count += token as usize - '0' as usize,
                    _ => {
                        let piece = Piece::try_from(token)?;
                        if count < File::COUNT {
                            let square = Square::from_coords(File::ALL[count], rank);

                            if piece.is_pawn() && matches!(rank, Rank::Eight | Rank::First) {
                                return Err(ChessError::PawnOnBackRank(square));
                            }
                            pos.set_piece(piece, square);
                        }
                        count += 1;
                    }
                }
            }

            if count != File::COUNT {
                return Err(ChessError::SquareCount {
                    rank: 8 - rank as usize,
                    count,
                });
            }
        }

        for color in Color::ALL {
            let count = pos.pieces(color, PieceType::King).count_bits();
            if count != 1 {
                return Err(ChessError::KingCount { color, count });
            }
        }

        if record.side == Color::Black {
            pos.side = Color::Black;
            pos.hash.toggle_side();
        }

        if !pos.checkers_of(!pos.side).is_empty() {
            return Err(ChessError::OpponentInCheck(!pos.side));
        }

        let rights = CastlingRights::new(
            record.white_kingside,
            record.white_queenside,
            record.black_kingside,
            record.black_queenside,
        );
        pos.hash.swap_castle(pos.castling_rights, rights);
        pos.castling_rights = rights;

        if let Some(square) = record.en_passant {
            pos.check_en_passant(square)?;
            pos.hash.swap_ep(None, Some(square));
            pos.en_passant = Some(square);
        }

        pos.halfmoves = record.halfmoves;
        pos.fullmoves = record.fullmoves;
        pos.checkers = pos.checkers_of(pos.side);

        Ok(pos)
    }

    /// The target must sit behind an enemy pawn that could have just double pushed
    fn check_en_passant(&self, square: Square) -> ChessResult<()> {
        let them = !self.side;
        let rank = match them {
            Color::White => Rank::Third,
            Color::Black => Rank::Sixth,
        };

        if square.rank() != rank
            || self.board[square as usize].is_some()
            || self.board[square.forward(them) as usize] != Some(them.piece(PieceType::Pawn))
        {
            return Err(ChessError::InvalidEnPassant(square.to_string()));
        }

        Ok(())
    }

    /// Record describing the current position
    pub fn to_record(&self) -> PositionRecord {
        let placement = Rank::ALL
            .into_iter()
            .map(|rank| {
                let mut rank_str = String::new();
                let mut empty = 0;

                for file in File::ALL {
                    match self.board[Square::from_coords(file, rank) as usize] {
                        Some(p) => {
                            if empty > 0 {
                                rank_str.push_str(&empty.to_string());
                                empty = 0;
                            }
                            rank_str.push(p.to_char());
                        }
                        None => empty += 1,
                    }
                }
                if empty > 0 {
                    rank_str.push_str(&empty.to_string());
                }

                rank_str
            })
            .collect();

        let rights = self.castling_rights;
        use crate::castle::CastleSide::*;

        PositionRecord {
            placement,
            side: self.side,
            white_kingside: rights.has(Color::White, King),
            white_queenside: rights.has(Color::White, Queen),
            black_kingside: rights.has(Color::Black, King),
            black_queenside: rights.has(Color::Black, Queen),
            en_passant: self.en_passant,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }
}

/// Implement board modification
impl Position {
    /// Set the piece on the given empty square
    pub(crate) fn set_piece(&mut self, piece: Piece, square: Square) {
        let (c, k) = (piece.color() as usize, piece.kind() as usize);

        self.pieces[c][k] = self.pieces[c][k].set_bit(square);
        self.occupancy[c] = self.occupancy[c].set_bit(square);
        self.all = self.all.set_bit(square);
        self.board[square as usize] = Some(piece);
        self.hash.toggle_piece(piece, square);
    }

    /// Remove the piece at the given square and return it.
    /// Panics if the square is empty.
    pub(crate) fn remove_piece(&mut self, square: Square) -> Piece {
        let Some(piece) = self.board[square as usize] else {
            panic!("no piece to remove on {square}");
        };
        let (c, k) = (piece.color() as usize, piece.kind() as usize);

        self.pieces[c][k] = self.pieces[c][k].pop_bit(square);
        self.occupancy[c] = self.occupancy[c].pop_bit(square);
        self.all = self.all.pop_bit(square);
        self.board[square as usize] = None;
        self.hash.toggle_piece(piece, square);

        piece
    }

    /// Invalidate every cached pin
    pub(crate) fn clear_pins(&self) {
        for pin in &self.pins {
            pin.set(PinState::Unknown);
        }
    }
}

/// Queries
impl Position {
    /// Looks for which piece is on the given Square
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmoves(&self) -> usize {
        self.halfmoves
    }

    pub fn fullmoves(&self) -> usize {
        self.fullmoves
    }

    pub fn hash(&self) -> ZHash {
        self.hash
    }

    /// Pieces giving check to the side to move
    pub fn checkers(&self) -> BitBoard {
        self.checkers
    }

    pub fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    pub fn pieces(&self, color: Color, kind: PieceType) -> BitBoard {
        self.pieces[color as usize][kind as usize]
    }

    pub fn color_occupancy(&self, color: Color) -> BitBoard {
        self.occupancy[color as usize]
    }

    pub fn occupancy(&self) -> BitBoard {
        self.all
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color, PieceType::King).lsb()
    }

    /// Number of moves that can still be taken back
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Diagonal sliders of the given color
    pub(crate) fn diagonal_sliders(&self, color: Color) -> BitBoard {
        self.pieces(color, PieceType::Bishop) | self.pieces(color, PieceType::Queen)
    }

    /// Orthogonal sliders of the given color
    pub(crate) fn orthogonal_sliders(&self, color: Color) -> BitBoard {
        self.pieces(color, PieceType::Rook) | self.pieces(color, PieceType::Queen)
    }

    /// Mask all pieces of the given color attacking a square, given the blocker bitboard.
    /// Pieces missing from the blockers are treated as removed from the board.
    pub(crate) fn attackers(&self, square: Square, by: Color, blockers: BitBoard) -> BitBoard {
        (self.pieces(by, PieceType::Knight) & knight_attacks(square)
            | self.pieces(by, PieceType::King) & king_attacks(square)
            | self.pieces(by, PieceType::Pawn) & pawn_attacks(square, !by)
            | self.orthogonal_sliders(by) & rook_attacks(square, blockers)
            | self.diagonal_sliders(by) & bishop_attacks(square, blockers))
            & blockers
    }

    /// Returns true if the square is attacked by at least one piece of the given color
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        !self.attackers(square, by, self.all).is_empty()
    }

    /// Mask all pieces checking the king of the given color
    pub(crate) fn checkers_of(&self, color: Color) -> BitBoard {
        self.attackers(self.king_square(color), !color, self.all)
    }

    /// Check every redundant cache against the piece masks and the hash against a recomputation
    pub fn validate(&self) -> ChessResult<()> {
        let mut all = BitBoard::EMPTY;

        for color in Color::ALL {
            let mut union = BitBoard::EMPTY;

            for kind in PieceType::ALL {
                let mask = self.pieces(color, kind);

                if !(union & mask).is_empty() {
                    return Err(ChessError::Inconsistent(format!(
                        "{color} {kind:?} mask overlaps another mask"
                    )));
                }
                union |= mask;

                for square in mask {
                    if self.board[square as usize] != Some(Piece::new(color, kind)) {
                        return Err(ChessError::Inconsistent(format!(
                            "square array disagrees with masks on {square}"
                        )));
                    }
                }
            }

            if union != self.color_occupancy(color) {
                return Err(ChessError::Inconsistent(format!("{color} occupancy drifted")));
            }

            let kings = self.pieces(color, PieceType::King).count_bits();
            if kings != 1 {
                return Err(ChessError::KingCount { color, count: kings });
            }
            all |= union;
        }

        if !(self.occupancy[0] & self.occupancy[1]).is_empty() || all != self.all {
            return Err(ChessError::Inconsistent(String::from("global occupancy drifted")));
        }

        let filled = self.board.iter().filter(|p| p.is_some()).count();
        if filled != all.count_bits() as usize {
            return Err(ChessError::Inconsistent(String::from(
                "square array holds pieces missing from the masks",
            )));
        }

        if self.hash != ZHash::new(self) {
            return Err(ChessError::Inconsistent(format!(
                "hash {:#x} differs from recomputed {:#x}",
                self.hash.0,
                ZHash::new(self).0
            )));
        }

        if self.checkers != self.checkers_of(self.side) {
            return Err(ChessError::Inconsistent(String::from("stale checkers")));
        }

        if !self.checkers_of(!self.side).is_empty() {
            return Err(ChessError::OpponentInCheck(!self.side));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let pos = Position::default();

        assert_eq!(pos.piece_at(Square::E1), Some(Piece::WK));
        assert_eq!(pos.piece_at(Square::D8), Some(Piece::BQ));
        assert_eq!(pos.piece_at(Square::E4), None);
        assert_eq!(pos.occupancy().count_bits(), 32);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert!(!pos.in_check());
        assert!(pos.validate().is_ok());
        assert_eq!(pos.to_record().to_string(), START_FEN);
    }

    #[test]
    fn test_checkers() {
        let pos: Position = "r6r/1b2k1bq/8/8/7B/8/8/R3K2R b KQ - 3 2".parse().unwrap();

        assert!(pos.in_check());
        assert_eq!(pos.checkers(), Square::H4.to_board());
        assert_eq!(pos.halfmoves(), 3);
    }

    #[test]
    fn test_malformed_records() {
        let cases = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1", "square count"),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", "rank count"),
            ("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "letter"),
            ("rnbqqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "king"),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1", "ep"),
            ("rnbqkbnP/pppppppp/8/8/8/8/PPPPPPP1/RNBQKBNR w KQkq - 0 1", "pawn"),
            ("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1", "opponent in check"),
        ];

        let errors: Vec<ChessError> = cases
            .iter()
            .map(|(fen, _)| fen.parse::<Position>().unwrap_err())
            .collect();

        assert!(matches!(errors[0], ChessError::SquareCount { rank: 1, count: 7 }));
        assert!(matches!(errors[1], ChessError::RankCount(7)));
        assert!(matches!(errors[2], ChessError::InvalidPiece('x')));
        assert!(matches!(errors[3], ChessError::KingCount { color: Color::Black, count: 0 }));
        assert!(matches!(errors[4], ChessError::InvalidEnPassant(_)));
        assert!(matches!(errors[5], ChessError::PawnOnBackRank(Square::H8)));
        assert!(matches!(errors[6], ChessError::OpponentInCheck(Color::Black)));
    }

    #[test]
    fn test_validate_catches_missing_king() {
        let mut pos: Position = "4k3/8/8/8/8/8/4R3/4K3 b - - 0 1".parse().unwrap();
        assert!(pos.validate().is_ok());

        // lift the black king through the raw mutation path
        pos.remove_piece(Square::E8);
        pos.checkers = BitBoard::EMPTY;

        assert!(matches!(
            pos.validate(),
            Err(ChessError::KingCount { color: Color::Black, count: 0 })
        ));
    }

    #[test]
    fn test_valid_en_passant_record() {
        let pos: Position = "8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1".parse().unwrap();

        assert_eq!(pos.en_passant(), Some(Square::D3));
        assert!(pos.validate().is_ok());
    }
}
