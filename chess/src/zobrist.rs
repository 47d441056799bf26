use crate::{castle::CastlingRights, piece::*, position::Position, square::*};

/// Zobrist hash, an incremental hash for a board position using random keys
///
/// Zobrist hashes for two identical positions are the same ONLY if every feature is toggled
/// through the same keys. The position always carries exactly one castling key and exactly one
/// en passant key (possibly the "none" key), plus the side key when Black is to move.
#[derive(PartialEq, Eq, PartialOrd, Clone, Copy, Debug, Default, Hash)]
pub struct ZHash(pub u64);

impl ZHash {
    pub const NULL: ZHash = ZHash(0);

    /// Full recomputation, used at initialization and to verify the incremental value
    pub fn new(pos: &Position) -> ZHash {
        let mut hash = ZHash::NULL;

        for square in pos.occupancy() {
            if let Some(piece) = pos.piece_at(square) {
                hash.toggle_piece(piece, square);
            }
        }

        hash.toggle_castle(pos.castling_rights());
        hash.toggle_ep(pos.en_passant());
        if pos.side() == Color::Black {
            hash.toggle_side();
        }

        hash
    }

    /// Toggle when piece moves to/from square
    pub fn toggle_piece(&mut self, piece: Piece, square: Square) {
        self.0 ^= PIECE_KEYS[piece as usize][square as usize];
    }

    /// Toggle the en passant file key, or the "none" key
    pub fn toggle_ep(&mut self, square: Option<Square>) {
        self.0 ^= EP_KEYS[ep_index(square)];
    }

    /// Toggles out old en passant key and toggles in new
    pub fn swap_ep(&mut self, old: Option<Square>, new: Option<Square>) {
        if ep_index(old) != ep_index(new) {
            self.toggle_ep(old);
            self.toggle_ep(new);
        }
    }

    /// Toggles the given castling index
    pub fn toggle_castle(&mut self, castle: CastlingRights) {
        self.0 ^= CASTLE_KEYS[castle.index()];
    }

    /// Toggles out old castle rights and toggles in new
    pub fn swap_castle(&mut self, old_castle: CastlingRights, new_castle: CastlingRights) {
        self.0 ^= CASTLE_KEYS[old_castle.index()];
        self.0 ^= CASTLE_KEYS[new_castle.index()];
    }

    /// Toggles side to move
    pub fn toggle_side(&mut self) {
        self.0 ^= SIDE_KEY;
    }
}

const fn ep_index(square: Option<Square>) -> usize {
    match square {
        Some(sq) => sq as usize & 7,
        None => File::COUNT,
    }
}

const KEY_COUNT: usize = Piece::COUNT * Square::COUNT + CastlingRights::COUNT + File::COUNT + 2;

/// Consistent keys through xor shift, four 16 bit slices per key
const fn gen_keys() -> [u64; KEY_COUNT] {
    let mut keys = [0; KEY_COUNT];
    let mut state: u32 = 1804289383;
    let mut i = 0;

    while i < KEY_COUNT {
        let mut key = 0u64;
        let mut slice = 0;

        while slice < 4 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;

            key |= ((state & 0xFFFF) as u64) << (16 * slice);
            slice += 1;
        }

        keys[i] = key;
        i += 1;
    }

    keys
}

const KEYS: [u64; KEY_COUNT] = gen_keys();

const fn gen_piece_keys() -> [[u64; Square::COUNT]; Piece::COUNT] {
    let mut table = [[0; Square::COUNT]; Piece::COUNT];
    let mut i = 0;

    while i < Piece::COUNT * Square::COUNT {
        table[i / Square::COUNT][i % Square::COUNT] = KEYS[i];
        i += 1;
    }

    table
}

const fn gen_tail_keys<const N: usize>(start: usize) -> [u64; N] {
    let mut table = [0; N];
    let mut i = 0;

    while i < N {
        table[i] = KEYS[start + i];
        i += 1;
    }

    table
}

const CASTLE_START: usize = Piece::COUNT * Square::COUNT;
const EP_START: usize = CASTLE_START + CastlingRights::COUNT;

static PIECE_KEYS: [[u64; Square::COUNT]; Piece::COUNT] = gen_piece_keys();
static CASTLE_KEYS: [u64; CastlingRights::COUNT] = gen_tail_keys(CASTLE_START);
static EP_KEYS: [u64; File::COUNT + 1] = gen_tail_keys(EP_START);
const SIDE_KEY: u64 = KEYS[KEY_COUNT - 1];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_distinct() {
        let mut keys = KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();

        assert_eq!(keys.len(), KEY_COUNT);
        assert!(KEYS.iter().all(|&k| k != 0));
    }

    #[test]
    fn test_hash_init() {
        let pos = Position::default();
        let kiwipete: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();

        assert_eq!(ZHash::new(&pos), pos.hash());
        assert_eq!(ZHash::new(&kiwipete), kiwipete.hash());
        assert_ne!(pos.hash(), kiwipete.hash());
    }

    #[test]
    fn test_hash_castle() {
        let mut pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();

        let mut z1 = pos.hash();
        z1.toggle_piece(Piece::WK, Square::E1);
        z1.toggle_piece(Piece::WK, Square::G1);
        z1.toggle_piece(Piece::WR, Square::H1);
        z1.toggle_piece(Piece::WR, Square::F1);
        z1.swap_castle(CastlingRights::ALL, CastlingRights::new(false, false, true, true));
        z1.toggle_side();

        pos.play("e1g1").unwrap();
        assert_eq!(z1, pos.hash());
    }

    #[test]
    fn test_hash_enpassant() {
        let mut pos: Position = "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1"
            .parse()
            .unwrap();

        let mut z1 = pos.hash();
        z1.toggle_piece(Piece::WP, Square::F5);
        z1.toggle_piece(Piece::WP, Square::E6);
        z1.toggle_piece(Piece::BP, Square::E5);
        z1.swap_ep(Some(Square::E6), None);
        z1.toggle_side();

        pos.play("f5e6").unwrap();
        assert_eq!(z1, pos.hash());
    }

    #[test]
    fn test_transposition_hash() {
        let mut p1 = Position::default();
        let mut p2 = Position::default();

        for m in ["g1f3", "g8f6", "b1c3"] {
            p1.play(m).unwrap();
        }
        for m in ["b1c3", "g8f6", "g1f3"] {
            p2.play(m).unwrap();
        }

        assert_eq!(p1.hash(), p2.hash());
    }
}
