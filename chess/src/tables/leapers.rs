/// Attack patterns for pawns, knights and kings.
/// These do not depend on occupancy, so they are generated at compile time.
use crate::{
    bitboard::{BitBoard, BB64},
    square::Square,
};

/// Set every target reachable from each square through the given (file, rank) steps.
/// Rank steps are counted towards rank 8, matching the direction of decreasing indices.
const fn gen_leaper<const N: usize>(steps: [(i8, i8); N]) -> BB64 {
    let mut table = BitBoard::EMPTY_BB64;
    let mut sq = 0;

    while sq < Square::COUNT {
        let file = (sq % 8) as i8;
        let row = (sq / 8) as i8;
        let mut bb = 0u64;
        let mut i = 0;

        while i < N {
            let (df, dr) = steps[i];
            let (f, r) = (file + df, row - dr);

            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bb |= 1 << (r * 8 + f);
            }
            i += 1;
        }

        table[sq] = BitBoard(bb);
        sq += 1;
    }

    table
}

#[rustfmt::skip]
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

#[rustfmt::skip]
const KING_STEPS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

pub static PAWN_ATTACKS: [BB64; 2] = [
    gen_leaper([(-1, 1), (1, 1)]),
    gen_leaper([(-1, -1), (1, -1)]),
];
pub static KNIGHT_ATTACKS: BB64 = gen_leaper(KNIGHT_STEPS);
pub static KING_ATTACKS: BB64 = gen_leaper(KING_STEPS);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;

    #[test]
    fn pawn_attacks() {
        let bb1 = PAWN_ATTACKS[Color::White as usize][Square::A2 as usize];
        let bb2 = PAWN_ATTACKS[Color::White as usize][Square::E4 as usize];
        let bb3 = PAWN_ATTACKS[Color::Black as usize][Square::H7 as usize];
        let bb4 = PAWN_ATTACKS[Color::White as usize][Square::E7 as usize];

        assert_eq!(bb1, BitBoard(2199023255552));
        assert_eq!(bb2, BitBoard(671088640));
        assert_eq!(bb3, BitBoard(4194304));
        assert_eq!(bb4, BitBoard(40));
    }

    #[test]
    fn knight_attacks() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1 as usize], BitBoard(1128098930098176));
        assert_eq!(KNIGHT_ATTACKS[Square::E4 as usize], BitBoard(11333767002587136));
        assert_eq!(KNIGHT_ATTACKS[Square::G6 as usize], BitBoard(687463207072));
        assert_eq!(KNIGHT_ATTACKS[Square::B7 as usize], BitBoard(84410376));
    }

    #[test]
    fn king_attacks() {
        assert_eq!(KING_ATTACKS[Square::A1 as usize], BitBoard(144959613005987840));
        assert_eq!(KING_ATTACKS[Square::E4 as usize], BitBoard(61745389371392));
        assert_eq!(KING_ATTACKS[Square::H6 as usize], BitBoard(3225468928));
        assert_eq!(KING_ATTACKS[Square::D8 as usize], BitBoard(7188));
    }
}
