/// Magic attack table construction.
/// Process is documented in https://www.chessprogramming.org/Magic_Bitboards
///
/// Every blocker subset of a square's relevant mask must land on its own slot: a magic that maps
/// two subsets onto the same index is rejected, even when the two attack sets happen to agree.
use super::SliderFamily;
use crate::{
    bitboard::BitBoard,
    error::{ChessError, ChessResult},
    geometry::{Direction, SQUARES_TO_EDGE},
    square::Square,
};

/// Relevant occupancy mask: every square on the rays, minus the last square of each ray.
pub fn relevant_mask(square: Square, directions: &[Direction]) -> BitBoard {
    let mut mask = BitBoard::EMPTY;

    for &dir in directions {
        let edge = SQUARES_TO_EDGE[square as usize][dir as usize];

        for n in 1..edge {
            mask = mask.set_bit(square.travel(dir, n));
        }
    }

    mask
}

/// Ray cast attacks, stopping on (and including) the first blocker of each ray.
pub fn slow_attacks(square: Square, blockers: BitBoard, directions: &[Direction]) -> BitBoard {
    let mut attacks = BitBoard::EMPTY;

    for &dir in directions {
        let edge = SQUARES_TO_EDGE[square as usize][dir as usize];

        for n in 1..=edge {
            let tgt = square.travel(dir, n);
            attacks = attacks.set_bit(tgt);

            if blockers.get_bit(tgt) {
                break;
            }
        }
    }

    attacks
}

/// Get magic index for the table given the masked blocker board
#[inline]
pub fn magic_index(blockers: BitBoard, magic: u64, shift: u32) -> usize {
    (blockers.0.wrapping_mul(magic) >> shift) as usize
}

/// Attack table of a single square for one slider family
#[derive(Clone, Debug)]
pub struct AttackTable {
    pub mask: BitBoard,
    pub magic: u64,
    pub shift: u32,
    pub attacks: Vec<BitBoard>,
}

impl AttackTable {
    /// Build the perfect hash table for the given square and family.
    /// Fails with MagicCollision if any two blocker subsets share an index.
    pub fn build(square: Square, family: SliderFamily, magic: u64) -> ChessResult<AttackTable> {
        let directions = family.directions();
        let mask = relevant_mask(square, directions);
        let bits = mask.count_bits();
        let shift = 64 - bits;

        let mut attacks = vec![BitBoard::EMPTY; 1 << bits];
        let mut used = vec![false; 1 << bits];

        for idx in 0..(1 << bits) {
            let blockers = mask.subset(idx);
            let index = magic_index(blockers, magic, shift);

            if used[index] {
                return Err(ChessError::MagicCollision {
                    family,
                    square: square as usize,
                    magic,
                });
            }

            used[index] = true;
            attacks[index] = slow_attacks(square, blockers, directions);
        }

        Ok(AttackTable {
            mask,
            magic,
            shift,
            attacks,
        })
    }

    /// Number of relevant blocker bits, which is also log2 of the table size
    pub fn bits(&self) -> u32 {
        64 - self.shift
    }

    pub fn attacks(&self, blockers: BitBoard) -> BitBoard {
        self.attacks[magic_index(blockers & self.mask, self.magic, self.shift)]
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Entry {
    mask: BitBoard,
    magic: u64,
    shift: u32,
    offset: usize,
}

/// All attacks of a family are stored in the same buffer, each square gets its slice of it
#[derive(Clone, Debug)]
pub struct SliderTable {
    entries: [Entry; Square::COUNT],
    attacks: Vec<BitBoard>,
}

impl SliderTable {
    /// Build and validate the tables of all 64 squares
    pub fn new(family: SliderFamily, magics: &[u64; Square::COUNT]) -> ChessResult<SliderTable> {
        let mut entries = [Entry::default(); Square::COUNT];
        let mut attacks = Vec::new();

        for square in Square::ALL {
            let table = AttackTable::build(square, family, magics[square as usize])?;

            entries[square as usize] = Entry {
                mask: table.mask,
                magic: table.magic,
                shift: table.shift,
                offset: attacks.len(),
            };
            attacks.extend(table.attacks);
        }

        Ok(SliderTable { entries, attacks })
    }

    /// Total number of attack sets stored
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    /// Gets attacks from the square given the full occupancy
    #[inline]
    pub fn attacks(&self, square: Square, occupancy: BitBoard) -> BitBoard {
        let entry = &self.entries[square as usize];
        let index = magic_index(occupancy & entry.mask, entry.magic, entry.shift);

        self.attacks[entry.offset + index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::store::MagicStore;

    #[test]
    fn bishop_occs() {
        let dirs = SliderFamily::Bishop.directions();

        assert_eq!(relevant_mask(Square::A2, dirs), BitBoard(2216338399232));
        assert_eq!(relevant_mask(Square::D8, dirs), BitBoard(1075975168));
        assert_eq!(relevant_mask(Square::H1, dirs), BitBoard(18049651735527936));
        assert_eq!(relevant_mask(Square::E4, dirs), BitBoard(19184279556981248));
    }

    #[test]
    fn rook_occs() {
        let dirs = SliderFamily::Rook.directions();

        assert_eq!(relevant_mask(Square::A8, dirs), BitBoard(282578800148862));
        assert_eq!(relevant_mask(Square::B7, dirs), BitBoard(565157600328704));
        assert_eq!(relevant_mask(Square::H2, dirs), BitBoard(35607136465616896));
        assert_eq!(relevant_mask(Square::E4, dirs), BitBoard(4521664529305600));
    }

    #[test]
    fn slow_slider_attacks() {
        let bishop = SliderFamily::Bishop.directions();
        let rook = SliderFamily::Rook.directions();

        assert_eq!(
            slow_attacks(Square::E4, BitBoard(1161084283129857), bishop),
            BitBoard(1169881047499265)
        );
        assert_eq!(
            slow_attacks(Square::A8, BitBoard(1099511627778), rook),
            BitBoard(1103823438082)
        );
    }

    #[test]
    fn perfect_hash_property() {
        let store = MagicStore::embedded().unwrap();

        for family in SliderFamily::ALL {
            for square in Square::ALL {
                let magic = store.magics(family)[square as usize];
                let table = AttackTable::build(square, family, magic).unwrap();

                assert_eq!(table.attacks.len(), 1 << table.bits());
                assert_eq!(table.bits(), table.mask.count_bits());
            }
        }
    }

    #[test]
    fn colliding_magic_rejected() {
        // a zero magic maps every subset to slot 0
        let result = AttackTable::build(Square::D4, SliderFamily::Rook, 0);

        assert!(matches!(
            result,
            Err(ChessError::MagicCollision { square: 35, magic: 0, .. })
        ));
    }
}
