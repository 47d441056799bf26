/// Module allowing access to the process-wide attack tables.
///
/// Leaper tables are generated at compile time. Slider tables use plain magic bitboards built
/// exactly once, either from an explicit store passed to [`init`] or, on first use, from the
/// store embedded in the library. Magic generation lives in [`find_magics`] and is never run by
/// the lookup path.
pub mod find_magics;
pub mod magics;
pub mod store;

mod leapers;

use std::{fmt, sync::OnceLock};

use leapers::*;
use magics::SliderTable;
pub use store::MagicStore;

use crate::{
    bitboard::BitBoard,
    error::{ChessError, ChessResult},
    geometry::Direction,
    piece::Color,
    square::Square,
};

/// Sliding piece family, identified by the set of rays it moves along
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum SliderFamily {
    Bishop,
    Rook,
}

impl fmt::Display for SliderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderFamily::Bishop => write!(f, "bishop"),
            SliderFamily::Rook => write!(f, "rook"),
        }
    }
}

impl SliderFamily {
    pub const ALL: [Self; 2] = [SliderFamily::Bishop, SliderFamily::Rook];

    /// Ray directions of the family
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            SliderFamily::Bishop => &Direction::DIAGONAL,
            SliderFamily::Rook => &Direction::ORTHOGONAL,
        }
    }

    /// Name of the family's file inside a magic store directory
    pub const fn file_name(self) -> &'static str {
        match self {
            SliderFamily::Bishop => "bishop_magics.bin",
            SliderFamily::Rook => "rook_magics.bin",
        }
    }
}

struct Sliders {
    bishop: SliderTable,
    rook: SliderTable,
}

impl Sliders {
    fn build(store: &MagicStore) -> ChessResult<Sliders> {
        let bishop = SliderTable::new(SliderFamily::Bishop, store.magics(SliderFamily::Bishop))?;
        let rook = SliderTable::new(SliderFamily::Rook, store.magics(SliderFamily::Rook))?;

        tracing::info!(
            bishop_entries = bishop.len(),
            rook_entries = rook.len(),
            "slider attack tables built"
        );
        Ok(Sliders { bishop, rook })
    }
}

static SLIDERS: OnceLock<Sliders> = OnceLock::new();

/// Build the slider tables from the given store.
/// Fails if the store holds a colliding magic, or if the tables were already built.
pub fn init(store: &MagicStore) -> ChessResult<()> {
    if SLIDERS.get().is_some() {
        return Err(ChessError::TablesInitialized);
    }

    let sliders = Sliders::build(store)?;
    SLIDERS
        .set(sliders)
        .map_err(|_| ChessError::TablesInitialized)
}

/// True once the slider tables exist
pub fn is_initialized() -> bool {
    SLIDERS.get().is_some()
}

fn sliders() -> &'static Sliders {
    SLIDERS.get_or_init(|| {
        tracing::debug!("building slider tables from the embedded store");

        match MagicStore::embedded().and_then(|store| Sliders::build(&store)) {
            Ok(sliders) => sliders,
            Err(e) => panic!("embedded magic store is invalid: {e}"),
        }
    })
}

/// Gets pawn attacks from tables
pub fn pawn_attacks(square: Square, side: Color) -> BitBoard {
    PAWN_ATTACKS[side as usize][square as usize]
}

/// Gets knight attacks from tables
pub fn knight_attacks(square: Square) -> BitBoard {
    KNIGHT_ATTACKS[square as usize]
}

/// Gets king attacks from tables
pub fn king_attacks(square: Square) -> BitBoard {
    KING_ATTACKS[square as usize]
}

/// Gets bishop attacks based on the blocker bitboard
pub fn bishop_attacks(square: Square, blockers: BitBoard) -> BitBoard {
    sliders().bishop.attacks(square, blockers)
}

/// Gets rook attacks based on the blocker bitboard
pub fn rook_attacks(square: Square, blockers: BitBoard) -> BitBoard {
    sliders().rook.attacks(square, blockers)
}

/// Gets queen attacks based on the blocker bitboard
pub fn queen_attacks(square: Square, blockers: BitBoard) -> BitBoard {
    rook_attacks(square, blockers) | bishop_attacks(square, blockers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bishop_table_attacks() {
        let bb1 = bishop_attacks(Square::E4, BitBoard(1161084283129857));
        let bb2 = bishop_attacks(Square::B7, BitBoard(35253091631104));

        assert_eq!(bb1, BitBoard(1169881047499265));
        assert_eq!(bb2, BitBoard(68854022149));
    }

    #[test]
    fn rook_table_attacks() {
        let bb1 = rook_attacks(Square::A8, BitBoard(1099511627778));
        let bb2 = rook_attacks(Square::E4, BitBoard(76561335399223296));

        assert_eq!(bb1, BitBoard(1103823438082));
        assert_eq!(bb2, BitBoard(4521393946365952));
    }

    #[test]
    fn tables_build_once() {
        let _ = rook_attacks(Square::A1, BitBoard::EMPTY);
        let store = MagicStore::embedded().unwrap();

        assert!(is_initialized());
        assert!(matches!(init(&store), Err(ChessError::TablesInitialized)));
    }

    #[test]
    fn queen_is_union() {
        let occ = BitBoard(76561335399223296);

        assert_eq!(
            queen_attacks(Square::E4, occ),
            rook_attacks(Square::E4, occ) | bishop_attacks(Square::E4, occ)
        );
    }
}
