use std::fmt;

use crate::{piece::*, square::*, transmute_enum};

/// Moves, encoded in 16b (encoding scheme is from Midnight by Archi)
///
///     0000 0000 0011 1111    source       0x003F     0
///     0000 1111 1100 0000    target       0x0FC0     6
///     1111 0000 0000 0000    move type    0xF000    12
///
/// Equality and hashing go through the packed value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Default, Hash)]
pub struct Move(pub u16);

/// Flag for the type of move, fits in 4b
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum MoveType {
    Normal = 0b0000,
    Castle = 0b0001,
    EnPassant = 0b0010,

    // Promotions have 3rd bit set
    KnightPromotion = 0b0100,
    BishopPromotion = 0b0101,
    RookPromotion = 0b0110,
    QueenPromotion = 0b0111,
}

impl MoveType {
    /// Promotion kinds in the order the generator emits them
    pub const PROMOTIONS: [Self; 4] = [
        MoveType::QueenPromotion,
        MoveType::KnightPromotion,
        MoveType::RookPromotion,
        MoveType::BishopPromotion,
    ];

    /// Castles and en passant need board edits beyond relocating one piece
    pub const fn is_special(self) -> bool {
        matches!(self, MoveType::Castle | MoveType::EnPassant)
    }

    /// Returns true if the move is a promotion
    pub const fn is_promotion(self) -> bool {
        self as usize & 0b0100 != 0
    }

    /// Returns the promotion piece kind. MoveType must be a promotion.
    pub const fn promotion_kind(self) -> PieceType {
        const PROMO_MASK: usize = 0b0011;
        const PROMO_KINDS: [PieceType; 4] = [
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
        ];

        PROMO_KINDS[self as usize & PROMO_MASK]
    }
}

// bit masks for the various parts of the move
const SRC: u16 = 0b0000_0000_0011_1111;
const TGT: u16 = 0b0000_1111_1100_0000;
const TYPE: u16 = 0b1111_0000_0000_0000;

/// Prints move in uci format
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!("{}{}", self.get_src(), self.get_tgt());
        let move_type = self.get_type();

        if move_type.is_promotion() {
            let promo = Piece::new(Color::Black, move_type.promotion_kind());
            write!(f, "{}{}", s, promo.to_char())
        } else {
            write!(f, "{s}")
        }
    }
}

impl Move {
    /// Placeholder move, also the value of empty move slots
    pub const NULL: Move = Move(0);

    /// Init move through bitwise or of the various values shifted to correct place
    pub const fn new(src: Square, tgt: Square, move_type: MoveType) -> Move {
        Move((src as u16) | (tgt as u16) << 6 | (move_type as u16) << 12)
    }

    /// Returns the move source square
    pub const fn get_src(self) -> Square {
        transmute_enum!((self.0 & SRC) as u8, 63)
    }

    /// Returns the move target square
    pub const fn get_tgt(self) -> Square {
        transmute_enum!(((self.0 & TGT) >> 6) as u8, 63)
    }

    /// Returns the move type flag
    pub fn get_type(self) -> MoveType {
        match (self.0 & TYPE) >> 12 {
            0b0001 => MoveType::Castle,
            0b0010 => MoveType::EnPassant,
            0b0100 => MoveType::KnightPromotion,
            0b0101 => MoveType::BishopPromotion,
            0b0110 => MoveType::RookPromotion,
            0b0111 => MoveType::QueenPromotion,
            _ => MoveType::Normal,
        }
    }

    /// True for castles and en passant captures
    pub fn is_special(self) -> bool {
        self.get_type().is_special()
    }
}
