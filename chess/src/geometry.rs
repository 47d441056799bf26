/// Static board geometry: ray directions, distances to the edge and the line/between lookups
/// derived from them. Everything here is computed at compile time.
use crate::{
    bitboard::{BitBoard, BB64},
    square::Square,
};

/// The eight ray directions. Offsets are in square index units (A8 = 0, so north is -8).
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}
use Direction::*;

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        North, South, East, West, NorthEast, NorthWest, SouthEast, SouthWest,
    ];
    pub const ORTHOGONAL: [Self; 4] = [North, South, East, West];
    pub const DIAGONAL: [Self; 4] = [NorthEast, NorthWest, SouthEast, SouthWest];

    /// Index offset of a single step
    pub const fn offset(self) -> i8 {
        match self {
            North => -8,
            South => 8,
            East => 1,
            West => -1,
            NorthEast => -7,
            NorthWest => -9,
            SouthEast => 9,
            SouthWest => 7,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            North => South,
            South => North,
            East => West,
            West => East,
            NorthEast => SouthWest,
            NorthWest => SouthEast,
            SouthEast => NorthWest,
            SouthWest => NorthEast,
        }
    }
}

impl Square {
    /// Walk `steps` squares in the given direction.
    /// The walk must stay on the board (steps <= squares_to_edge).
    pub const fn travel(self, dir: Direction, steps: u8) -> Self {
        Square::new((self as i8 + dir.offset() * steps as i8) as usize)
    }
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}

const fn gen_squares_to_edge() -> [[u8; Direction::COUNT]; Square::COUNT] {
    let mut table = [[0; Direction::COUNT]; Square::COUNT];
    let mut sq = 0;

    while sq < Square::COUNT {
        let north = (sq / 8) as u8;
        let south = 7 - north;
        let west = (sq % 8) as u8;
        let east = 7 - west;

        table[sq] = [
            north,
            south,
            east,
            west,
            min(north, east),
            min(north, west),
            min(south, east),
            min(south, west),
        ];
        sq += 1;
    }

    table
}

const EDGE: [[u8; Direction::COUNT]; Square::COUNT] = gen_squares_to_edge();

/// Number of squares between each square and the board edge, per direction
pub static SQUARES_TO_EDGE: [[u8; Direction::COUNT]; Square::COUNT] = EDGE;

/// Full ray from a square towards the edge, source excluded
const fn gen_rays() -> [[u64; Direction::COUNT]; Square::COUNT] {
    let mut rays = [[0; Direction::COUNT]; Square::COUNT];
    let mut sq = 0;

    while sq < Square::COUNT {
        let mut d = 0;
        while d < Direction::COUNT {
            let mut n = 1;
            while n <= EDGE[sq][d] {
                let tgt = Square::new(sq).travel(Direction::ALL[d], n);
                rays[sq][d] |= 1 << tgt as usize;
                n += 1;
            }
            d += 1;
        }
        sq += 1;
    }

    rays
}

const RAYS: [[u64; Direction::COUNT]; Square::COUNT] = gen_rays();

/// Generate the between and line lookups. For every aligned pair (a, b):
///  - between[a][b] contains the squares strictly between them
///  - line[a][b] contains the whole edge-to-edge line through both
/// Non aligned pairs map to the empty board.
const fn gen_lines<const STRICT: bool>() -> [BB64; Square::COUNT] {
    let mut table = [[BitBoard::EMPTY; Square::COUNT]; Square::COUNT];
    let mut sq = 0;

    while sq < Square::COUNT {
        let mut d = 0;
        while d < Direction::COUNT {
            let dir = Direction::ALL[d];
            let full = RAYS[sq][d] | RAYS[sq][dir.opposite() as usize] | 1 << sq;
            let mut between = 0u64;
            let mut n = 1;

            while n <= EDGE[sq][d] {
                let tgt = Square::new(sq).travel(dir, n) as usize;
                table[sq][tgt] = if STRICT { BitBoard(between) } else { BitBoard(full) };
                between |= 1 << tgt;
                n += 1;
            }
            d += 1;
        }
        sq += 1;
    }

    table
}

static BETWEEN: [BB64; Square::COUNT] = gen_lines::<true>();
static LINE: [BB64; Square::COUNT] = gen_lines::<false>();

/// Squares strictly between two aligned squares
pub fn between(a: Square, b: Square) -> BitBoard {
    BETWEEN[a as usize][b as usize]
}

/// Edge-to-edge line through two aligned squares
pub fn line(a: Square, b: Square) -> BitBoard {
    LINE[a as usize][b as usize]
}

/// Full ray from a square in the given direction, source excluded
pub fn ray(square: Square, dir: Direction) -> BitBoard {
    BitBoard(RAYS[square as usize][dir as usize])
}
