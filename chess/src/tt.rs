//! # Transposition table for search memoization
//!
//! Direct-mapped: every hash owns exactly one slot, picked by its low bits. Slots are kept as a
//! pair of atomics holding `(key ^ data, data)`, so a slot written for another key (or half
//! written) reads back as a miss instead of handing out foreign data.
use std::{
    mem::size_of,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{moves::Move, zobrist::ZHash};

/// Default table size in MiB
pub const DEFAULT_SIZE: usize = 16;

/// Kind of score bound stored with an entry.
/// None is reserved for slots that were never written: it is never returned by a lookup and
/// storing it is ignored.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash, Default)]
pub enum Bound {
    #[default]
    None,
    Lower,
    Upper,
    Exact,
}

/// Search result stored in the table
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TTEntry {
    pub key: ZHash,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Move,
}

// Layout of the data word
const DEPTH_MASK: u64 = 0x0000_0000_0000_00FF;
const BOUND_OFFSET: u64 = 8;
const BOUND_MASK: u64 = 0x0000_0000_0000_0300;
const MOVE_OFFSET: u64 = 16;
const MOVE_MASK: u64 = 0x0000_0000_FFFF_0000;
const SCORE_OFFSET: u64 = 32;

impl TTEntry {
    fn pack(&self) -> u64 {
        self.depth as u64
            | (self.bound as u64) << BOUND_OFFSET
            | (self.best_move.0 as u64) << MOVE_OFFSET
            | (self.score as u32 as u64) << SCORE_OFFSET
    }

    fn unpack(key: u64, data: u64) -> TTEntry {
        let bound = match (data & BOUND_MASK) >> BOUND_OFFSET {
            1 => Bound::Lower,
            2 => Bound::Upper,
            3 => Bound::Exact,
            _ => Bound::None,
        };

        TTEntry {
            key: ZHash(key),
            depth: (data & DEPTH_MASK) as u8,
            score: (data >> SCORE_OFFSET) as u32 as i32,
            bound,
            best_move: Move(((data & MOVE_MASK) >> MOVE_OFFSET) as u16),
        }
    }
}

/// Table slot, compressed down to 16B
#[derive(Debug, Default)]
struct AtomicField(AtomicU64, AtomicU64);

impl AtomicField {
    #[inline]
    fn read(&self) -> TTEntry {
        let data = self.1.load(Ordering::Relaxed);
        let key = self.0.load(Ordering::Relaxed) ^ data;

        TTEntry::unpack(key, data)
    }

    #[inline]
    fn write(&self, entry: TTEntry) {
        let data = entry.pack();

        self.0.store(entry.key.0 ^ data, Ordering::Relaxed);
        self.1.store(data, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
        self.1.store(0, Ordering::Relaxed);
    }
}

/// Main transposition table with 16B entries
#[derive(Debug)]
pub struct TT {
    table: Vec<AtomicField>,
    bitmask: u64,
}

impl Default for TT {
    fn default() -> Self {
        TT::with_size_mb(DEFAULT_SIZE)
    }
}

impl TT {
    /// Table with 2^bits slots
    pub fn new(bits: u32) -> TT {
        let size = 1usize << bits;
        let mut table = Vec::with_capacity(size);
        table.resize_with(size, AtomicField::default);

        TT {
            table,
            bitmask: size as u64 - 1,
        }
    }

    /// Largest power of two table that fits in the given MiB (at least one slot)
    pub fn with_size_mb(mb_size: usize) -> TT {
        let slots = ((mb_size << 20) / size_of::<AtomicField>()).max(1);

        TT::new(slots.ilog2())
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    fn slot(&self, hash: ZHash) -> &AtomicField {
        &self.table[(hash.0 & self.bitmask) as usize]
    }

    /// Probe the table. Only an entry stored for exactly this hash is a hit.
    pub fn lookup(&self, hash: ZHash) -> Option<TTEntry> {
        let entry = self.slot(hash).read();

        (entry.key == hash && entry.bound != Bound::None).then_some(entry)
    }

    /// Store a result. The resident entry survives only if it belongs to the same key and was
    /// searched deeper. Results with `Bound::None` carry no information and are dropped.
    pub fn store(&self, hash: ZHash, depth: u8, score: i32, bound: Bound, best_move: Move) {
        if bound == Bound::None {
            return;
        }

        let field = self.slot(hash);
        let old = field.read();

        if old.bound == Bound::None || old.key != hash || depth >= old.depth {
            field.write(TTEntry {
                key: hash,
                depth,
                score,
                bound,
                best_move,
            });
        }
    }

    /// Reset every slot to the empty state
    pub fn clear(&self) {
        for field in &self.table {
            field.reset();
        }
    }
}
