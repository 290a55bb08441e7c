use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Mutex,
};

use bitvec::{bitbox, boxed::BitBox, prelude::Lsb0};
use rustc_hash::FxHashSet;

use crate::{board::Board, topology::Topology};

/// Boards with at most this many holes get a dense table holding one bit for
/// every possible board. Larger boards fall back to a hash set.
pub const DENSE_HOLE_LIMIT: usize = 24;

/// Storage for boards that are known to be dead ends.
pub trait DeadBoards {
    fn is_dead(&self, board: Board) -> bool;
    fn mark_dead(&mut self, board: Board);
    fn len(&self) -> usize;
}

enum Table {
    Dense(BitBox<u64>),
    Sparse(FxHashSet<u64>),
}

/// Dead-board table owned by a single search.
pub struct VisitMap {
    table: Table,
    len: usize,
}

impl VisitMap {
    pub fn for_topology(topology: &Topology) -> Self {
        let table = if topology.hole_count() <= DENSE_HOLE_LIMIT {
            Table::Dense(bitbox![u64, Lsb0; 0; 1usize << topology.hole_count()])
        } else {
            Table::Sparse(FxHashSet::default())
        };
        Self { table, len: 0 }
    }

    pub fn is_visited(&self, board: Board) -> bool {
        match &self.table {
            Table::Dense(bits) => bits[board.0 as usize],
            Table::Sparse(set) => set.contains(&board.0),
        }
    }

    pub fn visit(&mut self, board: Board) {
        let inserted = match &mut self.table {
            Table::Dense(bits) => !bits.replace(board.0 as usize, true),
            Table::Sparse(set) => set.insert(board.0),
        };
        if inserted {
            self.len += 1;
        }
    }
}

impl DeadBoards for VisitMap {
    fn is_dead(&self, board: Board) -> bool {
        self.is_visited(board)
    }
    fn mark_dead(&mut self, board: Board) {
        self.visit(board)
    }
    fn len(&self) -> usize {
        self.len
    }
}

enum SharedTable {
    Dense(Vec<AtomicU64>),
    Sparse(Mutex<FxHashSet<u64>>),
}

/// Dead-board table shared between the shards of a parallel search.
///
/// Each board is inserted at most once; `visit` reports whether this call
/// was the one that inserted it.
pub struct SharedVisitMap {
    table: SharedTable,
    len: AtomicUsize,
}

impl SharedVisitMap {
    pub fn for_topology(topology: &Topology) -> Self {
        let table = if topology.hole_count() <= DENSE_HOLE_LIMIT {
            let words = (1usize << topology.hole_count()).div_ceil(64);
            SharedTable::Dense((0..words).map(|_| AtomicU64::new(0)).collect())
        } else {
            SharedTable::Sparse(Mutex::new(FxHashSet::default()))
        };
        Self {
            table,
            len: AtomicUsize::new(0),
        }
    }

    pub fn is_visited(&self, board: Board) -> bool {
        match &self.table {
            SharedTable::Dense(words) => {
                let (word, bit) = split_index(board);
                words[word].load(Ordering::Relaxed) & bit != 0
            }
            SharedTable::Sparse(set) => set
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .contains(&board.0),
        }
    }

    pub fn visit(&self, board: Board) -> bool {
        let inserted = match &self.table {
            SharedTable::Dense(words) => {
                let (word, bit) = split_index(board);
                words[word].fetch_or(bit, Ordering::Relaxed) & bit == 0
            }
            SharedTable::Sparse(set) => set
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(board.0),
        };
        if inserted {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }
}

fn split_index(board: Board) -> (usize, u64) {
    let idx = board.0 as usize;
    (idx / 64, 1u64 << (idx % 64))
}

impl DeadBoards for &SharedVisitMap {
    fn is_dead(&self, board: Board) -> bool {
        self.is_visited(board)
    }
    fn mark_dead(&mut self, board: Board) {
        self.visit(board);
    }
    fn len(&self) -> usize {
        SharedVisitMap::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::build_topology;

    fn exercise(map: &mut impl DeadBoards) {
        let a = Board(0b1011);
        let b = Board(0b0110);
        assert!(!map.is_dead(a));
        map.mark_dead(a);
        map.mark_dead(a);
        assert!(map.is_dead(a));
        assert!(!map.is_dead(b));
        map.mark_dead(b);
        assert!(map.is_dead(b));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_dense_map() {
        let topology = build_topology(5).unwrap();
        exercise(&mut VisitMap::for_topology(&topology));
    }

    #[test]
    fn test_sparse_map() {
        let topology = build_topology(8).unwrap();
        let mut map = VisitMap::for_topology(&topology);
        assert!(matches!(map.table, Table::Sparse(_)));
        exercise(&mut map);

        let big = Board(1u64 << 35);
        map.visit(big);
        assert!(map.is_visited(big));
    }

    #[test]
    fn test_shared_map_inserts_once() {
        let topology = build_topology(5).unwrap();
        let shared = SharedVisitMap::for_topology(&topology);
        assert!(shared.visit(Board(0b111)));
        assert!(!shared.visit(Board(0b111)));
        exercise(&mut &shared);
        assert_eq!(shared.len(), 3);
    }

    #[test]
    fn test_shared_sparse_map() {
        let topology = build_topology(9).unwrap();
        let shared = SharedVisitMap::for_topology(&topology);
        assert!(matches!(shared.table, SharedTable::Sparse(_)));
        exercise(&mut &shared);
    }
}
