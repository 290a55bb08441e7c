use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    coord::{Coord, NEIGHBOUR_OFFSETS},
    SolveError,
};

/// Largest supported side length. A board of this size has 55 holes, which
/// still fits the `u64` bit-set that boards are stored in.
pub const MAX_SIDE: usize = 10;

/// A hole on the board, numbered from 1 in row-major order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hole(u8);

impl Hole {
    /// Zero-based index, also the bit position of this hole in a board.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn bitmask(self) -> u64 {
        1u64 << self.index()
    }

    fn from_index(idx: usize) -> Self {
        Hole(idx as u8 + 1)
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A legal jump from `start` over `middle` into `end`.
///
/// The bitmasks are precomputed so that checking and applying a jump on a
/// board are a handful of bit operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Jump {
    pub start: Hole,
    pub middle: Hole,
    pub end: Hole,
    pub(crate) remove_bits: u64,
    pub(crate) add_bits: u64,
}

impl Jump {
    fn new(start: Hole, middle: Hole, end: Hole) -> Self {
        Jump {
            start,
            middle,
            end,
            remove_bits: start.bitmask() | middle.bitmask(),
            add_bits: end.bitmask(),
        }
    }
}

/// The immutable geometry of a triangular board of a given side length:
/// hole numbering, adjacency and the table of legal jumps.
#[derive(Clone, Debug)]
pub struct Topology {
    size: u8,
    /// hole index -> coordinate
    coords: Vec<Coord>,
    /// hole index -> bitmask of adjacent holes
    adjacency: Vec<u64>,
    /// sorted by (start, end)
    jumps: Vec<Jump>,
}

/// Build the topology of a triangular board with side length `size`.
pub fn build_topology(size: usize) -> Result<Topology, SolveError> {
    if size == 0 || size > MAX_SIDE {
        return Err(SolveError::InvalidBoardSize {
            size,
            max: MAX_SIDE,
        });
    }
    let size = size as u8;

    let coords: Vec<Coord> = Coord::all(size).collect();

    let adjacency: Vec<u64> = coords
        .iter()
        .map(|&coord| {
            NEIGHBOUR_OFFSETS
                .iter()
                .filter_map(|&(d_row, d_col)| coord.shift(d_row, d_col, size))
                .filter(|&neighbour| neighbour != coord)
                .fold(0, |mask, neighbour| mask | (1u64 << neighbour.index()))
        })
        .collect();

    let mut jumps = Vec::new();
    for i in 0..coords.len() {
        for j in 0..coords.len() {
            if i == j {
                continue;
            }

            // Holes two apart along an axis share exactly one neighbour and
            // are not adjacent themselves. Every other pair at distance two
            // shares two neighbours.
            let shared = adjacency[i] & adjacency[j];
            let adjacent = adjacency[i] & (1u64 << j) != 0;
            if shared.count_ones() != 1 || adjacent {
                continue;
            }

            let middle = shared.trailing_zeros() as usize;
            jumps.push(Jump::new(
                Hole::from_index(i),
                Hole::from_index(middle),
                Hole::from_index(j),
            ));
        }
    }

    log::debug!(
        "built topology for size {size}: {} holes, {} jumps",
        coords.len(),
        jumps.len()
    );

    Ok(Topology {
        size,
        coords,
        adjacency,
        jumps,
    })
}

impl Topology {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Number of holes, `n(n+1)/2`.
    pub fn hole_count(&self) -> usize {
        self.coords.len()
    }

    /// Look up a hole by its 1-based number.
    pub fn hole(&self, number: usize) -> Option<Hole> {
        (1..=self.hole_count())
            .contains(&number)
            .then(|| Hole(number as u8))
    }

    pub fn holes(&self) -> impl Iterator<Item = Hole> + '_ {
        (0..self.hole_count()).map(Hole::from_index)
    }

    pub fn coord(&self, hole: Hole) -> Coord {
        self.coords[hole.index()]
    }

    pub fn hole_at(&self, coord: Coord) -> Option<Hole> {
        (coord.row() < self.size).then(|| Hole::from_index(coord.index()))
    }

    /// Bitmask with one bit set for every hole of the board.
    pub fn universe(&self) -> u64 {
        (1u64 << self.hole_count()) - 1
    }

    pub fn neighbours(&self, hole: Hole) -> impl Iterator<Item = Hole> {
        let mask = self.adjacency[hole.index()];
        (0..64)
            .filter(move |i| mask & (1u64 << i) != 0)
            .map(Hole::from_index)
    }

    pub fn is_adjacent(&self, a: Hole, b: Hole) -> bool {
        self.adjacency[a.index()] & b.bitmask() != 0
    }

    /// All legal jumps, ordered by (start, end). Both directions of a line of
    /// three holes are listed as separate jumps.
    pub fn jumps(&self) -> &[Jump] {
        &self.jumps
    }

    pub fn jump(&self, start: Hole, end: Hole) -> Option<Jump> {
        self.jumps
            .binary_search_by(|j| (j.start, j.end).cmp(&(start, end)))
            .ok()
            .map(|idx| self.jumps[idx])
    }

    /// The hole that is jumped over when moving from `start` to `end`.
    pub fn middle(&self, start: Hole, end: Hole) -> Option<Hole> {
        self.jump(start, end).map(|j| j.middle)
    }
}
