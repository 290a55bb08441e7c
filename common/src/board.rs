use crate::{
    topology::{Hole, Jump, Topology},
    SolveError,
};

/// Peg occupancy of a board. Bit `i` is set iff hole `i + 1` holds a peg.
///
/// The raw bits double as the canonical key of the board in the
/// dead-board tables.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board(pub u64);

impl Board {
    /// Every hole filled except `empty`.
    pub fn standard_start(topology: &Topology, empty: Hole) -> Board {
        Board(topology.universe() & !empty.bitmask())
    }

    /// The usual starting board: every hole filled except hole 1, the apex.
    pub fn default_start(topology: &Topology) -> Board {
        Board(topology.universe() & !1)
    }

    /// Build a board with pegs in exactly the given holes, by number.
    pub fn from_holes(
        topology: &Topology,
        holes: impl IntoIterator<Item = usize>,
    ) -> Result<Board, SolveError> {
        let mut bits = 0;
        for number in holes {
            let Some(hole) = topology.hole(number) else {
                return Err(SolveError::MalformedInitialBoard(format!(
                    "hole {number} is not on a board with {} holes",
                    topology.hole_count()
                )));
            };
            if bits & hole.bitmask() != 0 {
                return Err(SolveError::MalformedInitialBoard(format!(
                    "hole {number} is listed twice"
                )));
            }
            bits |= hole.bitmask();
        }
        Ok(Board(bits))
    }

    /// Check that the board only uses holes of the given topology.
    pub fn validate(&self, topology: &Topology) -> Result<(), SolveError> {
        let stray = self.0 & !topology.universe();
        if stray != 0 {
            return Err(SolveError::MalformedInitialBoard(format!(
                "peg in hole {} on a board with {} holes",
                stray.trailing_zeros() + 1,
                topology.hole_count()
            )));
        }
        Ok(())
    }

    /// Number of occupied holes
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_occupied(&self, hole: Hole) -> bool {
        self.0 & hole.bitmask() != 0
    }

    pub fn occupied<'a>(&self, topology: &'a Topology) -> impl Iterator<Item = Hole> + 'a {
        let bits = self.0;
        topology.holes().filter(move |h| bits & h.bitmask() != 0)
    }

    pub fn can_jump(&self, jump: Jump) -> bool {
        (self.0 & jump.add_bits) == 0 && (self.0 & jump.remove_bits) == jump.remove_bits
    }

    pub fn apply_jump(&mut self, jump: Jump) {
        self.0 &= !jump.remove_bits;
        self.0 |= jump.add_bits;
    }

    /// Exact inverse of [`Board::apply_jump`].
    pub fn apply_jump_inverse(&mut self, jump: Jump) {
        self.0 |= jump.remove_bits;
        self.0 &= !jump.add_bits;
    }

    pub fn with_jump(mut self, jump: Jump) -> Board {
        self.apply_jump(jump);
        self
    }
}
