//! Exhaustive solver for the triangular peg-jump puzzle.
//!
//! [`topology::build_topology`] describes a board of side length `n`, and
//! [`solver::Solver`] enumerates every sequence of jumps that leaves a single
//! peg on it.

pub mod board;
pub mod coord;
pub mod export;
pub mod print;
pub mod solver;
pub mod topology;
pub mod visit_map;

use thiserror::Error;

pub use board::Board;
pub use solver::{
    solve, AbortReason, CancelToken, Move, Outcome, SearchLimits, SearchReport, SearchStats,
    Solution, Solver, MAX_UNLIMITED_SIDE,
};
pub use topology::{build_topology, Hole, Jump, Topology, MAX_SIDE};

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid board size {size}, expected a side length between 1 and {max}")]
    InvalidBoardSize { size: usize, max: usize },

    #[error("malformed initial board: {0}")]
    MalformedInitialBoard(String),

    #[error("move {start}-{end} is not a legal jump")]
    IllegalMove { start: Hole, end: Hole },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
