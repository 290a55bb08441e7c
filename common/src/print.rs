use std::fmt;

use colored::Colorize;

use crate::{
    board::Board,
    topology::{Hole, Jump, Topology},
};

/// Lay the holes out as a centred triangle. Each cell is rendered by `cell`
/// and must be `width` characters wide.
fn render_rows(topology: &Topology, width: usize, cell: impl Fn(Hole) -> String) -> String {
    // keep the pitch even so that rows can be shifted by half a cell
    let pitch = if width % 2 == 0 { width + 2 } else { width + 1 };
    let separator = " ".repeat(pitch - width);
    let size = topology.size();

    let mut holes = topology.holes();
    let mut out = String::new();
    for row in 0..size {
        out.push_str(&" ".repeat((size - 1 - row) * pitch / 2));
        let cells: Vec<String> = holes.by_ref().take(row + 1).map(&cell).collect();
        out.push_str(&cells.join(&separator));
        out.push('\n');
    }
    out
}

/// The hole numbering of the board.
pub fn render_numbers(topology: &Topology) -> String {
    let width = topology.hole_count().to_string().len();
    render_rows(topology, width, |hole| format!("{:>width$}", hole.number()))
}

/// `#` for a peg, `.` for an empty hole.
pub fn render_board(topology: &Topology, board: Board) -> String {
    render_rows(topology, 1, |hole| {
        let symbol = if board.is_occupied(hole) { "#" } else { "." };
        symbol.to_string()
    })
}

/// Render the board after `jump`, with the landing peg on red and the two
/// holes it emptied on blue.
pub fn render_jump(topology: &Topology, board: Board, jump: Jump) -> String {
    render_rows(topology, 1, |hole| {
        if board.is_occupied(hole) {
            if hole == jump.end {
                "#".on_red().to_string()
            } else {
                "#".to_string()
            }
        } else if hole == jump.start || hole == jump.middle {
            ".".on_blue().to_string()
        } else {
            ".".to_string()
        }
    })
}

/// The verdict printed on the physical game for the pegs left at the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Genius,
    PrettySmart,
    JustPlainDumb,
    Egnoramoose,
}

impl Rating {
    pub fn from_pegs(pegs: u32) -> Self {
        match pegs {
            1 => Rating::Genius,
            2 => Rating::PrettySmart,
            3 => Rating::JustPlainDumb,
            _ => Rating::Egnoramoose,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rating::Genius => "genius",
            Rating::PrettySmart => "pretty smart",
            Rating::JustPlainDumb => "just plain dumb",
            Rating::Egnoramoose => "EG-NO-RA-MOOSE",
        };
        f.write_str(text)
    }
}
