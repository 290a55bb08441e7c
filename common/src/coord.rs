use std::{fmt, ops::Sub};

/// A hole coordinate on a triangular board. Row 0 is the apex and holds a
/// single hole, row `r` holds `r + 1` holes.
///
/// Invariant: `col <= row`. The upper bound on `row` depends on the board
/// size, so it is checked by the constructors that take a `size`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Sub for Coord {
    type Output = (i8, i8);

    fn sub(self, rhs: Self) -> Self::Output {
        (
            self.row as i8 - rhs.row as i8,
            self.col as i8 - rhs.col as i8,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The six neighbour offsets of the triangular grid, as (row, col) deltas:
/// up-left, up-right, left, right, down-left, down-right.
pub const NEIGHBOUR_OFFSETS: [(i8, i8); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

impl Coord {
    pub fn new(row: u8, col: u8, size: u8) -> Option<Self> {
        Self::is_valid(row as i16, col as i16, size).then_some(Coord { row, col })
    }

    pub const fn apex() -> Self {
        Coord { row: 0, col: 0 }
    }

    pub fn shift(self, d_row: i8, d_col: i8, size: u8) -> Option<Coord> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        Self::is_valid(row, col, size).then(|| Coord {
            row: row as u8,
            col: col as u8,
        })
    }

    fn is_valid(row: i16, col: i16, size: u8) -> bool {
        (0..size as i16).contains(&row) && (0..=row).contains(&col)
    }

    /// Zero-based row-major index of this coordinate.
    pub fn index(self) -> usize {
        let row = self.row as usize;
        row * (row + 1) / 2 + self.col as usize
    }

    /// All coordinates of a board with the given side length, in row-major
    /// order.
    pub fn all(size: u8) -> impl Iterator<Item = Self> {
        (0..size).flat_map(|row| (0..=row).map(move |col| Coord { row, col }))
    }

    pub fn row(self) -> u8 {
        self.row
    }
    pub fn col(self) -> u8 {
        self.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        for (i, coord) in Coord::all(6).enumerate() {
            assert_eq!(coord.index(), i);
        }
        assert_eq!(Coord::all(6).count(), 21);
    }

    #[test]
    fn test_shift_respects_triangle_bounds() {
        let apex = Coord::apex();
        assert_eq!(apex.shift(-1, 0, 5), None);
        assert_eq!(apex.shift(0, 1, 5), None);
        assert_eq!(apex.shift(1, 1, 5), Coord::new(1, 1, 5));

        let corner = Coord::new(4, 4, 5).unwrap();
        assert_eq!(corner.shift(1, 0, 5), None);
        assert_eq!(corner.shift(0, 1, 5), None);
        assert_eq!(corner.shift(-1, -1, 5), Coord::new(3, 3, 5));
    }

    #[test]
    fn test_new_rejects_column_past_row() {
        assert_eq!(Coord::new(2, 3, 5), None);
        assert_eq!(Coord::new(5, 0, 5), None);
        assert!(Coord::new(4, 0, 5).is_some());
    }

    #[test]
    fn test_sub() {
        let a = Coord::new(4, 2, 5).unwrap();
        let b = Coord::new(2, 2, 5).unwrap();
        assert_eq!(a - b, (2, 0));
        assert_eq!(b - a, (-2, 0));
    }
}
