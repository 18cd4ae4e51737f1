use serde::{Deserialize, Serialize};

/// One of the four line axes of the board.
///
/// Each variant stands for a whole axis, both senses included. Where a
/// single sense is needed (e.g. for walking a line during win detection),
/// the _forward_ sense from [`Direction::step()`] is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    /// Forward is towards the bottom row.
    Vertical,
    /// Forward is towards the rightmost column.
    Horizontal,
    /// Forward is towards the bottom right corner.
    DiagonalTopDown,
    /// Forward is towards the top right corner.
    DiagonalBottomUp,
}

impl Direction {
    /// All directions, in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::DiagonalTopDown,
        Direction::DiagonalBottomUp,
    ];

    /// Index into per-direction arrays such as [`RunCell::run`](crate::RunCell::run).
    pub fn index(self) -> usize {
        self as usize
    }

    /// The (row, col) delta of one step in the forward sense.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Vertical => (1, 0),
            Direction::Horizontal => (0, 1),
            Direction::DiagonalTopDown => (1, 1),
            Direction::DiagonalBottomUp => (-1, 1),
        }
    }

    /// The (row, col) delta of one step in the backward sense.
    pub fn back_step(self) -> (isize, isize) {
        let (dr, dc) = self.step();
        (-dr, -dc)
    }

    /// A short label, used as a column header in visualizations.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Vertical => "Vertical",
            Direction::Horizontal => "Horizontal",
            Direction::DiagonalTopDown => "TopDown",
            Direction::DiagonalBottomUp => "BottomUp",
        }
    }
}

/// Moves `(row, col)` by `step`, returning `None` when the result leaves a
/// `rows` x `cols` board.
pub(crate) fn offset(
    rows: usize,
    cols: usize,
    (row, col): (usize, usize),
    (dr, dc): (isize, isize),
) -> Option<(usize, usize)> {
    let row = row.checked_add_signed(dr)?;
    let col = col.checked_add_signed(dc)?;
    (row < rows && col < cols).then_some((row, col))
}
