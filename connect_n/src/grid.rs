use serde::{Deserialize, Serialize};

use crate::direction::offset;
use crate::{visualize_grid, Direction, PlacementError};

/// One of the two competing sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Drawn as `X`.
    First,
    /// Drawn as `O`.
    Second,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Cell occupancy of a `rows` x `cols` board.
///
/// Row 0 is the top row, column 0 the leftmost column. The grid is pure
/// storage: it does not notify anyone when a piece is placed, keeping the
/// [run trackers](crate::RunTracker) in sync is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    cells: Vec<Option<Side>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Records a piece of `side` at `(row, col)`.
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<(), PlacementError> {
        let idx = self.idx(row, col)?;
        if self.cells[idx].is_some() {
            return Err(PlacementError::CellOccupied { row, col });
        }
        self.cells[idx] = Some(side);
        Ok(())
    }

    /// The occupant of `(row, col)`, or an error if the cell is off the board.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Side>, PlacementError> {
        self.idx(row, col).map(|idx| self.cells[idx])
    }

    /// The occupant of `(row, col)`.
    ///
    /// Panics if the cell is off the board. See [`Self::get()`] for the
    /// fallible version.
    pub fn occupant(&self, row: usize, col: usize) -> Option<Side> {
        assert!(
            self.is_in_bounds(row, col),
            "({}, {}) is outside of a {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// The next cell from `(row, col)` in the forward sense of `direction`.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        offset(self.rows, self.cols, (row, col), direction.step())
    }

    pub fn num_occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<Side>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &occupant)| (idx / self.cols, idx % self.cols, occupant))
    }

    fn idx(&self, row: usize, col: usize) -> Result<usize, PlacementError> {
        if self.is_in_bounds(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(PlacementError::OutOfBounds { row, col })
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_grid(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_read_back() {
        let mut grid = Grid::new(2, 3);
        assert_eq!(grid.place(1, 2, Side::Second), Ok(()));
        assert_eq!(grid.occupant(1, 2), Some(Side::Second));
        assert_eq!(grid.get(0, 0), Ok(None));
        assert_eq!(grid.num_occupied(), 1);
        assert!(!grid.is_full());
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut grid = Grid::new(3, 3);
        grid.place(1, 1, Side::First).unwrap();
        assert_eq!(
            grid.place(1, 1, Side::Second),
            Err(PlacementError::CellOccupied { row: 1, col: 1 })
        );
        // The first occupant is kept
        assert_eq!(grid.occupant(1, 1), Some(Side::First));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = Grid::new(3, 4);
        assert_eq!(
            grid.place(3, 0, Side::First),
            Err(PlacementError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            grid.get(0, 4),
            Err(PlacementError::OutOfBounds { row: 0, col: 4 })
        );
    }

    #[test]
    #[should_panic]
    fn occupant_panics_off_board() {
        Grid::new(3, 3).occupant(0, 3);
    }

    #[test]
    fn neighbors_of_corners() {
        let grid = Grid::new(3, 3);
        assert_eq!(grid.neighbor(0, 0, Direction::Horizontal), Some((0, 1)));
        assert_eq!(grid.neighbor(0, 0, Direction::Vertical), Some((1, 0)));
        assert_eq!(grid.neighbor(0, 0, Direction::DiagonalTopDown), Some((1, 1)));
        assert_eq!(grid.neighbor(0, 0, Direction::DiagonalBottomUp), None);

        assert_eq!(grid.neighbor(0, 2, Direction::Horizontal), None);
        assert_eq!(grid.neighbor(0, 2, Direction::Vertical), Some((1, 2)));
        assert_eq!(grid.neighbor(0, 2, Direction::DiagonalTopDown), None);

        assert_eq!(grid.neighbor(2, 0, Direction::Vertical), None);
        assert_eq!(grid.neighbor(2, 0, Direction::DiagonalBottomUp), Some((1, 1)));

        assert_eq!(grid.neighbor(1, 1, Direction::DiagonalBottomUp), Some((0, 2)));
        assert_eq!(grid.neighbor(2, 2, Direction::DiagonalTopDown), None);
    }

    #[test]
    fn full_grid() {
        let mut grid = Grid::new(1, 2);
        grid.place(0, 0, Side::First).unwrap();
        grid.place(0, 1, Side::Second).unwrap();
        assert!(grid.is_full());
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(
            cells,
            vec![(0, 0, Some(Side::First)), (0, 1, Some(Side::Second))]
        );
    }
}
