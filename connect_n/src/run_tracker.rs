use tracing::trace;

use crate::direction::offset;
use crate::{Direction, Grid, Side};

/// Line bookkeeping for a single cell, one entry per [`Direction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCell {
    /// Length of the open span along each axis through this cell, or 0 if
    /// the cell holds a blocker.
    pub run: [u32; 4],
    /// How many cells of that span are held by the tracker's owner.
    pub claimed: [u32; 4],
}

impl RunCell {
    pub fn run(&self, direction: Direction) -> u32 {
        self.run[direction.index()]
    }

    pub fn claimed(&self, direction: Direction) -> u32 {
        self.claimed[direction.index()]
    }
}

/// Tracks, for every cell and axis, how long the line through it could
/// still become for one side, and how much of it that side already holds.
///
/// A tracker is owned by one [`Side`]: the owner's pieces count as
/// `claimed`, the other side's pieces block. A game needs two trackers, one
/// per side, and every committed move updates both of them exactly once,
/// after the piece has been recorded in the [`Grid`]. See
/// [`Self::record_move()`].
///
/// The updates only ever touch the spans through the placed cell, so their
/// cost is bounded by the board's side lengths rather than its area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunTracker {
    owner: Side,
    rows: usize,
    cols: usize,
    /// Row-major.
    cells: Vec<RunCell>,
}

impl RunTracker {
    /// Creates the tracker for an empty `rows` x `cols` board.
    pub fn new(owner: Side, rows: usize, cols: usize) -> Self {
        let mut tracker = Self {
            owner,
            rows,
            cols,
            cells: vec![RunCell::default(); rows * cols],
        };
        for cell in tracker.cells.iter_mut() {
            cell.run[Direction::Horizontal.index()] = cols as u32;
            cell.run[Direction::Vertical.index()] = rows as u32;
        }
        // Diagonal lengths only depend on the board geometry. Every diagonal is
        // walked once, starting from the cell that has no backward neighbor.
        for direction in [Direction::DiagonalTopDown, Direction::DiagonalBottomUp] {
            for row in 0..rows {
                for col in 0..cols {
                    if tracker.step(Some((row, col)), direction.back_step()).is_some() {
                        continue;
                    }
                    let diagonal = tracker.walk(Some((row, col)), direction.step(), |_| true);
                    let len = diagonal.len() as u32;
                    for (r, c) in diagonal {
                        tracker.cell_mut(r, c).run[direction.index()] = len;
                    }
                }
            }
        }
        tracker
    }

    /// Rebuilds a tracker from scratch by rescanning every line of `grid`.
    ///
    /// This gives the same result as starting from [`Self::new()`] and
    /// recording every move of the game, at the cost of a full board scan.
    pub fn recompute(owner: Side, grid: &Grid) -> Self {
        let (rows, cols) = (grid.rows(), grid.cols());
        let blocker = owner.other();
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, col, occupant) in grid.iter() {
            let mut cell = RunCell::default();
            if occupant != Some(blocker) {
                for direction in Direction::ALL {
                    let mut span = vec![(row, col)];
                    for step in [direction.back_step(), direction.step()] {
                        let mut cursor = offset(rows, cols, (row, col), step);
                        while let Some((r, c)) = cursor {
                            if grid.occupant(r, c) == Some(blocker) {
                                break;
                            }
                            span.push((r, c));
                            cursor = offset(rows, cols, (r, c), step);
                        }
                    }
                    cell.run[direction.index()] = span.len() as u32;
                    cell.claimed[direction.index()] = span
                        .iter()
                        .filter(|&&(r, c)| grid.occupant(r, c) == Some(owner))
                        .count() as u32;
                }
            }
            cells.push(cell);
        }
        Self {
            owner,
            rows,
            cols,
            cells,
        }
    }

    /// The side whose pieces count as claimed.
    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Panics if the cell is off the board.
    pub fn cell(&self, row: usize, col: usize) -> &RunCell {
        assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }

    /// Updates the tracker for a move by `mover` at `(row, col)`, which must
    /// already be recorded in `grid`.
    pub fn record_move(&mut self, grid: &Grid, row: usize, col: usize, mover: Side) {
        if mover == self.owner {
            self.on_own_piece_placed(grid, row, col);
        } else {
            self.on_blocker_placed(grid, row, col);
        }
    }

    /// The other side placed a piece at `(row, col)`.
    ///
    /// The cell becomes a permanent blocker, which splits every span through
    /// it into two independent spans, one per sense of the axis. Both get
    /// their `run` and `claimed` values recounted.
    pub fn on_blocker_placed(&mut self, grid: &Grid, row: usize, col: usize) {
        debug_assert_eq!(grid.occupant(row, col), Some(self.owner.other()));
        *self.cell_mut(row, col) = RunCell::default();

        for direction in Direction::ALL {
            let d = direction.index();
            for step in [direction.back_step(), direction.step()] {
                let start = self.step(Some((row, col)), step);
                let span = self.walk(start, step, |cell| cell.run[d] > 0);
                let run = span.len() as u32;
                let claimed = self.count_owned(grid, &span);
                trace!(?direction, row, col, run, claimed, "Truncated span");
                for (r, c) in span {
                    let cell = self.cell_mut(r, c);
                    cell.run[d] = run;
                    cell.claimed[d] = claimed;
                }
            }
        }
    }

    /// The owner placed a piece at `(row, col)`.
    ///
    /// An own piece never blocks, so the spans keep their length. Only the
    /// `claimed` count is refreshed, over the whole span through the cell.
    pub fn on_own_piece_placed(&mut self, grid: &Grid, row: usize, col: usize) {
        debug_assert_eq!(grid.occupant(row, col), Some(self.owner));

        for direction in Direction::ALL {
            let d = direction.index();
            let is_open = |cell: &RunCell| cell.run[d] > 0;
            let mut span = self.walk(Some((row, col)), direction.back_step(), is_open);
            let forward_start = self.step(Some((row, col)), direction.step());
            span.extend(self.walk(forward_start, direction.step(), is_open));
            let claimed = self.count_owned(grid, &span);
            trace!(?direction, row, col, claimed, "Recounted claims");
            for (r, c) in span {
                self.cell_mut(r, c).claimed[d] = claimed;
            }
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut RunCell {
        &mut self.cells[row * self.cols + col]
    }

    fn step(&self, pos: Option<(usize, usize)>, step: (isize, isize)) -> Option<(usize, usize)> {
        pos.and_then(|pos| offset(self.rows, self.cols, pos, step))
    }

    /// Collects cells from `start` on, stepping by `step`, until leaving the
    /// board or reaching a cell for which `keep_going` is false.
    fn walk(
        &self,
        start: Option<(usize, usize)>,
        step: (isize, isize),
        keep_going: impl Fn(&RunCell) -> bool,
    ) -> Vec<(usize, usize)> {
        let mut span = Vec::new();
        let mut cursor = start;
        while let Some((row, col)) = cursor {
            if !keep_going(self.cell(row, col)) {
                break;
            }
            span.push((row, col));
            cursor = self.step(cursor, step);
        }
        span
    }

    fn count_owned(&self, grid: &Grid, span: &[(usize, usize)]) -> u32 {
        span.iter()
            .filter(|&&(row, col)| grid.occupant(row, col) == Some(self.owner))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveSequence;

    /// Places the moves alternately, starting with `Side::First`, and updates
    /// both trackers the way a game does.
    fn play(rows: usize, cols: usize, moves: &[(usize, usize)]) -> (Grid, [RunTracker; 2]) {
        let mut grid = Grid::new(rows, cols);
        let mut trackers = Side::ALL.map(|side| RunTracker::new(side, rows, cols));
        let mut mover = Side::First;
        for &(row, col) in moves {
            grid.place(row, col, mover).unwrap();
            for tracker in trackers.iter_mut() {
                tracker.record_move(&grid, row, col, mover);
            }
            mover = mover.other();
        }
        (grid, trackers)
    }

    quickcheck! {
        fn incremental_updates_match_recompute(seq: MoveSequence) -> bool {
            let mut grid = Grid::new(seq.rows, seq.cols);
            let mut trackers = Side::ALL.map(|side| RunTracker::new(side, seq.rows, seq.cols));
            if trackers.iter().any(|t| *t != RunTracker::recompute(t.owner(), &grid)) {
                return false;
            }
            let mut mover = Side::First;
            for &(row, col) in &seq.moves {
                grid.place(row, col, mover).unwrap();
                for tracker in trackers.iter_mut() {
                    tracker.record_move(&grid, row, col, mover);
                }
                for tracker in &trackers {
                    if *tracker != RunTracker::recompute(tracker.owner(), &grid) {
                        return false;
                    }
                }
                mover = mover.other();
            }
            true
        }

        fn claimed_never_exceeds_run(seq: MoveSequence) -> bool {
            let (_, trackers) = play(seq.rows, seq.cols, &seq.moves);
            trackers.iter().all(|tracker| {
                tracker.cells.iter().all(|cell| {
                    cell.run.iter().zip(cell.claimed.iter()).all(|(run, claimed)| claimed <= run)
                })
            })
        }
    }

    #[test]
    fn initial_runs_on_tic_tac_toe_board() {
        let tracker = RunTracker::new(Side::First, 3, 3);
        for row in 0..3 {
            for col in 0..3 {
                let cell = tracker.cell(row, col);
                assert_eq!(cell.run(Direction::Horizontal), 3);
                assert_eq!(cell.run(Direction::Vertical), 3);
                assert_eq!(cell.claimed, [0; 4]);
            }
        }
        let top_left = tracker.cell(0, 0);
        assert_eq!(top_left.run(Direction::DiagonalTopDown), 3);
        assert_eq!(top_left.run(Direction::DiagonalBottomUp), 1);
        let top_right = tracker.cell(0, 2);
        assert_eq!(top_right.run(Direction::DiagonalTopDown), 1);
        assert_eq!(top_right.run(Direction::DiagonalBottomUp), 3);
        assert_eq!(tracker.cell(1, 1).run(Direction::DiagonalBottomUp), 3);
        assert_eq!(tracker.cell(1, 0).run(Direction::DiagonalTopDown), 2);
    }

    #[test]
    fn initial_runs_on_non_square_board() {
        let tracker = RunTracker::new(Side::Second, 2, 5);
        let cell = tracker.cell(0, 0);
        assert_eq!(cell.run(Direction::Horizontal), 5);
        assert_eq!(cell.run(Direction::Vertical), 2);
        // The top right corner lies on a top-down diagonal of its own
        assert_eq!(tracker.cell(0, 4).run(Direction::DiagonalTopDown), 1);
        assert_eq!(tracker.cell(1, 0).run(Direction::DiagonalBottomUp), 2);
        assert_eq!(tracker, RunTracker::recompute(Side::Second, &Grid::new(2, 5)));
    }

    #[test]
    fn blocker_splits_span() {
        let mut grid = Grid::new(1, 5);
        let mut tracker = RunTracker::new(Side::First, 1, 5);
        grid.place(0, 2, Side::Second).unwrap();
        tracker.on_blocker_placed(&grid, 0, 2);

        let runs: Vec<u32> = (0..5)
            .map(|col| tracker.cell(0, col).run(Direction::Horizontal))
            .collect();
        assert_eq!(runs, vec![2, 2, 0, 2, 2]);
    }

    #[test]
    fn blocker_recounts_claims_on_both_halves() {
        // X . O . X  with O placed last
        let (_, [first, second]) = play(1, 5, &[(0, 0), (0, 3), (0, 4), (0, 2)]);
        // X's view: O at columns 2 and 3 block, leaving {0, 1} and {4}
        let claims: Vec<u32> = (0..5)
            .map(|col| first.cell(0, col).claimed(Direction::Horizontal))
            .collect();
        assert_eq!(claims, vec![1, 1, 0, 0, 1]);
        let runs: Vec<u32> = (0..5)
            .map(|col| first.cell(0, col).run(Direction::Horizontal))
            .collect();
        assert_eq!(runs, vec![2, 2, 0, 0, 1]);
        // O's view: X at columns 0 and 4 block, leaving {1, 2, 3} with two O
        assert_eq!(second.cell(0, 1).run(Direction::Horizontal), 3);
        assert_eq!(second.cell(0, 1).claimed(Direction::Horizontal), 2);
    }

    #[test]
    fn own_piece_claims_whole_span() {
        let mut grid = Grid::new(3, 3);
        let mut tracker = RunTracker::new(Side::First, 3, 3);
        grid.place(1, 1, Side::First).unwrap();
        tracker.on_own_piece_placed(&grid, 1, 1);

        for direction in Direction::ALL {
            assert_eq!(tracker.cell(1, 1).claimed(direction), 1);
            assert_eq!(tracker.cell(1, 1).run(direction), 3);
        }
        assert_eq!(tracker.cell(1, 0).claimed(Direction::Horizontal), 1);
        assert_eq!(tracker.cell(0, 1).claimed(Direction::Vertical), 1);
        assert_eq!(tracker.cell(2, 2).claimed(Direction::DiagonalTopDown), 1);
        assert_eq!(tracker.cell(2, 0).claimed(Direction::DiagonalBottomUp), 1);
        // Cells on other lines are untouched
        assert_eq!(tracker.cell(0, 0).claimed(Direction::Horizontal), 0);
        assert_eq!(tracker.cell(1, 0).claimed(Direction::DiagonalTopDown), 0);
    }

    #[test]
    fn own_piece_next_to_blocker() {
        // . O X . .  (O placed right next to X)
        let (grid, [first, _]) = play(1, 5, &[(0, 2), (0, 1)]);
        assert_eq!(grid.occupant(0, 1), Some(Side::Second));
        assert_eq!(first.cell(0, 0).run(Direction::Horizontal), 1);
        assert_eq!(first.cell(0, 0).claimed(Direction::Horizontal), 0);
        for col in 2..5 {
            assert_eq!(first.cell(0, col).run(Direction::Horizontal), 3);
            assert_eq!(first.cell(0, col).claimed(Direction::Horizontal), 1);
        }
    }
}
