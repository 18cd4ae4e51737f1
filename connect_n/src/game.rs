use rand::Rng;
use tracing::debug;

use crate::{
    candidates, find_consecutive_run, select, ConfigurationError, Grid, IllegalMove, MoveValidator,
    PlacementError, RunTracker, Ruleset, Side, Strategy,
};

/// Summarizes the outcome of playing a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The game goes on with the other side.
    Normal,
    /// The mover completed a line, given as its cells.
    Won {
        side: Side,
        line: Vec<(usize, usize)>,
    },
    /// No winner and no move left.
    Stalemate,
}

/// A single game: the board, both sides' run trackers, and whose turn it is.
///
/// All moves go through [`Self::play()`], which keeps the trackers in sync
/// with the board.
#[derive(Clone, Debug)]
pub struct Game {
    ruleset: Ruleset,
    grid: Grid,
    /// Indexed by [`Side::index()`].
    trackers: [RunTracker; 2],
    to_move: Side,
    outcome: Option<TurnOutcome>,
}

impl Game {
    /// Sets up an empty board on which `first` moves first.
    pub fn new(ruleset: Ruleset, first: Side) -> Result<Self, ConfigurationError> {
        ruleset.validate()?;
        let (rows, cols) = (ruleset.rows, ruleset.cols);
        Ok(Self {
            grid: Grid::new(rows, cols),
            trackers: Side::ALL.map(|side| RunTracker::new(side, rows, cols)),
            ruleset,
            to_move: first,
            outcome: None,
        })
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The tracker that counts `side`'s pieces as claimed.
    pub fn tracker(&self, side: Side) -> &RunTracker {
        &self.trackers[side.index()]
    }

    /// The side whose turn it is. After the game ended, this is the side
    /// that would have moved next.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// How the game ended, if it did.
    pub fn outcome(&self) -> Option<&TurnOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The legal moves for the side to move, in row-major order.
    pub fn candidates(&self) -> Vec<(usize, usize)> {
        if self.is_over() {
            return Vec::new();
        }
        candidates(&self.grid, &self.ruleset.valid_move, self.to_move)
    }

    /// Asks `strategy` for a move of the side to move.
    ///
    /// Returns `None` if there is no legal move.
    pub fn suggest_move<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        select(
            strategy,
            &self.candidates(),
            self.tracker(self.to_move),
            self.tracker(self.to_move.other()),
            self.ruleset.consecutive_tiles,
            rng,
        )
    }

    /// Plays a piece of the side to move at `(row, col)`.
    ///
    /// On error, the game is left unchanged.
    pub fn play(&mut self, row: usize, col: usize) -> Result<TurnOutcome, IllegalMove> {
        if self.is_over() {
            return Err(IllegalMove::GameOver);
        }
        let mover = self.to_move;
        // Report occupied or off-board cells as such rather than as rule violations
        if self.grid.get(row, col)?.is_some() {
            return Err(PlacementError::CellOccupied { row, col }.into());
        }
        if !self.ruleset.valid_move.is_valid(&self.grid, row, col, mover) {
            return Err(IllegalMove::ForbiddenByRule {
                row,
                col,
                rule: self.ruleset.valid_move,
            });
        }
        self.grid.place(row, col, mover)?;
        for tracker in self.trackers.iter_mut() {
            tracker.record_move(&self.grid, row, col, mover);
        }
        debug!(%mover, row, col, "Committed move");

        self.to_move = mover.other();
        let outcome = if let Some(line) =
            find_consecutive_run(&self.grid, mover, self.ruleset.consecutive_tiles)
        {
            debug!(winner = %mover, ?line, "Game won");
            TurnOutcome::Won { side: mover, line }
        } else if candidates(&self.grid, &self.ruleset.valid_move, self.to_move).is_empty() {
            debug!("Stalemate");
            TurnOutcome::Stalemate
        } else {
            TurnOutcome::Normal
        };
        if outcome != TurnOutcome::Normal {
            self.outcome = Some(outcome.clone());
        }
        Ok(outcome)
    }
}
