use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, Direction, Grid, Side};

/// The parameters of a match: board shape, win condition and placement rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    pub rows: usize,
    pub cols: usize,
    /// How many pieces of one side in a row win a game.
    pub consecutive_tiles: usize,
    pub valid_move: ValidMoveRule,
    /// The first side to win this many games wins the match.
    pub games_to_win: u32,
    /// After this many games without a match winner, the match is a draw.
    pub max_games: u32,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            consecutive_tiles: 3,
            valid_move: ValidMoveRule::Anywhere,
            games_to_win: 2,
            max_games: 3,
        }
    }
}

impl Ruleset {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.rows < 1 {
            return Err(ConfigurationError::NoRows);
        }
        if self.cols < 1 {
            return Err(ConfigurationError::NoColumns);
        }
        if self.consecutive_tiles < 1 {
            return Err(ConfigurationError::NoConsecutiveTiles);
        }
        if self.consecutive_tiles > self.rows.max(self.cols) {
            return Err(ConfigurationError::WinImpossible {
                consecutive_tiles: self.consecutive_tiles,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.games_to_win < 1 {
            return Err(ConfigurationError::NoGamesToWin);
        }
        if self.games_to_win > self.max_games {
            return Err(ConfigurationError::GamesToWinExceedsMaxGames {
                games_to_win: self.games_to_win,
                max_games: self.max_games,
            });
        }
        Ok(())
    }
}

/// Decides whether a cell is a legal target for a new piece.
pub trait MoveValidator {
    fn is_valid(&self, grid: &Grid, row: usize, col: usize, side: Side) -> bool;
}

impl<F> MoveValidator for F
where
    F: Fn(&Grid, usize, usize, Side) -> bool,
{
    fn is_valid(&self, grid: &Grid, row: usize, col: usize, side: Side) -> bool {
        self(grid, row, col, side)
    }
}

/// The placement rules that come with the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidMoveRule {
    /// Any unoccupied cell, as in tic-tac-toe.
    Anywhere,
    /// An unoccupied cell that is in the bottom row or sits on top of an
    /// occupied cell, as in Connect-4.
    OnTop,
}

impl ValidMoveRule {
    pub fn name(self) -> &'static str {
        match self {
            ValidMoveRule::Anywhere => "Anywhere!",
            ValidMoveRule::OnTop => "Drop",
        }
    }
}

impl MoveValidator for ValidMoveRule {
    fn is_valid(&self, grid: &Grid, row: usize, col: usize, _side: Side) -> bool {
        if !matches!(grid.get(row, col), Ok(None)) {
            return false;
        }
        match self {
            ValidMoveRule::Anywhere => true,
            ValidMoveRule::OnTop => match grid.neighbor(row, col, Direction::Vertical) {
                None => true,
                Some((below_row, below_col)) => grid.occupant(below_row, below_col).is_some(),
            },
        }
    }
}

/// All cells where `side` may place a piece, in row-major order.
///
/// An empty list means that no move is left.
pub fn candidates(grid: &Grid, validator: &impl MoveValidator, side: Side) -> Vec<(usize, usize)> {
    grid.iter()
        .filter(|&(row, col, _)| validator.is_valid(grid, row, col, side))
        .map(|(row, col, _)| (row, col))
        .collect()
}
