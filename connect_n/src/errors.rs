use crate::ValidMoveRule;

/// The error type for [`Grid::place()`](crate::Grid::place) and other
/// coordinate-based grid accesses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    OutOfBounds { row: usize, col: usize },
    CellOccupied { row: usize, col: usize },
}

impl std::error::Error for PlacementError {}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside of the board", row, col)
            }
            PlacementError::CellOccupied { row, col } => {
                write!(f, "Cell ({}, {}) is already occupied", row, col)
            }
        }
    }
}

/// The error type for [`Ruleset::validate()`](crate::Ruleset::validate).
///
/// Surfaced when setting up a game, never during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    NoRows,
    NoColumns,
    NoConsecutiveTiles,
    WinImpossible {
        consecutive_tiles: usize,
        rows: usize,
        cols: usize,
    },
    NoGamesToWin,
    GamesToWinExceedsMaxGames {
        games_to_win: u32,
        max_games: u32,
    },
}

impl std::error::Error for ConfigurationError {}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::NoRows => write!(f, "The board needs at least one row"),
            ConfigurationError::NoColumns => write!(f, "The board needs at least one column"),
            ConfigurationError::NoConsecutiveTiles => {
                write!(f, "At least one consecutive tile must be required to win")
            }
            ConfigurationError::WinImpossible {
                consecutive_tiles,
                rows,
                cols,
            } => write!(
                f,
                "{} consecutive tiles can never fit on a {}x{} board",
                consecutive_tiles, rows, cols
            ),
            ConfigurationError::NoGamesToWin => {
                write!(f, "At least one game must be required to win a match")
            }
            ConfigurationError::GamesToWinExceedsMaxGames {
                games_to_win,
                max_games,
            } => write!(
                f,
                "A match of at most {} games can never be won with {} games",
                max_games, games_to_win
            ),
        }
    }
}

/// The error type for [`Game::play()`](crate::Game::play).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    Placement(PlacementError),
    ForbiddenByRule {
        row: usize,
        col: usize,
        rule: ValidMoveRule,
    },
    GameOver,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::Placement(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Placement(_) => write!(f, "The piece could not be placed"),
            IllegalMove::ForbiddenByRule { row, col, rule } => write!(
                f,
                "Cell ({}, {}) is not a legal target under the {} rule",
                row,
                col,
                rule.name()
            ),
            IllegalMove::GameOver => write!(f, "Tried to move after the game ended"),
        }
    }
}

impl From<PlacementError> for IllegalMove {
    fn from(err: PlacementError) -> Self {
        IllegalMove::Placement(err)
    }
}
