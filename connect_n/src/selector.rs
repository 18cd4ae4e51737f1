use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Direction, RunCell, RunTracker};

/// How an automated player picks its move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Any candidate, uniformly at random.
    PureRandom,
    /// The candidate with the best [`score()`], ties broken at random.
    Normal,
}

/// Picks a move among `candidates`.
///
/// `self_model` is the tracker owned by the side to move, `opponent_model`
/// the one owned by the other side. Returns `None` if there are no
/// candidates, i.e. the game is a stalemate.
pub fn select<R: Rng + ?Sized>(
    strategy: Strategy,
    candidates: &[(usize, usize)],
    self_model: &RunTracker,
    opponent_model: &RunTracker,
    consecutive_tiles: usize,
    rng: &mut R,
) -> Option<(usize, usize)> {
    match strategy {
        Strategy::PureRandom => candidates.choose(rng).copied(),
        Strategy::Normal => {
            let mut top_choices: Vec<(usize, usize)> = Vec::new();
            let mut top_score = 0;
            for &(row, col) in candidates {
                let score = score(
                    self_model.cell(row, col),
                    opponent_model.cell(row, col),
                    consecutive_tiles,
                );
                match score.cmp(&top_score) {
                    Ordering::Less => {}
                    Ordering::Equal => top_choices.push((row, col)),
                    Ordering::Greater => {
                        top_choices = vec![(row, col)];
                        top_score = score;
                    }
                }
            }
            top_choices.choose(rng).copied()
        }
    }
}

/// The [`Strategy::Normal`] score of a cell.
///
/// Sums one term per direction: blocking an opponent line that is one piece
/// short of winning is worth `4 * claimed`, otherwise an own open line that
/// can still fit a win and still has room is worth `run + 3 * claimed`.
pub fn score(self_cell: &RunCell, opponent_cell: &RunCell, consecutive_tiles: usize) -> u32 {
    ScoreBreakdown::new(self_cell, opponent_cell, consecutive_tiles).total()
}

/// What a single direction contributes to a cell's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionScore {
    /// The opponent is about to complete this line.
    Defensive { opponent_claimed: u32 },
    /// An own line that can still become a win.
    Offensive { run: u32, claimed: u32 },
    /// Every cell of the own line is taken already.
    NoRoom,
    /// The own line is too short to ever hold a win.
    TooShort,
}

impl DirectionScore {
    pub fn value(self) -> u32 {
        match self {
            DirectionScore::Defensive { opponent_claimed } => 4 * opponent_claimed,
            DirectionScore::Offensive { run, claimed } => run + 3 * claimed,
            DirectionScore::NoRoom | DirectionScore::TooShort => 0,
        }
    }
}

/// The per-direction terms of a cell's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub terms: [DirectionScore; 4],
}

impl ScoreBreakdown {
    pub fn new(self_cell: &RunCell, opponent_cell: &RunCell, consecutive_tiles: usize) -> Self {
        let n = consecutive_tiles as u32;
        let terms = Direction::ALL.map(|direction| {
            let opponent_claimed = opponent_cell.claimed(direction);
            let run = self_cell.run(direction);
            let claimed = self_cell.claimed(direction);
            if opponent_claimed >= n.saturating_sub(1) {
                DirectionScore::Defensive { opponent_claimed }
            } else if run.saturating_sub(claimed) < 1 {
                DirectionScore::NoRoom
            } else if run < n {
                DirectionScore::TooShort
            } else {
                DirectionScore::Offensive { run, claimed }
            }
        });
        Self { terms }
    }

    pub fn total(&self) -> u32 {
        self.terms.iter().map(|term| term.value()).sum()
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (direction, term) in Direction::ALL.iter().zip(self.terms.iter()) {
            write!(f, "  {}-", direction.label())?;
            match term {
                DirectionScore::Defensive { opponent_claimed } => {
                    writeln!(f, " + 4*{}", opponent_claimed)?
                }
                DirectionScore::Offensive { run, claimed } => {
                    writeln!(f, "{} + 3*{}", run, claimed)?
                }
                DirectionScore::NoRoom => writeln!(f, "<0>")?,
                DirectionScore::TooShort => writeln!(f, "[0]")?,
            }
        }
        write!(f, "Sum: {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{candidates, Grid, Side, ValidMoveRule};

    fn position(rows: usize, cols: usize, moves: &[(usize, usize)]) -> (Grid, [RunTracker; 2]) {
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

    #[test]
    fn blocks_opponent_about_to_win() {
        // X . .
        // O O .
        // . . X    X to move
        let (grid, [first, second]) = position(3, 3, &[(0, 0), (1, 0), (2, 2), (1, 1)]);
        let moves = candidates(&grid, &ValidMoveRule::Anywhere, Side::First);

        assert_eq!(second.cell(1, 2).claimed(Direction::Horizontal), 2);
        assert_eq!(score(first.cell(1, 2), second.cell(1, 2), 3), 14);
        assert_eq!(score(first.cell(0, 2), second.cell(0, 2), 3), 12);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select(Strategy::Normal, &moves, &first, &second, 3, &mut rng);
            assert_eq!(choice, Some((1, 2)));
        }
    }

    #[test]
    fn ties_are_broken_among_best_cells() {
        // On an empty board, the center and the corners lie on the most lines.
        let (grid, [first, second]) = position(3, 3, &[]);
        let moves = candidates(&grid, &ValidMoveRule::Anywhere, Side::First);
        assert_eq!(score(first.cell(1, 1), second.cell(1, 1), 3), 12);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select(Strategy::Normal, &moves, &first, &second, 3, &mut rng);
            assert_eq!(choice, Some((1, 1)));
        }

        // Row 0 of a 1x4 board with n = 4: all cells score the same
        let (grid, [first, second]) = position(1, 4, &[]);
        let moves = candidates(&grid, &ValidMoveRule::Anywhere, Side::First);
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(select(Strategy::Normal, &moves, &first, &second, 4, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn pure_random_picks_a_candidate() {
        let (grid, [first, second]) = position(3, 3, &[(1, 1), (0, 0)]);
        let moves = candidates(&grid, &ValidMoveRule::Anywhere, Side::First);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select(Strategy::PureRandom, &moves, &first, &second, 3, &mut rng);
            assert!(moves.contains(&choice.unwrap()));
        }
    }

    #[test]
    fn stalemate_yields_no_move() {
        // X O X
        // X O O
        // O X X
        let mut grid = Grid::new(3, 3);
        let layout = [
            [Side::First, Side::Second, Side::First],
            [Side::First, Side::Second, Side::Second],
            [Side::Second, Side::First, Side::First],
        ];
        for (row, sides) in layout.iter().enumerate() {
            for (col, &side) in sides.iter().enumerate() {
                grid.place(row, col, side).unwrap();
            }
        }
        let first = RunTracker::recompute(Side::First, &grid);
        let second = RunTracker::recompute(Side::Second, &grid);
        let moves = candidates(&grid, &ValidMoveRule::Anywhere, Side::First);
        assert!(moves.is_empty());

        let mut rng = StdRng::seed_from_u64(7);
        for strategy in [Strategy::PureRandom, Strategy::Normal] {
            assert_eq!(select(strategy, &moves, &first, &second, 3, &mut rng), None);
        }
    }

    #[test]
    fn breakdown_explains_terms() {
        let (_, [first, second]) = position(3, 3, &[(0, 0), (1, 0), (2, 2), (1, 1)]);
        let breakdown = ScoreBreakdown::new(first.cell(1, 2), second.cell(1, 2), 3);
        assert_eq!(
            breakdown.terms,
            [
                DirectionScore::Offensive { run: 3, claimed: 1 },
                DirectionScore::Defensive {
                    opponent_claimed: 2
                },
                DirectionScore::TooShort,
                DirectionScore::TooShort,
            ]
        );
        assert_eq!(breakdown.total(), 14);
        assert!(breakdown.to_string().ends_with("Sum: 14"));
    }

    #[test]
    fn full_own_line_has_no_room() {
        let cell = RunCell {
            run: [2, 3, 1, 1],
            claimed: [2, 0, 0, 0],
        };
        let breakdown = ScoreBreakdown::new(&cell, &RunCell::default(), 2);
        assert_eq!(breakdown.terms[0], DirectionScore::NoRoom);
        assert_eq!(breakdown.terms[1], DirectionScore::Offensive { run: 3, claimed: 0 });
        assert_eq!(breakdown.terms[2], DirectionScore::TooShort);
    }
}
