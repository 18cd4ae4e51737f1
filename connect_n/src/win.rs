use crate::{Direction, Grid, Side};

/// Whether `side` holds `n` cells in a row anywhere on the grid.
pub fn has_consecutive_run(grid: &Grid, side: Side, n: usize) -> bool {
    find_consecutive_run(grid, side, n).is_some()
}

/// Finds `n` cells in a row held by `side`.
///
/// Cells are tried in row-major order and, for each cell, the directions in
/// [`Direction::ALL`] order. Every line is walked in its forward sense only,
/// which covers all lines because every cell is a starting point. A walk
/// stops as soon as `n` matching cells have been visited, so longer lines
/// are reported by their first `n` cells.
pub fn find_consecutive_run(grid: &Grid, side: Side, n: usize) -> Option<Vec<(usize, usize)>> {
    if n == 0 {
        return Some(Vec::new());
    }
    for (row, col, occupant) in grid.iter() {
        if occupant != Some(side) {
            continue;
        }
        for direction in Direction::ALL {
            let mut line = Vec::with_capacity(n);
            let mut cursor = Some((row, col));
            while let Some((r, c)) = cursor {
                if grid.occupant(r, c) != Some(side) {
                    break;
                }
                line.push((r, c));
                if line.len() == n {
                    return Some(line);
                }
                cursor = grid.neighbor(r, c, direction);
            }
        }
    }
    None
}
