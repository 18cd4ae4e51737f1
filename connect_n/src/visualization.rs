use crate::{Direction, Grid, RunCell, RunTracker};

pub fn visualize_grid(grid: &Grid) -> String {
    // Draw the top of the box
    let mut result = String::from("    ");
    for col in 0..grid.cols() {
        result += &format!("{:>2}", col);
    }
    result += "\n    ╭";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╮";

    for (row, col, occupant) in grid.iter() {
        if col == 0 {
            result += &format!("\n{:>3} │", row);
        }
        match occupant {
            Some(side) => result += &format!("{} ", side.symbol()),
            None => result += "· ",
        }
        if col + 1 == grid.cols() {
            result += "│";
        }
    }

    // Draw the bottom of the box
    result += "\n    ╰";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╯";
    result
}

/// One table per direction, side by side, with the `run` value of each cell.
pub fn visualize_runs(tracker: &RunTracker) -> String {
    visualize_tracker(tracker, RunCell::run)
}

/// One table per direction, side by side, with the `claimed` value of each cell.
pub fn visualize_claims(tracker: &RunTracker) -> String {
    visualize_tracker(tracker, RunCell::claimed)
}

fn visualize_tracker(tracker: &RunTracker, value: impl Fn(&RunCell, Direction) -> u32) -> String {
    let width = (tracker.cols() * 3).max(9);
    let mut result = String::new();
    for direction in Direction::ALL {
        result += &format!("{:<width$}\t", direction.label(), width = width);
    }
    result += "\n";
    for row in 0..tracker.rows() {
        for direction in Direction::ALL {
            let mut line = String::new();
            for col in 0..tracker.cols() {
                line += &format!("{:<3}", value(tracker.cell(row, col), direction));
            }
            result += &format!("{:<width$}\t", line, width = width);
        }
        result += "\n";
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn draws_pieces() {
        let mut grid = Grid::new(2, 3);
        grid.place(0, 0, Side::First).unwrap();
        grid.place(1, 2, Side::Second).unwrap();
        let expected = "     0 1 2\n    ╭──────╮\n  0 │X · · │\n  1 │· · O │\n    ╰──────╯";
        assert_eq!(visualize_grid(&grid), expected);
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn tracker_tables() {
        let tracker = RunTracker::new(Side::First, 1, 2);
        let runs = visualize_runs(&tracker);
        let mut lines = runs.lines();
        assert!(lines.next().unwrap().starts_with("Vertical "));
        assert_eq!(
            lines.next().unwrap().split('\t').map(str::trim_end).collect::<Vec<_>>(),
            vec!["1  1", "2  2", "1  1", "1  1", ""]
        );
        assert!(visualize_claims(&tracker).contains("0  0"));
    }
}
