use quickcheck::{Arbitrary, Gen};

/// A board shape together with a sequence of distinct cells to play on it.
///
/// The moves are meant to be played alternately, starting with
/// [`Side::First`](crate::Side::First). They ignore placement rules and win
/// conditions, so games may continue past a win.
#[derive(Clone, Debug)]
pub struct MoveSequence {
    pub rows: usize,
    pub cols: usize,
    pub moves: Vec<(usize, usize)>,
}

impl Arbitrary for MoveSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = usize::from(u8::arbitrary(g) % 7) + 1;
        let cols = usize::from(u8::arbitrary(g) % 7) + 1;

        let mut cells: Vec<(usize, usize)> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();
        // Fisher-Yates, since Gen only hands out single values
        for i in (1..cells.len()).rev() {
            let j = usize::arbitrary(g) % (i + 1);
            cells.swap(i, j);
        }
        let num_moves = usize::arbitrary(g) % (cells.len() + 1);
        cells.truncate(num_moves);

        MoveSequence {
            rows,
            cols,
            moves: cells,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let (rows, cols) = (self.rows, self.cols);
        let moves = self.moves.clone();
        Box::new((0..moves.len()).rev().map(move |len| MoveSequence {
            rows,
            cols,
            moves: moves[..len].to_vec(),
        }))
    }
}
