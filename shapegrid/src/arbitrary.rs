use quickcheck::{Arbitrary, Gen};

use crate::{Grid, Mark};

/// A small, mostly filled grid, so that exhaustive searches on it finish quickly.
#[derive(Clone, Debug)]
pub struct SearchableGrid(pub Grid);

const MAX_EMPTY_CELLS: usize = 5;

impl Arbitrary for SearchableGrid {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = (u8::arbitrary(g) % 4) as usize + 2;
        let mut grid = Grid::new(size);
        for row in 0..size {
            for col in 0..size {
                grid.place(Mark::arbitrary(g), row, col).unwrap();
            }
        }
        let num_empty = usize::arbitrary(g) % (MAX_EMPTY_CELLS + 1);
        for _ in 0..num_empty {
            let row = usize::arbitrary(g) % size;
            let col = usize::arbitrary(g) % size;
            grid.clear(row, col).unwrap();
        }
        SearchableGrid(grid)
    }
}

impl Arbitrary for Mark {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Mark::X, Mark::O]).unwrap()
    }
}
