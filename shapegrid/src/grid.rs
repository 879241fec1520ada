use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GridFromStrErr, OutOfRange};

/// The default side length of a grid.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// The symbol that identifies which side owns a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark of the other side.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A square grid of cells, each of which is empty or holds one [`Mark`].
///
/// The grid does not know about the rules of the game: any cell can be
/// overwritten at any time. Checking whether a move is legal is up to
/// the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Row-major, `size * size` entries.
    cells: Vec<Option<Mark>>,
}

// !!!!!! NOTE: Keep the row-major order of empty_cells() stable, bots rely on it for tie-breaking !!!!!!
impl Grid {
    /// Creates an empty grid of `size` x `size` cells.
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "A grid needs at least one cell");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// The number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The mark at the given cell, if any.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Mark>, OutOfRange> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, OutOfRange> {
        Ok(self.get(row, col)?.is_none())
    }

    /// Puts `mark` into the cell, overwriting whatever was there.
    pub fn place(&mut self, mark: Mark, row: usize, col: usize) -> Result<(), OutOfRange> {
        let idx = self.index(row, col)?;
        self.cells[idx] = Some(mark);
        Ok(())
    }

    /// Empties the cell.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), OutOfRange> {
        let idx = self.index(row, col)?;
        self.cells[idx] = None;
        Ok(())
    }

    /// All empty cells as `(row, col)`, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Places `mark` for as long as the returned guard lives.
    ///
    /// When the guard is dropped, the cell gets back its previous content.
    /// The guard dereferences to the grid, so it can be passed on wherever
    /// a `&Grid` or `&mut Grid` is expected.
    pub fn place_scoped(
        &mut self,
        mark: Mark,
        row: usize,
        col: usize,
    ) -> Result<ScopedPlacement<'_>, OutOfRange> {
        let index = self.index(row, col)?;
        Ok(self.scoped_at(mark, index))
    }

    /// Like [`Self::place_scoped()`], for coordinates that are known to be in range.
    pub(crate) fn scoped(&mut self, mark: Mark, row: usize, col: usize) -> ScopedPlacement<'_> {
        debug_assert!(row < self.size && col < self.size);
        let index = row * self.size + col;
        self.scoped_at(mark, index)
    }

    fn scoped_at(&mut self, mark: Mark, index: usize) -> ScopedPlacement<'_> {
        let previous = std::mem::replace(&mut self.cells[index], Some(mark));
        ScopedPlacement {
            grid: self,
            index,
            previous,
        }
    }

    /// Unchecked access for the shape scans, which only visit valid cells.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells[row * self.size + col]
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, OutOfRange> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(OutOfRange {
                row,
                col,
                size: self.size,
            })
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

/// A hypothetical placement, undone on drop.
///
/// Created by [`Grid::place_scoped()`].
pub struct ScopedPlacement<'a> {
    grid: &'a mut Grid,
    index: usize,
    previous: Option<Mark>,
}

impl Deref for ScopedPlacement<'_> {
    type Target = Grid;

    fn deref(&self) -> &Self::Target {
        self.grid
    }
}

impl DerefMut for ScopedPlacement<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.grid
    }
}

impl Drop for ScopedPlacement<'_> {
    fn drop(&mut self) {
        self.grid.cells[self.index] = self.previous;
    }
}

/// Parses whitespace-separated rows, where `X` and `O` are marks and `.` is an empty cell.
impl FromStr for Grid {
    type Err = GridFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        let first = rows.first().ok_or(GridFromStrErr::NoRows)?;
        let size = first.chars().count();
        if size != rows.len() {
            return Err(GridFromStrErr::NotSquare {
                rows: rows.len(),
                row_len: size,
            });
        }

        let mut grid = Grid::new(size);
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return Err(GridFromStrErr::RaggedRow { row });
            }
            for (col, c) in line.chars().enumerate() {
                grid.cells[row * size + col] = match c {
                    'X' | 'x' => Some(Mark::X),
                    'O' | 'o' => Some(Mark::O),
                    '.' => None,
                    found => return Err(GridFromStrErr::InvalidCell { row, col, found }),
                };
            }
        }
        Ok(grid)
    }
}

/// Shorthand for creating a grid from a string of rows.
///
/// This macro is just calling the [`FromStr`] instance of [`Grid`].
/// ```
/// # use shapegrid::{grid, Mark};
/// let grid = grid!("X.O ... O.X");
/// assert_eq!(grid.size(), 3);
/// assert_eq!(grid.get(0, 2), Ok(Some(Mark::O)));
/// ```
#[macro_export]
macro_rules! grid {
    ($rows:expr) => {
        <$crate::Grid as std::str::FromStr>::from_str($rows)
            .expect("Invalid grid given to grid! macro")
    };
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::SearchableGrid;

    quickcheck! {
        fn empty_and_occupied_cells_cover_the_grid(input: SearchableGrid) -> bool {
            let grid = input.0;
            let empty = grid.empty_cells();
            let occupied = (0..grid.size())
                .flat_map(|row| (0..grid.size()).map(move |col| (row, col)))
                .filter(|&(row, col)| grid.get(row, col).unwrap().is_some())
                .count();
            empty.len() + occupied == grid.size() * grid.size()
                && grid.is_full() == empty.is_empty()
        }

        fn scoped_placement_restores_the_cell(input: SearchableGrid, row: usize, col: usize, mark: Mark) -> bool {
            let mut grid = input.0;
            let (row, col) = (row % grid.size(), col % grid.size());
            let before = grid.clone();
            {
                let placed = grid.place_scoped(mark, row, col).unwrap();
                assert_eq!(placed.get(row, col), Ok(Some(mark)));
            }
            grid == before
        }
    }

    #[test]
    fn fresh_grid_is_empty() {
        for size in 1..=10 {
            let grid = Grid::new(size);
            assert_eq!(grid.empty_cells().len(), size * size);
            assert!(!grid.is_full());
        }
    }

    #[test]
    fn grid_is_full_only_after_every_cell_is_placed() {
        let mut grid = Grid::new(3);
        let cells = grid.empty_cells();
        for (n, &(row, col)) in cells.iter().enumerate() {
            assert!(!grid.is_full());
            let mark = if n % 2 == 0 { Mark::X } else { Mark::O };
            grid.place(mark, row, col).unwrap();
        }
        assert!(grid.is_full());
        assert!(grid.empty_cells().is_empty());
    }

    #[test]
    fn empty_cells_are_row_major() {
        let grid = grid!("X.. .O. ..X");
        assert_eq!(
            grid.empty_cells(),
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn place_makes_cell_occupied_and_overwrites() {
        let mut grid = Grid::new(10);
        grid.place(Mark::X, 3, 7).unwrap();
        assert_eq!(grid.is_empty(3, 7), Ok(false));
        assert_eq!(grid.get(3, 7), Ok(Some(Mark::X)));

        grid.place(Mark::O, 3, 7).unwrap();
        assert_eq!(grid.get(3, 7), Ok(Some(Mark::O)));
        assert_eq!(grid.empty_cells().len(), 99);
    }

    #[test]
    fn out_of_range_coordinates() {
        let mut grid = Grid::new(10);
        let err = OutOfRange {
            row: 10,
            col: 0,
            size: 10,
        };
        assert_eq!(grid.is_empty(10, 0), Err(err));
        assert_eq!(grid.place(Mark::X, 10, 0), Err(err));
        assert!(grid.place(Mark::X, 0, 10).is_err());
        assert!(grid.place_scoped(Mark::O, 0, 10).is_err());
        assert!(grid.clear(11, 11).is_err());
        assert_eq!(grid, Grid::new(10));
    }

    #[test]
    fn scoped_placement_restores_previous_mark() {
        let mut grid = grid!("XO. ... ...");
        {
            let mut placed = grid.place_scoped(Mark::O, 0, 0).unwrap();
            placed.place(Mark::X, 2, 2).unwrap();
            assert_eq!(placed.get(0, 0), Ok(Some(Mark::O)));
        }
        // Only the scoped cell is restored, the nested plain placement stays.
        assert_eq!(grid.get(0, 0), Ok(Some(Mark::X)));
        assert_eq!(grid.get(2, 2), Ok(Some(Mark::X)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridFromStrErr::NoRows));
        assert_eq!(
            "XO. ...".parse::<Grid>(),
            Err(GridFromStrErr::NotSquare {
                rows: 2,
                row_len: 3
            })
        );
        assert_eq!(
            "XO. .. ...".parse::<Grid>(),
            Err(GridFromStrErr::RaggedRow { row: 1 })
        );
        assert_eq!(
            "X? ..".parse::<Grid>(),
            Err(GridFromStrErr::InvalidCell {
                row: 0,
                col: 1,
                found: '?'
            })
        );
    }
}
