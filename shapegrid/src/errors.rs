/// The error type for accessing a cell of a [`Grid`](crate::Grid).
///
/// This is the only error the game logic itself raises. Searching and shape
/// detection never fail on a grid, since they only visit in-range cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub row: usize,
    pub col: usize,
    /// The side length of the grid that was accessed.
    pub size: usize,
}

impl std::error::Error for OutOfRange {}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell ({}, {}) is outside of the {}x{} grid",
            self.row, self.col, self.size, self.size
        )
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Grid`](crate::Grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFromStrErr {
    NoRows,
    NotSquare { rows: usize, row_len: usize },
    RaggedRow { row: usize },
    InvalidCell { row: usize, col: usize, found: char },
}

impl std::error::Error for GridFromStrErr {}

impl std::fmt::Display for GridFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridFromStrErr::NoRows => write!(f, "The grid has no rows"),
            GridFromStrErr::NotSquare { rows, row_len } => write!(
                f,
                "The grid has {} rows of length {}, but it must be square",
                rows, row_len
            ),
            GridFromStrErr::RaggedRow { row } => {
                write!(f, "Row {} has a different length than the first row", row)
            }
            GridFromStrErr::InvalidCell { row, col, found } => write!(
                f,
                "Invalid cell '{}' at ({}, {}), expected 'X', 'O' or '.'",
                found, row, col
            ),
        }
    }
}
