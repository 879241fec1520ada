use shapegrid::OutOfRange;

#[derive(Debug, PartialEq, Eq)]
/// Error type for one turn.
pub enum IllegalMove {
    OutOfRange(OutOfRange),
    CellOccupied { row: usize, col: usize },
    /// The player passed although there were empty cells left.
    NoMove,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::OutOfRange(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfRange(_) => write!(f, "Tried to place a mark outside of the grid"),
            IllegalMove::CellOccupied { row, col } => {
                write!(f, "Tried to place a mark on the occupied cell ({}, {})", row, col)
            }
            IllegalMove::NoMove => write!(f, "Did not place a mark, but the grid is not full"),
        }
    }
}

impl From<OutOfRange> for IllegalMove {
    fn from(err: OutOfRange) -> Self {
        IllegalMove::OutOfRange(err)
    }
}
