use serde::{Deserialize, Serialize};

use crate::{Grid, Mark};

/// One of the fixed patterns that scores points when completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// A bar of three with a stem of one cell above and below the middle:
    /// ```text
    /// .#.
    /// ###
    /// .#.
    /// ```
    T,
    /// The ring of a 3x3 block, without the center.
    Square,
    /// Five in a row, horizontally or vertically.
    Line,
    /// A vertical stem of three with a foot of two to the right:
    /// ```text
    /// #..
    /// #..
    /// ###
    /// ```
    L,
}

/// The cells of one orientation of a shape, relative to the top-left corner
/// of its bounding box.
struct Template {
    height: usize,
    width: usize,
    cells: &'static [(usize, usize)],
}

static T_TEMPLATES: [Template; 1] = [Template {
    height: 3,
    width: 3,
    cells: &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)],
}];

static SQUARE_TEMPLATES: [Template; 1] = [Template {
    height: 3,
    width: 3,
    cells: &[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 0),
        (1, 2),
        (2, 0),
        (2, 1),
        (2, 2),
    ],
}];

// Rows are scanned before columns.
static LINE_TEMPLATES: [Template; 2] = [
    Template {
        height: 1,
        width: 5,
        cells: &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
    },
    Template {
        height: 5,
        width: 1,
        cells: &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    },
];

static L_TEMPLATES: [Template; 1] = [Template {
    height: 3,
    width: 3,
    cells: &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)],
}];

impl Template {
    /// Row-major scan over every position where the template fits.
    fn find(&self, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        let rows = (grid.size() + 1).checked_sub(self.height)?;
        let cols = (grid.size() + 1).checked_sub(self.width)?;
        for row in 0..rows {
            for col in 0..cols {
                if self
                    .cells
                    .iter()
                    .all(|&(dr, dc)| grid.at(row + dr, col + dc) == Some(mark))
                {
                    return Some((row, col));
                }
            }
        }
        None
    }
}

impl Shape {
    /// The order in which shapes are checked by [`detect_shape()`].
    ///
    /// Note that this is not ordered by points: a T is reported even if a
    /// square is also on the grid.
    pub const PRECEDENCE: [Shape; 4] = [Shape::T, Shape::Square, Shape::Line, Shape::L];

    pub fn points(self) -> u32 {
        match self {
            Shape::T => 5,
            Shape::Square => 8,
            Shape::Line => 4,
            Shape::L => 5,
        }
    }

    fn templates(self) -> &'static [Template] {
        match self {
            Shape::T => &T_TEMPLATES,
            Shape::Square => &SQUARE_TEMPLATES,
            Shape::Line => &LINE_TEMPLATES,
            Shape::L => &L_TEMPLATES,
        }
    }

    /// Finds the first instance of this shape made of `mark`.
    ///
    /// Returns the top-left corner of its bounding box. For a T, that is the
    /// cell to the left of the top of the stem, which itself is never part
    /// of the shape.
    pub fn locate(self, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        self.templates()
            .iter()
            .find_map(|template| template.find(grid, mark))
    }

    pub fn is_present(self, grid: &Grid, mark: Mark) -> bool {
        self.locate(grid, mark).is_some()
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::T => write!(f, "T"),
            Shape::Square => write!(f, "square"),
            Shape::Line => write!(f, "line"),
            Shape::L => write!(f, "L"),
        }
    }
}

/// The shape that counts for `mark`, checking in [`Shape::PRECEDENCE`] order.
pub fn detect_shape(grid: &Grid, mark: Mark) -> Option<Shape> {
    Shape::PRECEDENCE
        .into_iter()
        .find(|shape| shape.is_present(grid, mark))
}

/// The points `mark` would score for the grid, or 0 if it has no shape.
pub fn score_for(grid: &Grid, mark: Mark) -> u32 {
    detect_shape(grid, mark).map_or(0, Shape::points)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::SearchableGrid;
    use crate::grid;

    quickcheck! {
        fn score_agrees_with_detected_shape(input: SearchableGrid, mark: Mark) -> bool {
            let grid = input.0;
            match detect_shape(&grid, mark) {
                Some(shape) => {
                    score_for(&grid, mark) == shape.points()
                        && Shape::PRECEDENCE
                            .iter()
                            .take_while(|&&s| s != shape)
                            .all(|s| !s.is_present(&grid, mark))
                }
                None => score_for(&grid, mark) == 0,
            }
        }

        fn detection_does_not_modify_grid(input: SearchableGrid) -> bool {
            let grid = input.0;
            let before = grid.clone();
            detect_shape(&grid, Mark::X);
            detect_shape(&grid, Mark::O);
            grid == before
        }
    }

    fn place_all(grid: &mut Grid, mark: Mark, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            grid.place(mark, row, col).unwrap();
        }
    }

    #[test]
    fn empty_grid_has_no_shape() {
        let grid = Grid::new(10);
        assert_eq!(detect_shape(&grid, Mark::X), None);
        assert_eq!(score_for(&grid, Mark::O), 0);
    }

    #[test]
    fn t_shape() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::X, &[(4, 6), (5, 5), (5, 6), (5, 7), (6, 6)]);
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::T));
        assert_eq!(score_for(&grid, Mark::X), 5);
        assert_eq!(Shape::T.locate(&grid, Mark::X), Some((4, 5)));
        assert_eq!(score_for(&grid, Mark::O), 0);
    }

    #[test]
    fn t_shape_touching_the_edges() {
        let grid = grid!(
            ".X...
             XXX..
             .X...
             .....
             ....."
        );
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::T));
        let grid = grid!(
            ".....
             .....
             ...O.
             ..OOO
             ...O."
        );
        assert_eq!(detect_shape(&grid, Mark::O), Some(Shape::T));
    }

    #[test]
    fn square_shape() {
        let grid = grid!(
            "OOO.
             O.O.
             OOO.
             ...."
        );
        assert_eq!(detect_shape(&grid, Mark::O), Some(Shape::Square));
        assert_eq!(score_for(&grid, Mark::O), 8);
    }

    #[test]
    fn square_with_filled_center_is_still_a_square() {
        let grid = grid!(
            "XXX.
             XXX.
             XXX.
             ...."
        );
        // The full block also contains a T, which takes precedence.
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::T));
        assert!(Shape::Square.is_present(&grid, Mark::X));

        let grid = grid!(
            "XXX.
             XOX.
             XXX.
             ...."
        );
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::Square));
    }

    #[test]
    fn t_takes_precedence_over_square() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::O, &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
        place_all(
            &mut grid,
            Mark::O,
            &[
                (5, 5),
                (5, 6),
                (5, 7),
                (6, 5),
                (6, 7),
                (7, 5),
                (7, 6),
                (7, 7),
            ],
        );
        assert!(Shape::Square.is_present(&grid, Mark::O));
        assert_eq!(detect_shape(&grid, Mark::O), Some(Shape::T));
        assert_eq!(score_for(&grid, Mark::O), 5);
    }

    #[test]
    fn horizontal_line() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::X, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::Line));
        assert_eq!(score_for(&grid, Mark::X), 4);

        grid.clear(0, 2).unwrap();
        assert_eq!(score_for(&grid, Mark::X), 0);
    }

    #[test]
    fn vertical_line_at_the_bottom_right() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::O, &[(5, 9), (6, 9), (7, 9), (8, 9), (9, 9)]);
        assert_eq!(detect_shape(&grid, Mark::O), Some(Shape::Line));
        assert_eq!(Shape::Line.locate(&grid, Mark::O), Some((5, 9)));
    }

    #[test]
    fn diagonal_is_not_a_line() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::X, &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(detect_shape(&grid, Mark::X), None);
    }

    #[test]
    fn line_of_mixed_marks_does_not_count() {
        let grid = grid!(
            "XXOXX
             .....
             .....
             .....
             ....."
        );
        assert_eq!(detect_shape(&grid, Mark::X), None);
        assert_eq!(detect_shape(&grid, Mark::O), None);
    }

    #[test]
    fn l_shape() {
        let mut grid = Grid::new(10);
        place_all(&mut grid, Mark::X, &[(2, 3), (3, 3), (4, 3), (4, 4), (4, 5)]);
        assert_eq!(detect_shape(&grid, Mark::X), Some(Shape::L));
        assert_eq!(score_for(&grid, Mark::X), 5);
        assert_eq!(Shape::L.locate(&grid, Mark::X), Some((2, 3)));
    }

    #[test]
    fn mirrored_l_does_not_count() {
        let grid = grid!(
            "..X.
             ..X.
             XXX.
             ...."
        );
        assert_eq!(detect_shape(&grid, Mark::X), None);
    }

    #[test]
    fn grid_smaller_than_shapes() {
        let grid = grid!("XX XX");
        assert_eq!(detect_shape(&grid, Mark::X), None);
        let grid = grid!("X");
        assert_eq!(detect_shape(&grid, Mark::X), None);
    }

    #[test]
    fn line_needs_five_cells() {
        let grid = grid!(
            "XXXX
             ....
             ....
             ...."
        );
        assert_eq!(detect_shape(&grid, Mark::X), None);
    }
}
